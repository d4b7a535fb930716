//! Control Panel Widget
//! Left side panel with the data source picker and the year/type filters.

use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub years: Vec<i32>,
    pub types: Vec<String>,
    pub selected_year: Option<i32>,
    pub selected_types: Vec<bool>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            years: Vec::new(),
            types: Vec::new(),
            selected_year: None,
            selected_types: Vec::new(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the filter options after a dataset load. Defaults follow the
    /// reporting convention: latest year selected, every type selected.
    pub fn update_options(&mut self, years: Vec<i32>, types: Vec<String>) {
        self.selected_year = years.last().copied();
        self.selected_types = vec![true; types.len()];
        self.years = years;
        self.types = types;
    }

    /// The currently allowed classification set for filtering.
    pub fn allowed_types(&self) -> BTreeSet<String> {
        self.types
            .iter()
            .zip(self.selected_types.iter())
            .filter(|(_, &selected)| selected)
            .map(|(t, _)| t.clone())
            .collect()
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧬 Cáncer Infantil")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Dashboard de casos pediátricos")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔎 Filtros").size(14.0).strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new("Año:"));
            let selected_text = self
                .selected_year
                .map(|y| y.to_string())
                .unwrap_or_default();
            ComboBox::from_id_salt("year_select")
                .width(150.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for year in &self.years {
                        if ui
                            .selectable_label(self.selected_year == Some(*year), year.to_string())
                            .clicked()
                        {
                            self.selected_year = Some(*year);
                            action = ControlPanelAction::FilterChanged;
                        }
                    }
                });
        });

        ui.add_space(10.0);

        ui.label("Tipo de Cáncer:");
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("type_select")
                    .max_height(220.0)
                    .show(ui, |ui| {
                        for (i, label) in self.types.iter().enumerate() {
                            if i < self.selected_types.len()
                                && ui.checkbox(&mut self.selected_types[i], label).changed()
                            {
                                action = ControlPanelAction::FilterChanged;
                            }
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.selected_types.iter_mut().for_each(|v| *v = true);
                action = ControlPanelAction::FilterChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.selected_types.iter_mut().for_each(|v| *v = false);
                action = ControlPanelAction::FilterChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FilterChanged,
}
