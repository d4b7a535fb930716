//! Chart Viewer Widget
//! Central scrollable panel: KPI cards, the three charts and the filtered
//! table, drawn with egui_plot and egui.

use crate::charts::{ChartPlotter, DashboardView};
use crate::data::AgeBand;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const LINE_CHART_HEIGHT: f32 = 300.0;
const BAR_CHART_HEIGHT: f32 = 320.0;

/// Scrollable dashboard display area.
pub struct ChartViewer {
    view: Option<DashboardView>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self { view: None }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
    }

    /// Draw the dashboard.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_kpi_row(ui, view);
                ui.add_space(SECTION_SPACING);

                ui.label(
                    RichText::new("Evolución histórica por tipo de cáncer")
                        .size(16.0)
                        .strong(),
                );
                ui.add_space(5.0);
                ChartPlotter::draw_history_chart(
                    ui,
                    &view.series,
                    &view.years_axis,
                    LINE_CHART_HEIGHT,
                );

                ui.add_space(SECTION_SPACING);

                // Two charts side by side for the selected year.
                let half_width = (ui.available_width() - 20.0) / 2.0;
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(half_width);
                        ui.label(
                            RichText::new(format!("Casos por tipo ({})", view.year))
                                .size(14.0)
                                .strong(),
                        );
                        ChartPlotter::draw_type_bar_chart(
                            ui,
                            &view.type_totals,
                            BAR_CHART_HEIGHT,
                        );
                    });

                    ui.add_space(10.0);

                    ui.vertical(|ui| {
                        ui.set_width(half_width);
                        ui.label(
                            RichText::new("Distribución por grupos etarios")
                                .size(14.0)
                                .strong(),
                        );
                        ChartPlotter::draw_age_stack_chart(
                            ui,
                            &view.age_rows,
                            &view.type_order,
                            BAR_CHART_HEIGHT,
                        );
                    });
                });

                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Datos filtrados").size(16.0).strong());
                ui.add_space(5.0);
                Self::draw_table(ui, view);
            });
    }

    /// Two KPI cards: total cases for the year, types with cases.
    fn draw_kpi_row(ui: &mut egui::Ui, view: &DashboardView) {
        ui.horizontal(|ui| {
            Self::draw_kpi_card(
                ui,
                "Total de casos en el año",
                &view.kpis.total_cases.to_string(),
            );
            ui.add_space(10.0);
            Self::draw_kpi_card(
                ui,
                "Tipos de cáncer con casos",
                &view.kpis.active_type_count.to_string(),
            );
        });
    }

    fn draw_kpi_card(ui: &mut egui::Ui, title: &str, value: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                    ui.label(
                        RichText::new(value)
                            .size(26.0)
                            .strong()
                            .color(Color32::from_rgb(100, 149, 237)),
                    );
                });
            });
    }

    /// The filtered per-type table as a striped grid.
    fn draw_table(ui: &mut egui::Ui, view: &DashboardView) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("filtered_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Año").strong().size(11.0));
                        ui.label(RichText::new("Clasificación").strong().size(11.0));
                        ui.label(RichText::new("Total").strong().size(11.0));
                        for band in AgeBand::ALL {
                            ui.label(RichText::new(band.label()).strong().size(11.0));
                        }
                        ui.end_row();

                        for record in &view.table {
                            ui.label(RichText::new(record.year.to_string()).size(11.0));
                            ui.label(RichText::new(&record.classification).size(11.0));
                            ui.label(RichText::new(format!("{:.0}", record.total)).size(11.0));
                            for band in AgeBand::ALL {
                                ui.label(
                                    RichText::new(format!("{:.0}", record.age_count(band)))
                                        .size(11.0),
                                );
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
