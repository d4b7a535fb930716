//! Dashboard Main Application
//! Main window with control panel and dashboard viewer. Every filter
//! interaction rebuilds all derived views synchronously from the cached
//! dataset.

use anyhow::Context;
use egui::SidePanel;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::charts::DashboardView;
use crate::data::{CaseRecord, DataProcessor, DatasetLoader};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::KpiCalculator;

/// Conventional dataset location, tried at startup.
pub const DEFAULT_CSV_PATH: &str = "Datos_Postgrade.csv";

/// Main application window.
pub struct DashboardApp {
    loader: DatasetLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DatasetLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };

        let default_path = Path::new(DEFAULT_CSV_PATH);
        if default_path.exists() {
            app.load_dataset(default_path.to_path_buf());
        } else {
            app.control_panel
                .set_status("No dataset loaded - browse for a CSV file");
        }

        app
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.load_dataset(path);
        }
    }

    /// Load the dataset and reset the filters to their defaults (latest
    /// year, all types). A failed load keeps the previous state and surfaces
    /// the error on the status line.
    fn load_dataset(&mut self, path: PathBuf) {
        let result = self
            .loader
            .load(&path)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Failed to load {}", path.display()));

        match result {
            Ok(dataset) => {
                let (_, types) = DataProcessor::split_totals(dataset.records());
                let years = DataProcessor::available_years(dataset.records());
                let type_labels = DataProcessor::available_types(&types);

                self.control_panel.csv_path = Some(path);
                self.control_panel
                    .set_status(&format!("Loaded {} rows", dataset.len()));
                self.control_panel.update_options(years, type_labels);
                self.rebuild_view();
            }
            Err(e) => {
                log::error!("{e:#}");
                self.control_panel.set_status(&format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute every derived view from the cached dataset and the current
    /// filter state.
    fn rebuild_view(&mut self) {
        let Some(dataset) = self.loader.dataset().cloned() else {
            return;
        };
        let Some(year) = self.control_panel.selected_year else {
            self.chart_viewer.clear();
            return;
        };

        let allowed = self.control_panel.allowed_types();
        let view = Self::build_view(dataset.records(), year, &allowed);
        self.chart_viewer.set_view(view);
    }

    /// Build the full dashboard view for one (year, allowed-types) filter
    /// state. Pure function over the loaded records.
    fn build_view(records: &[CaseRecord], year: i32, allowed: &BTreeSet<String>) -> DashboardView {
        let (totals, types) = DataProcessor::split_totals(records);

        let totals_for_year: Vec<CaseRecord> =
            totals.into_iter().filter(|r| r.year == year).collect();
        let types_for_year = DataProcessor::filter_by_year_and_types(&types, year, allowed);

        let kpis = KpiCalculator::compute(&totals_for_year, &types_for_year);
        let series = DataProcessor::time_series(&types, allowed);
        let years_axis = DataProcessor::available_years(records);
        let type_totals = types_for_year
            .iter()
            .map(|r| (r.classification.clone(), r.total))
            .collect();
        let age_rows = DataProcessor::to_age_distribution(&types_for_year);
        let type_order = DataProcessor::available_types(&types_for_year);

        DashboardView {
            year,
            kpis,
            years_axis,
            series,
            type_totals,
            age_rows,
            type_order,
            table: types_for_year,
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FilterChanged => self.rebuild_view(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AgeBand;

    fn record(year: i32, classification: &str, total: f64) -> CaseRecord {
        CaseRecord {
            year,
            classification: classification.to_string(),
            total,
            age_counts: [total / 4.0; 4],
        }
    }

    fn sample() -> Vec<CaseRecord> {
        vec![
            record(2021, "Total", 40.0),
            record(2021, "Leucemia", 25.0),
            record(2021, "Linfoma", 15.0),
            record(2022, "Total", 50.0),
            record(2022, "Leucemia", 30.0),
            record(2022, "Linfoma", 0.0),
        ]
    }

    #[test]
    fn view_for_selected_year_with_all_types() {
        let records = sample();
        let allowed: BTreeSet<String> =
            ["Leucemia".to_string(), "Linfoma".to_string()].into();

        let view = DashboardApp::build_view(&records, 2022, &allowed);

        assert_eq!(view.kpis.total_cases, 50);
        assert_eq!(view.kpis.active_type_count, 1);
        assert_eq!(view.years_axis, vec![2021, 2022]);
        assert_eq!(view.series.len(), 2);
        assert_eq!(
            view.type_totals,
            vec![("Leucemia".to_string(), 30.0), ("Linfoma".to_string(), 0.0)]
        );
        assert_eq!(view.age_rows.len(), 2 * AgeBand::ALL.len());
        assert_eq!(view.table.len(), 2);
    }

    #[test]
    fn view_with_no_selected_types_keeps_total_kpi() {
        let records = sample();
        let allowed = BTreeSet::new();

        let view = DashboardApp::build_view(&records, 2022, &allowed);

        assert_eq!(view.kpis.total_cases, 50);
        assert_eq!(view.kpis.active_type_count, 0);
        assert!(view.table.is_empty());
        assert!(view.series.is_empty());
        assert!(view.age_rows.is_empty());
    }

    #[test]
    fn view_for_year_without_type_breakdown() {
        let mut records = sample();
        records.push(record(2023, "Total", 12.0));
        let allowed: BTreeSet<String> =
            ["Leucemia".to_string(), "Linfoma".to_string()].into();

        let view = DashboardApp::build_view(&records, 2023, &allowed);

        assert_eq!(view.kpis.total_cases, 12);
        assert_eq!(view.kpis.active_type_count, 0);
        assert!(view.table.is_empty());
    }

    #[test]
    fn view_for_absent_year_is_empty() {
        let records = sample();
        let allowed: BTreeSet<String> = ["Leucemia".to_string()].into();

        let view = DashboardApp::build_view(&records, 1999, &allowed);

        assert_eq!(view.kpis.total_cases, 0);
        assert_eq!(view.kpis.active_type_count, 0);
        assert!(view.table.is_empty());
    }
}
