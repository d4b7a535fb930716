//! Chart Plotter Module
//! Creates the dashboard's interactive visualizations using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::data::{AgeBand, AgeRow, CaseRecord, TypeSeries};
use crate::stats::Kpis;

/// Everything one render of the dashboard needs, rebuilt from the immutable
/// dataset on every filter change.
#[derive(Clone)]
pub struct DashboardView {
    pub year: i32,
    pub kpis: Kpis,
    /// Category axis for the line chart: every year in the dataset, sorted.
    pub years_axis: Vec<i32>,
    pub series: Vec<TypeSeries>,
    /// (classification, total) bars for the selected year, in table order.
    pub type_totals: Vec<(String, f64)>,
    pub age_rows: Vec<AgeRow>,
    /// Sorted classifications present in the filtered subset; x-axis of the
    /// stacked chart.
    pub type_order: Vec<String>,
    pub table: Vec<CaseRecord>,
}

/// Color palette for cancer types and age bands.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
];

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color_for(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Historical line chart: one line per selected type, markers on every
    /// point. The x-axis is categorical (year index with string labels) so
    /// zooming never produces fractional-year ticks.
    pub fn draw_history_chart(
        ui: &mut egui::Ui,
        series: &[TypeSeries],
        years_axis: &[i32],
        height: f32,
    ) {
        let x_labels: Vec<String> = years_axis.iter().map(|y| y.to_string()).collect();
        let year_index = |year: i32| years_axis.iter().position(|y| *y == year);

        Plot::new("history_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Año")
            .y_axis_label("Total de casos")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, s) in series.iter().enumerate() {
                    let color = Self::color_for(i);
                    let points_vec: Vec<[f64; 2]> = s
                        .points
                        .iter()
                        .filter_map(|(year, total)| {
                            year_index(*year).map(|idx| [idx as f64, *total])
                        })
                        .collect();
                    if points_vec.is_empty() {
                        continue;
                    }

                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points_vec.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(&s.classification),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points_vec.iter().copied()))
                            .radius(3.0)
                            .color(color),
                    );
                }
            });
    }

    /// Bar chart of `Total general` per type for the selected year.
    pub fn draw_type_bar_chart(ui: &mut egui::Ui, type_totals: &[(String, f64)], height: f32) {
        let x_labels: Vec<String> = type_totals.iter().map(|(t, _)| t.clone()).collect();

        Plot::new("type_bar_chart")
            .height(height)
            .allow_scroll(false)
            .y_axis_label("Casos")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = type_totals
                    .iter()
                    .enumerate()
                    .map(|(i, (_, total))| {
                        Bar::new(i as f64, *total)
                            .width(0.6)
                            .fill(Self::color_for(0).gamma_multiply(0.8))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name("Casos"));
            });
    }

    /// Stacked bar chart of the four age bands per type for the selected
    /// year. One BarChart per band, each stacked on the previous ones.
    pub fn draw_age_stack_chart(
        ui: &mut egui::Ui,
        age_rows: &[AgeRow],
        type_order: &[String],
        height: f32,
    ) {
        let x_labels: Vec<String> = type_order.to_vec();

        Plot::new("age_stack_chart")
            .height(height)
            .legend(Legend::default())
            .allow_scroll(false)
            .y_axis_label("Casos")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let mut charts: Vec<BarChart> = Vec::new();

                for (band_idx, band) in AgeBand::ALL.iter().enumerate() {
                    let bars: Vec<Bar> = type_order
                        .iter()
                        .enumerate()
                        .map(|(i, classification)| {
                            let count: f64 = age_rows
                                .iter()
                                .filter(|r| {
                                    r.band == *band && r.classification == *classification
                                })
                                .map(|r| r.count)
                                .sum();
                            Bar::new(i as f64, count).width(0.6)
                        })
                        .collect();

                    let below: Vec<&BarChart> = charts.iter().collect();
                    let chart = BarChart::new(bars)
                        .name(band.label())
                        .color(Self::color_for(band_idx))
                        .stack_on(&below);
                    charts.push(chart);
                }

                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }
}
