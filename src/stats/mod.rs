//! Stats module - KPI computation and data-quality checks

mod calculator;

pub use calculator::{KpiCalculator, Kpis, YearMismatch};
