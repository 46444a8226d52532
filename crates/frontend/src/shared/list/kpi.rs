//! Показатели для полосы KPI над таблицей
//!
//! KPIs are derived from the rows currently shown and are never sent to the
//! server or stored.

use std::collections::HashSet;

use super::row::ListRow;

#[derive(Debug, Clone, PartialEq)]
pub enum KpiSpec {
    Count,
    Sum(String),
    /// Arithmetic mean over rows that have the field; 0 when none do.
    Average(String),
    /// Rows whose field equals the value, ignoring case.
    CountWhere(String, String),
    DistinctCount(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    pub label: String,
    pub value: f64,
}

pub fn compute_kpi<R: ListRow>(rows: &[R], spec: &KpiSpec) -> f64 {
    match spec {
        KpiSpec::Count => rows.len() as f64,
        KpiSpec::Sum(field) => rows.iter().filter_map(|r| r.field_number(field)).sum(),
        KpiSpec::Average(field) => {
            let values: Vec<f64> = rows.iter().filter_map(|r| r.field_number(field)).collect();
            if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            }
        }
        KpiSpec::CountWhere(field, expected) => rows
            .iter()
            .filter(|r| {
                r.field_text(field)
                    .map(|v| v.eq_ignore_ascii_case(expected))
                    .unwrap_or(false)
            })
            .count() as f64,
        KpiSpec::DistinctCount(field) => rows
            .iter()
            .filter_map(|r| r.field_text(field))
            .collect::<HashSet<_>>()
            .len() as f64,
    }
}

pub fn compute_kpis<R: ListRow>(rows: &[R], specs: &[(String, KpiSpec)]) -> Vec<Kpi> {
    specs
        .iter()
        .map(|(label, spec)| Kpi {
            label: label.clone(),
            value: compute_kpi(rows, spec),
        })
        .collect()
}
