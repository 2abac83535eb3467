// src/view.rs
//
// Shapes handed to the presentation side. These only sum, sort and format;
// no cell interpretation happens past the extractor.

use serde::Serialize;
use std::cmp::Ordering;

use crate::dataset::{ClientRecord, DashboardDataset};

/// Headline numbers for the summary card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTotals {
    #[serde(rename = "horasTotais")]
    pub contracted: f64,
    #[serde(rename = "horasTrabalhadas")]
    pub worked: f64,
}

impl SummaryTotals {
    pub fn percent_worked(&self) -> f64 {
        percent(self.worked, self.contracted)
    }
}

/// One line of the client table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRow {
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "horasTotais")]
    pub contracted: f64,
    #[serde(rename = "horasTrabalhadas")]
    pub worked: f64,
}

impl ClientRow {
    pub fn percent_used(&self) -> f64 {
        percent(self.worked, self.contracted)
    }

    pub fn is_over_budget(&self) -> bool {
        self.percent_used() > 100.0
    }
}

/// One point of the monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub data: String,
    #[serde(rename = "horasTrabalhadas")]
    pub worked: f64,
}

pub fn summary_totals(ds: &DashboardDataset) -> SummaryTotals {
    SummaryTotals {
        contracted: ds.client_records.iter().map(|r| r.contracted_hours).sum(),
        worked: ds.current_period_total,
    }
}

/// Client rows ordered by name.
pub fn client_rows(ds: &DashboardDataset) -> Vec<ClientRow> {
    let mut records: Vec<&ClientRecord> = ds.client_records.iter().collect();
    records.sort_by(|a, b| compare_names(&a.client_name, &b.client_name));
    records
        .into_iter()
        .map(|r| ClientRow {
            client: r.client_name.clone(),
            contracted: r.contracted_hours,
            worked: r.worked_hours,
        })
        .collect()
}

pub fn monthly_series(ds: &DashboardDataset) -> Vec<MonthlyPoint> {
    ds.period_aggregates
        .iter()
        .map(|a| MonthlyPoint {
            data: a.period_label.clone(),
            worked: a.total_hours,
        })
        .collect()
}

/// Whole hours print bare, anything else with two decimals.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{:.2}", hours)
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Name ordering the way a Portuguese reader expects: case and accents are
/// ignored first, the raw string breaks ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rows: &[ClientRow]) -> Vec<&str> {
        rows.iter().map(|r| r.client.as_str()).collect()
    }

    #[test]
    fn totals_from_fallback() {
        let ds = DashboardDataset::fallback();
        let totals = summary_totals(&ds);
        assert_eq!(totals.contracted, 210.0);
        assert_eq!(totals.worked, 122.01);
        assert!((totals.percent_worked() - 58.1).abs() < 0.01);
    }

    #[test]
    fn clients_sorted_by_name() {
        let ds = DashboardDataset::fallback();
        assert_eq!(
            names(&client_rows(&ds)),
            vec!["ASR6", "CEE5", "ISS5", "SDK5", "VKS3"]
        );
    }

    #[test]
    fn sort_ignores_case_and_accents() {
        let mut v = vec!["zeta", "Élan", "beta", "Alfa", "álamo"];
        v.sort_by(|a, b| compare_names(a, b));
        assert_eq!(v, vec!["álamo", "Alfa", "beta", "Élan", "zeta"]);
    }

    #[test]
    fn monthly_series_keeps_order() {
        let ds = DashboardDataset::fallback();
        let series = monthly_series(&ds);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].data, "mai/25");
        assert_eq!(series[0].worked, 122.01);
        assert_eq!(series[4].data, "set/25");
    }

    #[test]
    fn external_field_names() -> anyhow::Result<()> {
        let ds = DashboardDataset::fallback();
        let totals = serde_json::to_value(summary_totals(&ds))?;
        assert_eq!(totals["horasTotais"], 210.0);
        assert_eq!(totals["horasTrabalhadas"], 122.01);
        let point = serde_json::to_value(&monthly_series(&ds)[0])?;
        assert_eq!(point["data"], "mai/25");
        Ok(())
    }

    #[test]
    fn client_percent_and_budget() {
        let row = ClientRow {
            client: "X".into(),
            contracted: 30.0,
            worked: 45.0,
        };
        assert_eq!(row.percent_used(), 150.0);
        assert!(row.is_over_budget());
        let idle = ClientRow {
            client: "Y".into(),
            contracted: 0.0,
            worked: 3.0,
        };
        assert_eq!(idle.percent_used(), 0.0);
    }

    #[test]
    fn hours_formatting() {
        assert_eq!(format_hours(30.0), "30");
        assert_eq!(format_hours(16.01), "16.01");
        assert_eq!(format_hours(2.5), "2.50");
    }
}
