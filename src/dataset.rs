// src/dataset.rs

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::period::PeriodKey;
use crate::sheet::Extraction;

/// One client's contracted vs. worked hours for the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_name: String,
    pub contracted_hours: f64,
    pub worked_hours: f64,
    pub period: PeriodKey,
}

/// Total worked hours across all clients for one labelled period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    pub period_label: String,
    pub total_hours: f64,
}

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Nothing fetched yet.
    Empty,
    Sheet,
    Fallback,
}

/// Output of one fetch cycle. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDataset {
    pub client_records: Vec<ClientRecord>,
    pub period_aggregates: Vec<PeriodAggregate>,
    pub current_period_total: f64,
    pub source: DataSource,
}

impl DashboardDataset {
    /// The loading-state dataset shown before the first fetch resolves.
    pub fn empty() -> Self {
        Self {
            client_records: Vec::new(),
            period_aggregates: Vec::new(),
            current_period_total: 0.0,
            source: DataSource::Empty,
        }
    }

    pub fn from_extraction(ex: Extraction) -> Self {
        Self {
            client_records: ex.client_records,
            period_aggregates: ex.period_aggregates,
            current_period_total: ex.current_total,
            source: DataSource::Sheet,
        }
    }

    /// Sample data served whenever the sheet can't be read.
    pub fn fallback() -> Self {
        FALLBACK.clone()
    }

    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

static FALLBACK: Lazy<DashboardDataset> = Lazy::new(|| {
    let period = PeriodKey::new(5, 2025).expect("05/2025 is a valid period");
    let client = |name: &str, contracted: f64, worked: f64| ClientRecord {
        client_name: name.to_string(),
        contracted_hours: contracted,
        worked_hours: worked,
        period,
    };
    let month = |label: &str, total: f64| PeriodAggregate {
        period_label: label.to_string(),
        total_hours: total,
    };

    DashboardDataset {
        client_records: vec![
            client("VKS3", 30.0, 5.0),
            client("SDK5", 60.0, 10.0),
            client("ISS5", 30.0, 20.0),
            client("CEE5", 60.0, 16.01),
            client("ASR6", 30.0, 3.0),
        ],
        period_aggregates: vec![
            month("mai/25", 122.01),
            month("jun/25", 0.0),
            month("jul/25", 0.0),
            month("ago/25", 0.0),
            month("set/25", 0.0),
        ],
        current_period_total: 122.01,
        source: DataSource::Fallback,
    }
});
