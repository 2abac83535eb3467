// src/sheet/extract.rs

use tracing::debug;

use super::columns;
use super::types::{RawTable, Row};
use crate::dataset::{ClientRecord, PeriodAggregate};
use crate::duration::{parse_decimal, parse_duration};
use crate::period::{Clock, PeriodKey};

/// The period extraction runs against, resolved once per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentPeriod {
    pub key: PeriodKey,
    pub abbrev: &'static str,
}

impl CurrentPeriod {
    pub fn new(key: PeriodKey) -> Self {
        Self {
            key,
            abbrev: key.abbrev(),
        }
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(crate::period::current_period_key(clock))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub client_records: Vec<ClientRecord>,
    pub period_aggregates: Vec<PeriodAggregate>,
    /// Total of the last aggregate whose label names the current month.
    pub current_total: f64,
}

/// Turn the raw sheet into client and period records.
///
/// Two independent passes over the same rows: a row can be a client row, an
/// aggregate row, both, or neither. Cell problems degrade to zero.
pub fn extract(table: &RawTable, period: &CurrentPeriod) -> Extraction {
    let worked_col = columns::worked_hours(&period.key);

    let client_records: Vec<ClientRecord> = table
        .rows
        .iter()
        .filter_map(|row| client_record(row, worked_col, period.key))
        .collect();

    let mut period_aggregates = Vec::new();
    let mut current_total = 0.0;
    for row in &table.rows {
        if let Some(agg) = period_aggregate(row) {
            // last match wins
            if agg.period_label.contains(period.abbrev) {
                current_total = agg.total_hours;
            }
            period_aggregates.push(agg);
        }
    }

    debug!(
        rows = table.rows.len(),
        clients = client_records.len(),
        periods = period_aggregates.len(),
        worked_col = ?worked_col,
        current_total,
        "extracted sheet"
    );

    Extraction {
        client_records,
        period_aggregates,
        current_total,
    }
}

fn client_record(row: &Row, worked_col: Option<usize>, period: PeriodKey) -> Option<ClientRecord> {
    let client_name = row.filled(columns::CLIENT_NAME)?.text()?;
    if client_name.is_empty() {
        return None;
    }

    let contracted_hours = row
        .cell(columns::CONTRACTED_HOURS)
        .map(|c| parse_decimal(&c.v))
        .unwrap_or(0.0);
    let worked_hours = worked_col
        .and_then(|idx| row.filled(idx))
        .map(|c| parse_duration(&c.v))
        .unwrap_or(0.0);

    Some(ClientRecord {
        client_name,
        contracted_hours,
        worked_hours,
        period,
    })
}

fn period_aggregate(row: &Row) -> Option<PeriodAggregate> {
    let label_cell = row.filled(columns::PERIOD_LABEL)?;
    let total_cell = row.filled(columns::PERIOD_TOTAL)?;
    Some(PeriodAggregate {
        period_label: label_cell.label()?,
        total_hours: parse_duration(&total_cell.v),
    })
}
