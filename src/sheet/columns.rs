// src/sheet/columns.rs
//
// Column roles in the hours spreadsheet are positional. Every offset the
// extractor relies on lives here.

use crate::period::PeriodKey;

/// Client name; a row is a client row iff this cell is filled.
pub const CLIENT_NAME: usize = 0;
/// Contracted hours for the client.
pub const CONTRACTED_HOURS: usize = 1;
/// Period label, read from the formatted string (the raw value is a date serial).
pub const PERIOD_LABEL: usize = 13;
/// Total hours for the period on the same row.
pub const PERIOD_TOTAL: usize = 14;

/// The worked-hours column advances one per calendar month: two less than the
/// 1-based month number. `None` for January, which has no column.
pub fn worked_hours(period: &PeriodKey) -> Option<usize> {
    let zero_based = period.month() as usize - 1;
    zero_based.checked_sub(1)
}
