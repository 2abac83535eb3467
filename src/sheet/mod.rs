pub mod columns;
pub mod envelope;
pub mod extract;
pub mod types;

pub use envelope::{parse_envelope, strip_envelope};
pub use extract::{extract, CurrentPeriod, Extraction};
pub use types::{Cell, RawTable, Row};
