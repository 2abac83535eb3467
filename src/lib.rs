pub mod config;
pub mod dataset;
pub mod duration;
pub mod fetch;
pub mod notify;
pub mod period;
pub mod refresh;
pub mod report;
pub mod sheet;
pub mod view;

pub use config::Settings;
pub use dataset::{ClientRecord, DashboardDataset, DataSource, PeriodAggregate};
pub use fetch::SheetFetcher;
pub use period::{Clock, PeriodKey, SystemClock};
pub use refresh::Dashboard;
