// src/config.rs

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Sheet backing the dashboard.
pub const SHEET_ID: &str = "1WBqEJ7xyV93onTr2mqSYpNPU-2uZ5-88k_GXPa3CE_0";

/// How often the dashboard re-reads the sheet.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Fixed runtime settings. The binary always uses [`Settings::default`];
/// tests point `endpoint` at a local server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Url,
    pub refresh_interval: Duration,
}

impl Settings {
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint).with_context(|| format!("parsing {}", endpoint))?,
            ..Self::default()
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: sheet_query_url(SHEET_ID),
            refresh_interval: REFRESH_INTERVAL,
        }
    }
}

/// `gviz/tq` JSON query URL for `sheet_id`.
pub fn sheet_query_url(sheet_id: &str) -> Url {
    let mut url = Url::parse("https://docs.google.com/spreadsheets/d/")
        .expect("base spreadsheet URL should parse");
    url.path_segments_mut()
        .expect("https URL has path segments")
        .pop_if_empty()
        .extend([sheet_id, "gviz", "tq"]);
    url.query_pairs_mut().append_pair("tqx", "out:json");
    url
}
