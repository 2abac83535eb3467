// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::Settings;
use crate::dataset::DashboardDataset;
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::period::{Clock, SystemClock};
use crate::sheet::{extract, parse_envelope, CurrentPeriod};

/// Reads the hours sheet and turns it into a [`DashboardDataset`].
///
/// Holds no schedule state; callers decide when to fetch. Cheap to clone.
#[derive(Clone)]
pub struct SheetFetcher {
    client: Client,
    settings: Settings,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl SheetFetcher {
    pub fn new(client: Client, settings: Settings) -> Self {
        Self {
            client,
            settings,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// One fetch cycle. Never fails: any problem is logged, reported through
    /// the notifier, and answered with [`DashboardDataset::fallback`].
    #[instrument(level = "info", skip(self), fields(endpoint = %self.settings.endpoint))]
    pub async fn fetch_dashboard_data(&self) -> DashboardDataset {
        match self.try_fetch().await {
            Ok(ds) => {
                info!(
                    clients = ds.client_records.len(),
                    periods = ds.period_aggregates.len(),
                    current_total = ds.current_period_total,
                    "sheet loaded"
                );
                self.notifier
                    .notify(Notice::success("Dados carregados com sucesso"));
                ds
            }
            Err(e) => {
                error!(error = ?e, "sheet fetch failed, serving fallback data");
                self.notifier.notify(
                    Notice::error("Erro ao carregar dados da planilha").with_detail(format!("{:#}", e)),
                );
                DashboardDataset::fallback()
            }
        }
    }

    async fn try_fetch(&self) -> Result<DashboardDataset> {
        let body = get_text(&self.client, &self.settings.endpoint).await?;
        let table = parse_envelope(&body)
            .with_context(|| format!("unwrapping response from {}", self.settings.endpoint))?;
        let period = CurrentPeriod::from_clock(self.clock.as_ref());
        debug!(rows = table.rows.len(), period = %period.key, "payload decoded");
        Ok(DashboardDataset::from_extraction(extract(&table, &period)))
    }
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}
