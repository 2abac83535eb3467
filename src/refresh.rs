// src/refresh.rs

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument};

use crate::dataset::DashboardDataset;
use crate::fetch::SheetFetcher;
use crate::notify::Notice;

/// Latest dataset plus the fetcher that produces it.
///
/// Every refresh publishes a whole new dataset. Overlapping refreshes are not
/// coordinated: whichever resolves last is what subscribers see.
pub struct Dashboard {
    fetcher: SheetFetcher,
    tx: watch::Sender<Arc<DashboardDataset>>,
}

impl Dashboard {
    pub fn new(fetcher: SheetFetcher) -> Self {
        let (tx, _) = watch::channel(Arc::new(DashboardDataset::empty()));
        Self { fetcher, tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardDataset>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Arc<DashboardDataset> {
        self.tx.borrow().clone()
    }

    /// Fetch once and publish the result.
    pub async fn refresh(&self) -> Arc<DashboardDataset> {
        let ds = Arc::new(self.fetcher.fetch_dashboard_data().await);
        self.tx.send_replace(ds.clone());
        ds
    }

    /// Refresh now and then on every interval tick until `shutdown` resolves.
    #[instrument(level = "info", skip_all)]
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let every = self.fetcher.settings().refresh_interval;
        self.fetcher.notifier().notify(
            Notice::info("Conectando à planilha do Google Sheets...")
                .with_detail("Os dados são atualizados automaticamente."),
        );
        info!(interval_secs = every.as_secs(), "refresh loop started");

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("refresh loop stopping");
                    break;
                }
                // first tick fires immediately
                _ = ticker.tick() => {
                    self.refresh().await;
                }
            }
        }
    }
}
