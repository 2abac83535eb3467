use anyhow::{Context, Result};
use hourboard::{report, Dashboard, Settings, SheetFetcher};
use reqwest::Client;
use std::{env, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    // ─── 2) wire up fetcher + dashboard ──────────────────────────────
    let client = Client::builder()
        .build()
        .context("building HTTP client")?;
    let settings = Settings::default();
    info!(endpoint = %settings.endpoint, interval = ?settings.refresh_interval, "configured");
    let dashboard = Arc::new(Dashboard::new(SheetFetcher::new(client, settings)));

    // ─── 3) print a report whenever a new dataset lands ──────────────
    let mut rx = dashboard.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let ds = rx.borrow_and_update().clone();
            println!("{}", report::render(&ds));
        }
    });

    // ─── 4) manual refresh: press Enter ──────────────────────────────
    let manual = tokio::spawn({
        let dashboard = Arc::clone(&dashboard);
        async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(_)) = lines.next_line().await {
                info!("manual refresh");
                // not awaited by the loop; overlapping fetches race
                let dashboard = Arc::clone(&dashboard);
                tokio::spawn(async move {
                    dashboard.refresh().await;
                });
            }
        }
    });

    // ─── 5) scheduled refresh until ctrl-c ───────────────────────────
    dashboard
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    manual.abort();
    printer.abort();
    info!("all done");
    Ok(())
}
