use crate::config::Config;
use crate::dates::{date_to_timestamp_ms, format_time, timestamp_ms_to_date};
use crate::exchanges::Exchange;
use crate::models::{ChunkWindow, Record};
use crate::storage::{save_records_to_csv, unique_filename};
use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

/// Splits `[start_ms, end_ms)` into consecutive windows of `chunk_ms`, the
/// last one clipped to `end_ms`. The stride is fixed, so windows never
/// depend on what a previous request returned.
pub fn chunk_windows(start_ms: i64, end_ms: i64, chunk_ms: i64) -> Vec<ChunkWindow> {
    let mut windows = Vec::new();
    if chunk_ms <= 0 {
        return windows;
    }

    let mut current = start_ms;
    while current < end_ms {
        windows.push(ChunkWindow {
            start_ms: current,
            end_ms: current.saturating_add(chunk_ms).min(end_ms),
        });
        current = current.saturating_add(chunk_ms);
    }
    windows
}

fn window_label(ms: i64) -> String {
    timestamp_ms_to_date(ms).unwrap_or_else(|_| ms.to_string())
}

/// Fetches every chunk of the range in order, pausing `delay` after each
/// request. Failed chunks are logged and contribute no records.
pub async fn fetch_in_chunks(
    exchange: &dyn Exchange,
    instrument: &str,
    start_ms: i64,
    end_ms: i64,
    chunk_ms: i64,
    delay: Duration,
) -> Vec<Record> {
    let mut all = Vec::new();

    for window in chunk_windows(start_ms, end_ms, chunk_ms) {
        tracing::info!(
            "Fetching chunk: {} to {}...",
            window_label(window.start_ms),
            window_label(window.end_ms)
        );

        match exchange
            .fetch_funding_rate_history(instrument, window.start_ms, window.end_ms)
            .await
        {
            Ok(records) if !records.is_empty() => {
                tracing::info!("  + Retrieved {} records for this chunk.", records.len());
                all.extend(records);
            }
            Ok(_) => tracing::warn!("  - No records returned for this chunk."),
            Err(e) => tracing::warn!("  - [{}] Failed to retrieve chunk: {}", exchange.name(), e),
        }

        tokio::time::sleep(delay).await;
    }

    all
}

/// Runs one end-to-end download and returns the written CSV path, or
/// `None` when no records came back.
pub async fn download_historical_data(
    config: &Config,
    exchange: &dyn Exchange,
) -> anyhow::Result<Option<PathBuf>> {
    tracing::info!("--- Starting Deribit Data Download ---");
    tracing::info!("Instrument: {}", config.instrument);
    tracing::info!("Date Range: {} to {}", config.start_date, config.end_date);

    let start_ms = date_to_timestamp_ms(&config.start_date).context("invalid START_DATE")?;
    let end_ms = date_to_timestamp_ms(&config.end_date).context("invalid END_DATE")?;
    tracing::debug!(
        "Query range: {} to {} in {}-day chunks",
        format_time(start_ms),
        format_time(end_ms),
        config.chunk_size_days
    );

    let records = fetch_in_chunks(
        exchange,
        &config.instrument,
        start_ms,
        end_ms,
        config.chunk_size_ms(),
        config.sleep_interval,
    )
    .await;

    if records.is_empty() {
        tracing::warn!("No data was downloaded. Check parameters and API status.");
        tracing::info!("--- Download Process Finished ---");
        return Ok(None);
    }

    tracing::info!("Total records downloaded: {}", records.len());

    let filename = unique_filename(
        &config.instrument,
        &config.data_type,
        &config.start_date,
        &config.end_date,
        chrono::Local::now().naive_local(),
    );
    let path = config.output_dir.join(filename);

    save_records_to_csv(&records, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("--- Download Process Finished ---");
    Ok(Some(path))
}
