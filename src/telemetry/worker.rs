//! Background delivery loop for usage record batches.

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use reqwest::Client;

use crate::models::UsageRecord;
use crate::settings::{SettingsStore, TelemetrySettings};

/// Spawns the delivery worker.
///
/// The worker owns a current-thread tokio runtime and blocks on the batch
/// channel; it exits once every sender handle is dropped and the queue is
/// drained.
pub(super) fn spawn(
    settings: Arc<SettingsStore>,
    host: Option<String>,
    batch_rx: mpsc::Receiver<Vec<UsageRecord>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                log::error!("telemetry runtime failed to start: {err}");
                return;
            }
        };

        while let Ok(mut batch) = batch_rx.recv() {
            let config = settings.telemetry();
            let destination = host.clone().unwrap_or_else(|| config.url.clone());

            match runtime.block_on(deliver(&destination, &config, &mut batch)) {
                Ok(()) => log::info!("communication was successful"),
                Err(err) => {
                    log::error!("communication to the host ({destination}) failed: {err:#}");
                }
            }
        }
    })
}

/// Stamps the resolved identity on every record and POSTs the batch.
///
/// Only the status code of the response is inspected.
async fn deliver(
    destination: &str,
    config: &TelemetrySettings,
    batch: &mut [UsageRecord],
) -> Result<()> {
    for record in batch.iter_mut() {
        record.user_id = config.email.clone();
    }

    let body = serde_json::to_string(&batch).context("encoding batch")?;
    let client = build_client(config)?;

    let response = client
        .post(destination)
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .context("request dispatch failed")?;

    let status = response.status();
    if status == reqwest::StatusCode::OK {
        Ok(())
    } else {
        Err(anyhow!("status {status}"))
    }
}

fn build_client(config: &TelemetrySettings) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(proxy_url) = config.http_proxy.as_deref().filter(|url| !url.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url).context("invalid proxy url")?);
        // Verification can only be relaxed on proxied connections; the
        // strict flag keeps it on even there.
        if !config.proxy_strict_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }
    }
    builder.build().context("building http client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_without_a_proxy() {
        build_client(&TelemetrySettings::default()).unwrap();
    }

    #[test]
    fn client_builds_with_a_proxy_and_strict_tls() {
        build_client(&TelemetrySettings {
            http_proxy: Some("http://proxy.example:8080".into()),
            proxy_strict_ssl: true,
            ..TelemetrySettings::default()
        })
        .unwrap();
    }

    #[test]
    fn malformed_proxy_url_is_an_error() {
        let result = build_client(&TelemetrySettings {
            http_proxy: Some("::not a url::".into()),
            ..TelemetrySettings::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn empty_proxy_setting_is_treated_as_unset() {
        build_client(&TelemetrySettings {
            http_proxy: Some(String::new()),
            ..TelemetrySettings::default()
        })
        .unwrap();
    }
}
