use anyhow::Context;
use drop_uploader::app::FileImporter;
use drop_uploader::broker::{CredentialBroker, HttpBroker, S3Broker};
use drop_uploader::config::{AppConfig, BrokerConfig};
use drop_uploader::upload::{HttpTransfer, UploadSession};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drop_uploader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting File Import Service");

    let config = AppConfig::from_env().context("invalid configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let broker: Arc<dyn CredentialBroker> = match &config.broker {
        BrokerConfig::S3(s3) => {
            Arc::new(runtime.block_on(S3Broker::from_config(s3, config.presign_expiry)))
        }
        BrokerConfig::Remote { url } => {
            info!("Using remote broker at {}", url);
            Arc::new(HttpBroker::new(url.clone()))
        }
    };

    let session = UploadSession::new(
        broker,
        Arc::new(HttpTransfer::default()),
        runtime.handle().clone(),
        config.reset_delay,
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 560.0])
            .with_min_inner_size([420.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "File Import Service",
        options,
        Box::new(move |cc| Box::new(FileImporter::new(cc, session))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run window: {}", e))?;

    Ok(())
}
