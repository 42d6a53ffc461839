use siata_pm25::aws::{load_sdk_config, CloudWatchSink, S3Store};
use siata_pm25::config::Config;
use siata_pm25::pipeline::Pipeline;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Credentials may come from a local .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,siata_pm25=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("SIATA PM2.5 ingestion starting...");

    let config = Config::default();
    let sdk_config = load_sdk_config(&config.storage.region).await;
    let store = S3Store::new(aws_sdk_s3::Client::new(&sdk_config), &config.storage);
    let sink = CloudWatchSink::new(aws_sdk_cloudwatch::Client::new(&sdk_config));

    let pipeline = Pipeline::new(config, store, sink)
        .map_err(|e| anyhow::anyhow!("Failed to initialize pipeline: {}", e))?;

    match pipeline.run().await {
        Ok(outcome) => {
            info!("SIATA PM2.5 ingestion finished: {:?}", outcome);
            Ok(())
        }
        Err(e) => {
            error!("SIATA PM2.5 ingestion failed: {}", e);
            Err(e.into())
        }
    }
}
