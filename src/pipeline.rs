use crate::config::Config;
use crate::error::{AppError, Result};
use crate::fetcher::Fetcher;
use crate::metrics::{MetricsReporter, MetricsSink};
use crate::models::PublishedDataset;
use crate::parser::Parser;
use crate::publisher::{ObjectStore, Publisher};
use tracing::{debug, error, info, warn};

/// Result of one clean attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published { stations: usize },
    /// Upstream answered with no records; nothing was overwritten.
    EmptyFeed,
}

/// fetch → normalize → publish → report, retried as a whole.
pub struct Pipeline<S: ObjectStore, M: MetricsSink> {
    config: Config,
    fetcher: Fetcher,
    publisher: Publisher<S>,
    reporter: MetricsReporter<M>,
}

impl<S: ObjectStore, M: MetricsSink> Pipeline<S, M> {
    pub fn new(config: Config, store: S, sink: M) -> Result<Self> {
        config.validate()?;

        let fetcher = Fetcher::new(&config.source)?;
        let publisher = Publisher::new(store, &config.storage);
        let reporter = MetricsReporter::new(sink, config.metrics.clone());

        Ok(Self {
            config,
            fetcher,
            publisher,
            reporter,
        })
    }

    /// Run up to `retry.max_attempts` attempts back to back, stopping at the
    /// first clean one. Attempt errors are logged, never aggregated.
    pub async fn run(&self) -> Result<Outcome> {
        let max_attempts = self.config.retry.max_attempts;

        for attempt in 1..=max_attempts {
            info!("[{}/{}] Fetching data", attempt, max_attempts);

            match self.run_attempt().await {
                Ok(outcome) => {
                    info!("[{}/{}] Attempt succeeded: {:?}", attempt, max_attempts, outcome);
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!("[{}/{}] Attempt failed: {}", attempt, max_attempts, e);
                }
            }
        }

        error!("Giving up after {} attempts", max_attempts);
        Err(AppError::Exhausted {
            attempts: max_attempts,
        })
    }

    /// A single pass, short-circuiting on the first error.
    pub async fn run_attempt(&self) -> Result<Outcome> {
        let body = self.fetcher.fetch().await?;

        info!("Parsing map data");
        let items = Parser::decode_items(&body)?;
        info!("Got {} items", items.len());

        if items.is_empty() {
            // TODO: decide with product whether an empty feed should alert instead of passing silently
            warn!("Upstream returned no stations, keeping previously published data");
            debug!("Upstream body: {}", String::from_utf8_lossy(&body));
            return Ok(Outcome::EmptyFeed);
        }

        let stations = Parser::normalize_all(&items)?;
        let dataset = PublishedDataset::generated_now(&self.config.source.time_zone, stations);

        self.publisher.publish(&dataset).await?;
        self.reporter.report(&dataset.stations).await?;

        Ok(Outcome::Published {
            stations: dataset.stations.len(),
        })
    }
}
