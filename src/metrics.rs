use crate::config::MetricsConfig;
use crate::error::Result;
use crate::models::{MetricPoint, Station};
use crate::sanitize::ascii_name;
use async_trait::async_trait;
use tracing::info;

/// Time-series backend accepting a whole batch of points per call.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    async fn put_metric_data(&self, namespace: &str, points: Vec<MetricPoint>) -> Result<()>;
}

#[async_trait]
impl<T: MetricsSink + ?Sized> MetricsSink for std::sync::Arc<T> {
    async fn put_metric_data(&self, namespace: &str, points: Vec<MetricPoint>) -> Result<()> {
        (**self).put_metric_data(namespace, points).await
    }
}

pub struct MetricsReporter<M: MetricsSink> {
    sink: M,
    settings: MetricsConfig,
}

impl<M: MetricsSink> MetricsReporter<M> {
    pub fn new(sink: M, settings: MetricsConfig) -> Self {
        Self { sink, settings }
    }

    /// One point per station: negative readings clamped to zero, name made ASCII.
    pub fn metric_points(&self, stations: &[Station]) -> Vec<MetricPoint> {
        stations
            .iter()
            .map(|station| MetricPoint {
                metric_name: self.settings.metric_name.clone(),
                unit: self.settings.unit.clone(),
                dimension_name: self.settings.dimension_name.clone(),
                dimension_value: ascii_name(&station.name),
                value: station.value.max(0.0),
            })
            .collect()
    }

    pub async fn report(&self, stations: &[Station]) -> Result<()> {
        let points = self.metric_points(stations);
        info!(
            "Reporting {} {} points to {}",
            points.len(),
            self.settings.metric_name,
            self.settings.namespace
        );
        self.sink
            .put_metric_data(&self.settings.namespace, points)
            .await
    }
}
