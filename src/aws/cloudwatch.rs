use crate::error::{AppError, Result};
use crate::metrics::MetricsSink;
use crate::models::MetricPoint;
use async_trait::async_trait;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use aws_sdk_cloudwatch::Client;
use tracing::debug;

#[derive(Clone)]
pub struct CloudWatchSink {
    client: Client,
}

impl CloudWatchSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn to_datum(point: MetricPoint) -> MetricDatum {
    let dimension = Dimension::builder()
        .name(point.dimension_name)
        .value(point.dimension_value)
        .build();

    MetricDatum::builder()
        .metric_name(point.metric_name)
        .unit(StandardUnit::from(point.unit.as_str()))
        .value(point.value)
        .dimensions(dimension)
        .build()
}

#[async_trait]
impl MetricsSink for CloudWatchSink {
    async fn put_metric_data(&self, namespace: &str, points: Vec<MetricPoint>) -> Result<()> {
        debug!("PutMetricData {} ({} points)", namespace, points.len());

        let data: Vec<MetricDatum> = points.into_iter().map(to_datum).collect();

        self.client
            .put_metric_data()
            .namespace(namespace)
            .set_metric_data(Some(data))
            .send()
            .await
            .map_err(|e| {
                AppError::Report(format!(
                    "cloudwatch put_metric_data {}: {}",
                    namespace,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}
