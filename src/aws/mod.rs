//! AWS-backed implementations of the storage and metrics seams.

pub mod cloudwatch;
pub mod s3;

pub use cloudwatch::CloudWatchSink;
pub use s3::S3Store;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Resolve ambient credentials for the configured region.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
