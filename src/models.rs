use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single measurement station, normalized from the upstream map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub description: String,
    /// Provider-native free-text timestamp, passed through untouched.
    pub updated_at: String,
    pub value: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// The document published to storage on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedDataset {
    pub generated_at: String,
    pub stations: Vec<Station>,
}

impl PublishedDataset {
    pub fn new(generated_at: String, stations: Vec<Station>) -> Self {
        Self {
            generated_at,
            stations,
        }
    }

    /// Build a dataset stamped with the current time in `tz`.
    pub fn generated_now<Tz: TimeZone>(tz: &Tz, stations: Vec<Station>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::new(format_generated_at(Utc::now(), tz), stations)
    }
}

/// Formats like `Jan _2 15:04:05`: abbreviated month, space-padded day, no year.
pub fn format_generated_at<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.with_timezone(tz).format("%b %e %H:%M:%S").to_string()
}

/// One datum sent to the metrics backend. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub metric_name: String,
    pub unit: String,
    pub dimension_name: String,
    pub dimension_value: String,
    pub value: f64,
}
