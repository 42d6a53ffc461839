pub mod aws;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod publisher;
pub mod sanitize;
