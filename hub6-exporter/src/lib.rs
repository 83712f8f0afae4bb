//! Prometheus exporter for the Virgin Media Hub 6 cable modem.
//!
//! On every scrape the exporter reads the hub's four REST resources and
//! translates them into gauges.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │   Hub 6 REST    │────>│  HubCollector   │────>│   HTTP Server   │
//! │ (/rest/v1/...)  │     │ (per scrape)    │     │ (/metrics,      │
//! └─────────────────┘     └─────────────────┘     │  /probe)        │
//!                                                 └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```bash
//! virginmedia_hub6_exporter server --address 192.168.100.1 --port 9188
//! ```
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod collector;
pub mod config;
pub mod descriptors;
pub mod http;
pub mod mapping;

pub use collector::{HubCollector, render};
pub use config::ExporterConfig;
pub use descriptors::{Descriptor, DescriptorTable, METRIC_PREFIX, Metric, MetricType};
pub use http::{AppState, HttpServer, create_router};
pub use mapping::Sample;
