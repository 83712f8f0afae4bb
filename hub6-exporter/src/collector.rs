//! Per-scrape collection and Prometheus text rendering.

use std::io::Write;
use std::sync::Arc;

use hub6_client::{FetchError, Hub6Client, Resource};
use tracing::{debug, warn};

use crate::descriptors::{DescriptorTable, Metric};
use crate::mapping::{Sample, map_downstream, map_service_flows, map_state, map_upstream, up_sample};

/// Collects one snapshot of hub metrics per call.
///
/// Holds no state between scrapes; the descriptor table is shared.
#[derive(Debug, Clone)]
pub struct HubCollector {
    client: Hub6Client,
    descriptors: Arc<DescriptorTable>,
}

impl HubCollector {
    /// Create a collector for the hub behind `client`.
    pub fn new(client: Hub6Client, descriptors: Arc<DescriptorTable>) -> Self {
        Self {
            client,
            descriptors,
        }
    }

    /// Shared descriptor table, reused by collectors for other hubs.
    pub fn descriptors(&self) -> Arc<DescriptorTable> {
        Arc::clone(&self.descriptors)
    }

    pub fn address(&self) -> &str {
        self.client.address()
    }

    /// Fetch all four resources and translate them into samples.
    ///
    /// Resources are fetched one after another in a fixed order. A failed
    /// resource contributes only its `*_up` sample with value 0.
    pub async fn collect(&self) -> Vec<Sample> {
        let mut samples = Vec::new();

        let ds = self.client.downstream().await;
        self.emit(ds, Metric::DownstreamUp, map_downstream, &mut samples);

        let us = self.client.upstream().await;
        self.emit(us, Metric::UpstreamUp, map_upstream, &mut samples);

        let sf = self.client.service_flows().await;
        self.emit(sf, Metric::ServiceFlowsUp, map_service_flows, &mut samples);

        let st = self.client.state().await;
        self.emit(st, Metric::StateUp, map_state, &mut samples);

        samples
    }

    /// Collect and render in Prometheus exposition format.
    pub async fn scrape(&self) -> String {
        let samples = self.collect().await;
        render(&self.descriptors, &samples)
    }

    fn emit<R: Resource>(
        &self,
        result: Result<R, FetchError>,
        up: Metric,
        map: fn(&R, &mut Vec<Sample>),
        samples: &mut Vec<Sample>,
    ) {
        match result {
            Ok(record) => {
                samples.push(up_sample(up, true));
                let before = samples.len();
                map(&record, samples);
                debug!(
                    hub = %self.client.address(),
                    resource = R::NAME,
                    samples = samples.len() - before,
                    "Resource collected"
                );
            }
            Err(e) => {
                warn!(
                    hub = %self.client.address(),
                    resource = R::NAME,
                    kind = %e.kind(),
                    error = %e,
                    "Resource fetch failed"
                );
                samples.push(up_sample(up, false));
            }
        }
    }
}

/// Render samples in Prometheus text exposition format (version 0.0.4).
///
/// Families are written in declaration order, each with HELP and TYPE lines,
/// and only when they have at least one sample.
pub fn render(descriptors: &DescriptorTable, samples: &[Sample]) -> String {
    let mut output = Vec::with_capacity(samples.len() * 100);

    for descriptor in descriptors.iter() {
        let mut family = samples
            .iter()
            .filter(|s| s.metric == descriptor.metric)
            .peekable();
        if family.peek().is_none() {
            continue;
        }

        writeln!(output, "# HELP {} {}", descriptor.name, escape_help(descriptor.help)).ok();
        writeln!(output, "# TYPE {} {}", descriptor.name, descriptor.metric_type).ok();

        for sample in family {
            writeln!(
                output,
                "{}{} {}",
                descriptor.name,
                format_labels(&sample.labels),
                format_value(sample.value)
            )
            .ok();
        }
    }

    String::from_utf8(output).unwrap_or_default()
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// HELP text escapes only backslash and newline.
fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format a floating point value for Prometheus.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Format labels for Prometheus exposition format.
fn format_labels(labels: &[(&'static str, String)]) -> String {
    if labels.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect();

    format!("{{{}}}", parts.join(","))
}
