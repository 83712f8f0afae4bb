//! Mapping from hub records to metric samples.

use hub6_client::{
    CableModem, Downstream, DownstreamChannel, ServiceFlow, ServiceFlows, State, Upstream,
    UpstreamChannel,
};

use crate::descriptors::Metric;

/// One metric value with its label pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric: Metric,
    /// `(name, value)` pairs in the metric's label order.
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl Sample {
    /// Create a sample, pairing `values` with the metric's label names.
    pub fn new(metric: Metric, values: &[String], value: f64) -> Self {
        let labels = metric
            .label_names()
            .iter()
            .copied()
            .zip(values.iter().cloned())
            .collect();

        Self {
            metric,
            labels,
            value,
        }
    }

    /// Value of the label called `name`, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Convert a boolean to a gauge value.
pub fn bool_gauge(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// The `*_up` sample for one resource.
pub fn up_sample(metric: Metric, up: bool) -> Sample {
    Sample::new(metric, &[], bool_gauge(up))
}

fn downstream_labels(c: &DownstreamChannel) -> [String; 3] {
    [
        c.channel_id.to_string(),
        c.channel_type.clone(),
        c.modulation.clone(),
    ]
}

fn upstream_labels(c: &UpstreamChannel) -> [String; 3] {
    [
        c.channel_id.to_string(),
        c.channel_type.clone(),
        c.modulation.clone(),
    ]
}

fn service_flow_labels(s: &ServiceFlow) -> [String; 3] {
    [
        s.service_flow_id.to_string(),
        s.direction.clone(),
        s.schedule_type.clone(),
    ]
}

/// Seven samples per downstream channel.
pub fn map_downstream(ds: &Downstream, out: &mut Vec<Sample>) {
    for c in &ds.downstream.channels {
        let labels = downstream_labels(c);
        out.push(Sample::new(Metric::DownstreamPower, &labels, c.power));
        out.push(Sample::new(Metric::DownstreamSnr, &labels, c.snr));
        out.push(Sample::new(Metric::DownstreamRxMer, &labels, c.rx_mer));
        out.push(Sample::new(
            Metric::DownstreamCorrectedErrors,
            &labels,
            c.corrected_errors as f64,
        ));
        out.push(Sample::new(
            Metric::DownstreamUncorrectedErrors,
            &labels,
            c.uncorrected_errors as f64,
        ));
        out.push(Sample::new(
            Metric::DownstreamLockStatus,
            &labels,
            bool_gauge(c.lock_status),
        ));
        out.push(Sample::new(
            Metric::DownstreamFrequency,
            &labels,
            c.frequency as f64,
        ));
    }
}

/// Eight samples per upstream channel.
pub fn map_upstream(us: &Upstream, out: &mut Vec<Sample>) {
    for c in &us.upstream.channels {
        let labels = upstream_labels(c);
        out.push(Sample::new(Metric::UpstreamPower, &labels, c.power));
        out.push(Sample::new(
            Metric::UpstreamSymbolRate,
            &labels,
            c.symbol_rate as f64,
        ));
        out.push(Sample::new(
            Metric::UpstreamLockStatus,
            &labels,
            bool_gauge(c.lock_status),
        ));
        out.push(Sample::new(
            Metric::UpstreamFrequency,
            &labels,
            c.frequency as f64,
        ));
        out.push(Sample::new(
            Metric::UpstreamT1Timeouts,
            &labels,
            c.t1_timeout as f64,
        ));
        out.push(Sample::new(
            Metric::UpstreamT2Timeouts,
            &labels,
            c.t2_timeout as f64,
        ));
        out.push(Sample::new(
            Metric::UpstreamT3Timeouts,
            &labels,
            c.t3_timeout as f64,
        ));
        out.push(Sample::new(
            Metric::UpstreamT4Timeouts,
            &labels,
            c.t4_timeout as f64,
        ));
    }
}

/// Four samples per service flow.
pub fn map_service_flows(sf: &ServiceFlows, out: &mut Vec<Sample>) {
    for s in &sf.service_flows.flows {
        let labels = service_flow_labels(s);
        out.push(Sample::new(
            Metric::ServiceFlowMaxTrafficRate,
            &labels,
            s.max_traffic_rate as f64,
        ));
        out.push(Sample::new(
            Metric::ServiceFlowMaxTrafficBurst,
            &labels,
            s.max_traffic_burst as f64,
        ));
        out.push(Sample::new(
            Metric::ServiceFlowMinReservedRate,
            &labels,
            s.min_reserved_rate as f64,
        ));
        out.push(Sample::new(
            Metric::ServiceFlowMaxConcatenatedBurst,
            &labels,
            s.max_concatenated_burst as f64,
        ));
    }
}

/// Six samples for the modem state.
pub fn map_state(st: &State, out: &mut Vec<Sample>) {
    let cm: &CableModem = &st.cable_modem;

    out.push(Sample::new(
        Metric::Info,
        &[
            cm.boot_filename.clone(),
            cm.docsis_version.clone(),
            cm.mac_address.clone(),
            cm.serial_number.clone(),
        ],
        1.0,
    ));
    out.push(Sample::new(Metric::Status, &[cm.status.clone()], 1.0));
    out.push(Sample::new(Metric::UptimeSeconds, &[], cm.up_time as f64));
    out.push(Sample::new(
        Metric::AccessAllowed,
        &[],
        bool_gauge(cm.access_allowed),
    ));
    out.push(Sample::new(Metric::MaxCpes, &[], cm.max_cpes as f64));
    out.push(Sample::new(
        Metric::BaselinePrivacyEnabled,
        &[],
        bool_gauge(cm.baseline_privacy_enabled),
    ));
}
