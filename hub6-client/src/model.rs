//! Records returned by the hub's `/rest/v1/cablemodem` resources.
//!
//! Each top-level type mirrors one JSON document and implements
//! [`Resource`], which ties it to the path it is fetched from.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A JSON document served by the hub at a fixed path.
pub trait Resource: DeserializeOwned {
    /// Short name used in logs and `*_up` metric names.
    const NAME: &'static str;

    /// Path relative to the hub address.
    const PATH: &'static str;
}

/// One downstream RF channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamChannel {
    pub channel_id: u64,
    /// `sc_qam` (DOCSIS 3.0) or `ofdm` (DOCSIS 3.1).
    pub channel_type: String,
    /// Hz.
    pub frequency: i64,
    /// dBmV.
    pub power: f64,
    pub modulation: String,
    /// dB.
    pub snr: f64,
    /// dB.
    pub rx_mer: f64,
    /// Pre-RS errors.
    pub corrected_errors: i64,
    /// Post-RS errors.
    pub uncorrected_errors: i64,
    pub lock_status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownstreamChannels {
    pub channels: Vec<DownstreamChannel>,
}

/// `GET /rest/v1/cablemodem/downstream`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Downstream {
    pub downstream: DownstreamChannels,
}

impl Resource for Downstream {
    const NAME: &'static str = "downstream";
    const PATH: &'static str = "/rest/v1/cablemodem/downstream";
}

/// One upstream RF channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamChannel {
    pub channel_id: u64,
    pub channel_type: String,
    /// Hz.
    pub frequency: i64,
    /// dBmV.
    pub power: f64,
    /// ksps.
    pub symbol_rate: i64,
    pub modulation: String,
    pub lock_status: bool,
    pub t1_timeout: i64,
    pub t2_timeout: i64,
    pub t3_timeout: i64,
    pub t4_timeout: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamChannels {
    pub channels: Vec<UpstreamChannel>,
}

/// `GET /rest/v1/cablemodem/upstream`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upstream {
    pub upstream: UpstreamChannels,
}

impl Resource for Upstream {
    const NAME: &'static str = "upstream";
    const PATH: &'static str = "/rest/v1/cablemodem/upstream";
}

/// One DOCSIS QoS service flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFlow {
    pub service_flow_id: u64,
    pub direction: String,
    /// bps.
    pub max_traffic_rate: i64,
    /// Bytes.
    pub max_traffic_burst: i64,
    /// bps.
    pub min_reserved_rate: i64,
    /// Bytes.
    pub max_concatenated_burst: i64,
    pub schedule_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFlowList {
    #[serde(rename = "serviceFlow")]
    pub flows: Vec<ServiceFlow>,
}

/// `GET /rest/v1/cablemodem/serviceflows`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFlows {
    #[serde(rename = "serviceFlows")]
    pub service_flows: ServiceFlowList,
}

impl Resource for ServiceFlows {
    const NAME: &'static str = "serviceflows";
    const PATH: &'static str = "/rest/v1/cablemodem/serviceflows";
}

/// Device-wide identity and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CableModem {
    /// DOCSIS config file.
    pub boot_filename: String,
    pub docsis_version: String,
    pub mac_address: String,
    pub serial_number: String,
    /// Seconds.
    pub up_time: i64,
    /// Network access.
    pub access_allowed: bool,
    pub status: String,
    #[serde(rename = "maxCPEs")]
    pub max_cpes: i64,
    pub baseline_privacy_enabled: bool,
}

/// `GET /rest/v1/cablemodem/state_`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "cablemodem", alias = "cableModem")]
    pub cable_modem: CableModem,
}

impl Resource for State {
    const NAME: &'static str = "state";
    const PATH: &'static str = "/rest/v1/cablemodem/state_";
}
