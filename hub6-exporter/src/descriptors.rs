//! Static metric descriptors.
//!
//! Every metric the exporter can emit is declared here, independently of any
//! scrape, so that the full set can be listed before the hub is ever reached.

use std::fmt;

/// Prefix shared by every exported metric name.
pub const METRIC_PREFIX: &str = "virginmedia_hub6";

const CHANNEL_LABELS: &[&str] = &["channel_id", "channel_type", "modulation"];
const SERVICE_FLOW_LABELS: &[&str] = &["serviceflow_id", "direction", "schedule_type"];
const INFO_LABELS: &[&str] = &["boot_filename", "docsis_version", "mac_address", "serial_number"];
const STATUS_LABELS: &[&str] = &["status"];
const NO_LABELS: &[&str] = &[];

/// Prometheus metric type.
///
/// Everything is a snapshot gauge, including the hub's cumulative error and
/// timeout counts: the exporter keeps no state to detect counter resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Gauge,
}

impl MetricType {
    /// Get the TYPE comment string for Prometheus exposition format.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one exported metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    DownstreamPower,
    DownstreamSnr,
    DownstreamRxMer,
    DownstreamCorrectedErrors,
    DownstreamUncorrectedErrors,
    DownstreamLockStatus,
    DownstreamFrequency,

    UpstreamPower,
    UpstreamSymbolRate,
    UpstreamLockStatus,
    UpstreamFrequency,
    UpstreamT1Timeouts,
    UpstreamT2Timeouts,
    UpstreamT3Timeouts,
    UpstreamT4Timeouts,

    ServiceFlowMaxTrafficRate,
    ServiceFlowMaxTrafficBurst,
    ServiceFlowMinReservedRate,
    ServiceFlowMaxConcatenatedBurst,

    Info,
    Status,
    UptimeSeconds,
    AccessAllowed,
    MaxCpes,
    BaselinePrivacyEnabled,

    DownstreamUp,
    UpstreamUp,
    ServiceFlowsUp,
    StateUp,
}

impl Metric {
    /// All metrics in declaration order.
    pub const ALL: [Metric; 29] = [
        Metric::DownstreamPower,
        Metric::DownstreamSnr,
        Metric::DownstreamRxMer,
        Metric::DownstreamCorrectedErrors,
        Metric::DownstreamUncorrectedErrors,
        Metric::DownstreamLockStatus,
        Metric::DownstreamFrequency,
        Metric::UpstreamPower,
        Metric::UpstreamSymbolRate,
        Metric::UpstreamLockStatus,
        Metric::UpstreamFrequency,
        Metric::UpstreamT1Timeouts,
        Metric::UpstreamT2Timeouts,
        Metric::UpstreamT3Timeouts,
        Metric::UpstreamT4Timeouts,
        Metric::ServiceFlowMaxTrafficRate,
        Metric::ServiceFlowMaxTrafficBurst,
        Metric::ServiceFlowMinReservedRate,
        Metric::ServiceFlowMaxConcatenatedBurst,
        Metric::Info,
        Metric::Status,
        Metric::UptimeSeconds,
        Metric::AccessAllowed,
        Metric::MaxCpes,
        Metric::BaselinePrivacyEnabled,
        Metric::DownstreamUp,
        Metric::UpstreamUp,
        Metric::ServiceFlowsUp,
        Metric::StateUp,
    ];

    /// Position in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Metric name without the prefix.
    pub fn suffix(self) -> &'static str {
        match self {
            Metric::DownstreamPower => "downstream_power_dbmv",
            Metric::DownstreamSnr => "downstream_snr_db",
            Metric::DownstreamRxMer => "downstream_rxmer_db",
            Metric::DownstreamCorrectedErrors => "downstream_corrected_errors",
            Metric::DownstreamUncorrectedErrors => "downstream_uncorrected_errors",
            Metric::DownstreamLockStatus => "downstream_lock_status",
            Metric::DownstreamFrequency => "downstream_frequency_hertz",
            Metric::UpstreamPower => "upstream_power_dbmv",
            Metric::UpstreamSymbolRate => "upstream_symbol_rate_ksps",
            Metric::UpstreamLockStatus => "upstream_lock_status",
            Metric::UpstreamFrequency => "upstream_frequency_hertz",
            Metric::UpstreamT1Timeouts => "upstream_t1_timeouts",
            Metric::UpstreamT2Timeouts => "upstream_t2_timeouts",
            Metric::UpstreamT3Timeouts => "upstream_t3_timeouts",
            Metric::UpstreamT4Timeouts => "upstream_t4_timeouts",
            Metric::ServiceFlowMaxTrafficRate => "serviceflow_max_traffic_rate_bps",
            Metric::ServiceFlowMaxTrafficBurst => "serviceflow_max_traffic_burst_bytes",
            Metric::ServiceFlowMinReservedRate => "serviceflow_min_reserved_rate_bps",
            Metric::ServiceFlowMaxConcatenatedBurst => "serviceflow_max_concatenated_burst_bytes",
            Metric::Info => "info",
            Metric::Status => "status",
            Metric::UptimeSeconds => "uptime_seconds",
            Metric::AccessAllowed => "access_allowed",
            Metric::MaxCpes => "max_cpes",
            Metric::BaselinePrivacyEnabled => "baseline_privacy_enabled",
            Metric::DownstreamUp => "downstream_up",
            Metric::UpstreamUp => "upstream_up",
            Metric::ServiceFlowsUp => "serviceflows_up",
            Metric::StateUp => "state_up",
        }
    }

    /// HELP text.
    pub fn help(self) -> &'static str {
        match self {
            Metric::DownstreamPower => "Downstream channel power in dBmV",
            Metric::DownstreamSnr => "Downstream channel SNR in dB",
            Metric::DownstreamRxMer => "Downstream channel RxMER in dB",
            Metric::DownstreamCorrectedErrors => "Downstream channel corrected RS errors",
            Metric::DownstreamUncorrectedErrors => "Downstream channel uncorrected RS errors",
            Metric::DownstreamLockStatus => {
                "Downstream channel lock status (1 = locked, 0 = unlocked)"
            }
            Metric::DownstreamFrequency => "Downstream channel frequency in Hz",
            Metric::UpstreamPower => "Upstream channel power in dBmV",
            Metric::UpstreamSymbolRate => "Upstream channel symbol rate in ksps",
            Metric::UpstreamLockStatus => "Upstream channel lock status (1 = locked, 0 = unlocked)",
            Metric::UpstreamFrequency => "Upstream channel frequency in Hz",
            Metric::UpstreamT1Timeouts => "Upstream channel T1 timeouts",
            Metric::UpstreamT2Timeouts => "Upstream channel T2 timeouts",
            Metric::UpstreamT3Timeouts => "Upstream channel T3 timeouts",
            Metric::UpstreamT4Timeouts => "Upstream channel T4 timeouts",
            Metric::ServiceFlowMaxTrafficRate => "Service flow max traffic rate in bps",
            Metric::ServiceFlowMaxTrafficBurst => "Service flow max traffic burst in bytes",
            Metric::ServiceFlowMinReservedRate => "Service flow min reserved rate in bps",
            Metric::ServiceFlowMaxConcatenatedBurst => {
                "Service flow max concatenated burst in bytes"
            }
            Metric::Info => "Cable modem info labels (value is always 1)",
            Metric::Status => "Cable modem status (value 1 with status label)",
            Metric::UptimeSeconds => "Cable modem uptime in seconds",
            Metric::AccessAllowed => "Cable modem access allowed (1 = allowed, 0 = not allowed)",
            Metric::MaxCpes => "Cable modem maximum CPEs",
            Metric::BaselinePrivacyEnabled => {
                "Cable modem baseline privacy enabled (1 = enabled, 0 = disabled)"
            }
            Metric::DownstreamUp => {
                "Whether the downstream endpoint was scraped successfully (1 = up, 0 = down)"
            }
            Metric::UpstreamUp => {
                "Whether the upstream endpoint was scraped successfully (1 = up, 0 = down)"
            }
            Metric::ServiceFlowsUp => {
                "Whether the serviceflows endpoint was scraped successfully (1 = up, 0 = down)"
            }
            Metric::StateUp => {
                "Whether the state endpoint was scraped successfully (1 = up, 0 = down)"
            }
        }
    }

    /// Label names, in the order label values are supplied.
    pub fn label_names(self) -> &'static [&'static str] {
        match self {
            Metric::DownstreamPower
            | Metric::DownstreamSnr
            | Metric::DownstreamRxMer
            | Metric::DownstreamCorrectedErrors
            | Metric::DownstreamUncorrectedErrors
            | Metric::DownstreamLockStatus
            | Metric::DownstreamFrequency
            | Metric::UpstreamPower
            | Metric::UpstreamSymbolRate
            | Metric::UpstreamLockStatus
            | Metric::UpstreamFrequency
            | Metric::UpstreamT1Timeouts
            | Metric::UpstreamT2Timeouts
            | Metric::UpstreamT3Timeouts
            | Metric::UpstreamT4Timeouts => CHANNEL_LABELS,
            Metric::ServiceFlowMaxTrafficRate
            | Metric::ServiceFlowMaxTrafficBurst
            | Metric::ServiceFlowMinReservedRate
            | Metric::ServiceFlowMaxConcatenatedBurst => SERVICE_FLOW_LABELS,
            Metric::Info => INFO_LABELS,
            Metric::Status => STATUS_LABELS,
            Metric::UptimeSeconds
            | Metric::AccessAllowed
            | Metric::MaxCpes
            | Metric::BaselinePrivacyEnabled
            | Metric::DownstreamUp
            | Metric::UpstreamUp
            | Metric::ServiceFlowsUp
            | Metric::StateUp => NO_LABELS,
        }
    }

    pub fn metric_type(self) -> MetricType {
        MetricType::Gauge
    }
}

/// Full description of one metric family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub metric: Metric,
    /// Prefixed metric name.
    pub name: String,
    pub help: &'static str,
    pub label_names: &'static [&'static str],
    pub metric_type: MetricType,
}

/// Immutable lookup from [`Metric`] to its [`Descriptor`].
///
/// Built once and shared by every collector in the process.
#[derive(Debug, Clone)]
pub struct DescriptorTable {
    descriptors: Vec<Descriptor>,
}

impl DescriptorTable {
    /// Build descriptors for every metric with the given name prefix.
    pub fn new(prefix: &str) -> Self {
        let descriptors = Metric::ALL
            .iter()
            .map(|&metric| Descriptor {
                metric,
                name: build_metric_name(prefix, metric.suffix()),
                help: metric.help(),
                label_names: metric.label_names(),
                metric_type: metric.metric_type(),
            })
            .collect();

        Self { descriptors }
    }

    /// Look up the descriptor for `metric`.
    pub fn get(&self, metric: Metric) -> &Descriptor {
        &self.descriptors[metric.index()]
    }

    /// All descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for DescriptorTable {
    fn default() -> Self {
        Self::new(METRIC_PREFIX)
    }
}

/// Join prefix and suffix with `_`; an empty prefix leaves the suffix alone.
fn build_metric_name(prefix: &str, suffix: &str) -> String {
    if prefix.is_empty() {
        suffix.to_string()
    } else {
        format!("{}_{}", prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_matches_declaration_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i, "{:?} is out of order", metric);
        }
    }

    #[test]
    fn test_table_covers_every_metric() {
        let table = DescriptorTable::default();

        assert_eq!(table.len(), 29);
        for metric in Metric::ALL {
            assert_eq!(table.get(metric).metric, metric);
        }
    }

    #[test]
    fn test_names_are_prefixed_and_unique() {
        let table = DescriptorTable::default();

        let names: HashSet<_> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), table.len());
        assert!(table.iter().all(|d| d.name.starts_with("virginmedia_hub6_")));
        assert_eq!(
            table.get(Metric::DownstreamPower).name,
            "virginmedia_hub6_downstream_power_dbmv"
        );
        assert_eq!(table.get(Metric::StateUp).name, "virginmedia_hub6_state_up");
    }

    #[test]
    fn test_names_are_valid_prometheus_names() {
        let table = DescriptorTable::default();

        for d in table.iter() {
            assert!(!d.name.chars().next().unwrap().is_ascii_digit());
            assert!(
                d.name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "invalid name {}",
                d.name
            );
        }
    }

    #[test]
    fn test_label_schemas() {
        assert_eq!(
            Metric::UpstreamT3Timeouts.label_names(),
            &["channel_id", "channel_type", "modulation"]
        );
        assert_eq!(
            Metric::ServiceFlowMaxTrafficRate.label_names(),
            &["serviceflow_id", "direction", "schedule_type"]
        );
        assert_eq!(Metric::Info.label_names().len(), 4);
        assert_eq!(Metric::Status.label_names(), &["status"]);
        assert!(Metric::UptimeSeconds.label_names().is_empty());
        assert!(Metric::DownstreamUp.label_names().is_empty());
    }

    #[test]
    fn test_empty_prefix() {
        let table = DescriptorTable::new("");
        assert_eq!(table.get(Metric::MaxCpes).name, "max_cpes");
    }

    #[test]
    fn test_all_gauges() {
        let table = DescriptorTable::default();
        assert!(table.iter().all(|d| d.metric_type == MetricType::Gauge));
    }
}
