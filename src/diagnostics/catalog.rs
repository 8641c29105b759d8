//! Static scenario data: dashboard buttons, the commands each one would run
//! on a real radio, and the step lists walked for each category.
//!
//! Nothing here is ever executed. The command strings are shown to the user
//! so the simulated scan reads like the real tooling.

use super::DiagnosticCategory;

/// Step names and display title for one category
pub struct CategoryProfile {
    pub title: &'static str,
    pub steps: &'static [&'static str],
}

const SIGNAL: CategoryProfile = CategoryProfile {
    title: "Signal Quality Analysis",
    steps: &[
        "Scanning wireless interfaces...",
        "Analyzing signal strength...",
        "Measuring noise floor...",
        "Checking channel utilization...",
        "Testing TX retry rates...",
        "Evaluating interference patterns...",
    ],
};

const PERFORMANCE: CategoryProfile = CategoryProfile {
    title: "Performance Analysis",
    steps: &[
        "Running throughput tests...",
        "Analyzing latency patterns...",
        "Checking CPU utilization...",
        "Testing mesh connectivity...",
        "Evaluating QoS settings...",
    ],
};

const MESH: CategoryProfile = CategoryProfile {
    title: "Mesh Network Analysis",
    steps: &[
        "Scanning mesh topology...",
        "Testing node connectivity...",
        "Analyzing routing tables...",
        "Checking link quality...",
        "Evaluating load balancing...",
    ],
};

const SYSTEM: CategoryProfile = CategoryProfile {
    title: "System Health Analysis",
    steps: &[
        "System health scan...",
        "Hardware diagnostics...",
        "Memory analysis...",
        "Temperature monitoring...",
        "Log analysis...",
    ],
};

/// Steps walked while the channel-switch fix is "applied"
pub const FIX_STEPS: [&str; 6] = [
    "Saving current configuration...",
    "Updating channel settings...",
    "Restarting wireless interface...",
    "Waiting for interface to come up...",
    "Verifying connectivity...",
    "Running post-fix diagnostics...",
];

pub fn profile(category: DiagnosticCategory) -> &'static CategoryProfile {
    match category {
        DiagnosticCategory::Signal => &SIGNAL,
        DiagnosticCategory::Performance => &PERFORMANCE,
        DiagnosticCategory::Mesh => &MESH,
        DiagnosticCategory::System => &SYSTEM,
    }
}

/// Dashboard grouping for scenario buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    LinkQuality,
    Performance,
    Mesh,
    System,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::LinkQuality,
        Section::Performance,
        Section::Mesh,
        Section::System,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Section::LinkQuality => "LINK QUALITY ISSUES",
            Section::Performance => "PERFORMANCE PROBLEMS",
            Section::Mesh => "MESH NETWORK ISSUES",
            Section::System => "SYSTEM DIAGNOSTICS",
        }
    }

    /// Scenarios shown under this heading, in dashboard order
    pub fn scenarios(&self) -> &'static [Scenario] {
        match self {
            Section::LinkQuality => &[
                Scenario::SignalQuality,
                Scenario::Interference,
                Scenario::RangeLimitation,
                Scenario::PowerProblems,
            ],
            Section::Performance => &[
                Scenario::SlowTransfer,
                Scenario::HighLatency,
                Scenario::PacketLoss,
                Scenario::ThermalThrottling,
            ],
            Section::Mesh => &[
                Scenario::NodeConnectivity,
                Scenario::TopologyProblems,
                Scenario::RoutingIssues,
                Scenario::LoadBalancing,
            ],
            Section::System => &[
                Scenario::FullHealthScan,
                Scenario::GenerateReport,
                Scenario::ExpertMode,
            ],
        }
    }
}

/// A dashboard diagnostic button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    SignalQuality,
    Interference,
    RangeLimitation,
    PowerProblems,
    SlowTransfer,
    HighLatency,
    PacketLoss,
    ThermalThrottling,
    NodeConnectivity,
    TopologyProblems,
    RoutingIssues,
    LoadBalancing,
    FullHealthScan,
    GenerateReport,
    ExpertMode,
}

impl Scenario {
    /// Button text on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::SignalQuality => "Poor Signal Quality",
            Scenario::Interference => "Interference Issues",
            Scenario::RangeLimitation => "Range Limitations",
            Scenario::PowerProblems => "Power Problems",
            Scenario::SlowTransfer => "Slow Data Transfer",
            Scenario::HighLatency => "High Latency",
            Scenario::PacketLoss => "Packet Loss",
            Scenario::ThermalThrottling => "Thermal Throttling",
            Scenario::NodeConnectivity => "Node Connectivity",
            Scenario::TopologyProblems => "Topology Problems",
            Scenario::RoutingIssues => "Routing Issues",
            Scenario::LoadBalancing => "Load Balancing",
            Scenario::FullHealthScan => "Full Health Scan",
            Scenario::GenerateReport => "Generate Report",
            Scenario::ExpertMode => "Expert Mode",
        }
    }

    /// Heading of the command popup
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::SignalQuality => "Signal Quality Diagnostics",
            Scenario::Interference => "Interference Detection",
            Scenario::RangeLimitation => "Range Analysis",
            Scenario::PowerProblems => "Power System Check",
            Scenario::SlowTransfer => "Performance Analysis",
            Scenario::HighLatency => "Latency Diagnostics",
            Scenario::PacketLoss => "Packet Loss Analysis",
            Scenario::ThermalThrottling => "Thermal Management",
            Scenario::NodeConnectivity => "Mesh Node Analysis",
            Scenario::TopologyProblems => "Network Topology Check",
            Scenario::RoutingIssues => "Routing Diagnostics",
            Scenario::LoadBalancing => "Load Balancing Analysis",
            Scenario::FullHealthScan => "Complete System Scan",
            Scenario::GenerateReport => "Diagnostic Report Generation",
            Scenario::ExpertMode => "Expert Diagnostics",
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            Scenario::SignalQuality | Scenario::Interference | Scenario::RangeLimitation => {
                DiagnosticCategory::Signal
            }
            Scenario::SlowTransfer | Scenario::HighLatency | Scenario::PacketLoss => {
                DiagnosticCategory::Performance
            }
            Scenario::NodeConnectivity
            | Scenario::TopologyProblems
            | Scenario::RoutingIssues
            | Scenario::LoadBalancing => DiagnosticCategory::Mesh,
            Scenario::PowerProblems
            | Scenario::ThermalThrottling
            | Scenario::FullHealthScan
            | Scenario::GenerateReport
            | Scenario::ExpertMode => DiagnosticCategory::System,
        }
    }

    /// Commands a real diagnosis would run (display only)
    pub fn commands(&self) -> &'static [&'static str] {
        match self {
            Scenario::SignalQuality => &[
                "iw dev wlan0 info",
                "iw dev wlan0 survey dump",
                "iwinfo wlan0 assoclist",
                "iwinfo wlan0 info",
                "/usr/sbin/get_noise_stats.sh 100",
                "iw dev wlan0 station dump",
            ],
            Scenario::Interference => &[
                "iw dev wlan0 survey dump",
                "/usr/share/simpleconfig/spectral_scan.sh",
                "/usr/sbin/spectral_scan.sh",
                "iwinfo wlan0 freqlist",
                "iw reg get",
            ],
            Scenario::RangeLimitation => &[
                "iw dev wlan0 info",
                "iwinfo wlan0 txpowerlist",
                "/usr/sbin/get_noise_stats.sh 100",
                "ping -c 10 $(batctl o | head -2 | tail -1 | awk '{print $1}')",
                "batctl o",
            ],
            Scenario::PowerProblems => &[
                "cat /sys/class/thermal/thermal_zone*/temp",
                "uptime",
                "cat /proc/loadavg",
                "free -m",
                "dmesg | grep -i power",
            ],
            Scenario::SlowTransfer => &[
                "iperf3 -c $(batctl o | head -2 | tail -1 | awk '{print $1}') -t 10",
                "ping -c 20 $(ip route | grep default | awk '{print $3}')",
                "tc -s qdisc show",
                "iwinfo wlan0 assoclist",
                "cat /proc/loadavg",
            ],
            Scenario::HighLatency => &[
                "ping -c 50 $(ip route | grep default | awk '{print $3}')",
                "traceroute $(ip route | grep default | awk '{print $3}')",
                "batctl ping $(batctl o | head -2 | tail -1 | awk '{print $1}')",
                "tc -s qdisc show",
            ],
            Scenario::PacketLoss => &[
                "ping -c 100 $(ip route | grep default | awk '{print $3}')",
                "iwinfo wlan0 assoclist",
                "ethtool -S eth0",
                "dmesg | grep -i 'packet\\|drop\\|error'",
            ],
            Scenario::ThermalThrottling => &[
                "cat /sys/class/thermal/thermal_zone*/temp",
                "cat /sys/class/thermal/thermal_zone*/type",
                "dmesg | grep -i thermal",
                "iwinfo wlan0 info",
                "/usr/sbin/max_throughput.sh",
            ],
            Scenario::NodeConnectivity => &[
                "batctl o",
                "batctl oj",
                "batctl n",
                "batctl if",
                "dynamic_mesh json",
            ],
            Scenario::TopologyProblems => &[
                "batctl o",
                "batctl t",
                "ip route show",
                "batctl s",
                "iwinfo wlan0 assoclist",
            ],
            Scenario::RoutingIssues => &[
                "ip route show",
                "ip rule show",
                "batctl o",
                "batctl t",
                "traceroute $(batctl o | head -2 | tail -1 | awk '{print $1}')",
            ],
            Scenario::LoadBalancing => &[
                "tc -s qdisc show",
                "tc class show",
                "batctl s",
                "cat /proc/loadavg",
                "iwinfo wlan0 assoclist",
            ],
            Scenario::FullHealthScan => &[
                "/usr/sbin/info.sh",
                "/usr/sbin/info.sh wireless",
                "batctl o",
                "iwinfo wlan0 info",
                "cat /sys/class/thermal/thermal_zone*/temp",
                "free -m",
                "dmesg | tail -50",
                "logread | tail -100",
            ],
            Scenario::GenerateReport => &[
                "/usr/sbin/info.sh > /tmp/system_report.txt",
                "batctl o >> /tmp/system_report.txt",
                "iwinfo >> /tmp/system_report.txt",
                "dmesg >> /tmp/system_report.txt",
                "tar -czf /tmp/diagnostic_report.tar.gz /tmp/system_report.txt",
            ],
            Scenario::ExpertMode => &[
                "iw dev",
                "iw phy",
                "cat /sys/kernel/debug/ieee80211/phy*/ath9k/recv",
                "cat /sys/kernel/debug/ieee80211/phy*/ath9k/xmit",
                "/usr/sbin/spectral_scan.sh",
                "sr_personality",
            ],
        }
    }
}

/// Split a display command into its program name and the remainder.
///
/// Falls back to the whole line as the remainder when the command does not
/// tokenize (unbalanced quotes).
pub fn split_program(command: &str) -> (&str, &str) {
    let program_len = match shell_words::split(command) {
        Ok(words) => match words.first() {
            Some(first) if command.starts_with(first.as_str()) => first.len(),
            _ => 0,
        },
        Err(_) => 0,
    };
    command.split_at(program_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_counts_per_category() {
        assert_eq!(profile(DiagnosticCategory::Signal).steps.len(), 6);
        assert_eq!(profile(DiagnosticCategory::Performance).steps.len(), 5);
        assert_eq!(profile(DiagnosticCategory::Mesh).steps.len(), 5);
        assert_eq!(profile(DiagnosticCategory::System).steps.len(), 5);
    }

    #[test]
    fn every_scenario_has_commands_and_a_section() {
        let listed: Vec<Scenario> = Section::ALL
            .iter()
            .flat_map(|s| s.scenarios().iter().copied())
            .collect();
        assert_eq!(listed.len(), 15);
        for scenario in listed {
            assert!(!scenario.commands().is_empty(), "{scenario:?} has no commands");
            assert!(!scenario.title().is_empty());
        }
    }

    #[test]
    fn scenarios_launch_expected_categories() {
        assert_eq!(Scenario::Interference.category(), DiagnosticCategory::Signal);
        assert_eq!(Scenario::PowerProblems.category(), DiagnosticCategory::System);
        assert_eq!(Scenario::ThermalThrottling.category(), DiagnosticCategory::System);
        assert_eq!(Scenario::LoadBalancing.category(), DiagnosticCategory::Mesh);
        assert_eq!(Scenario::PacketLoss.category(), DiagnosticCategory::Performance);
    }

    #[test]
    fn split_program_separates_first_word() {
        assert_eq!(split_program("iw dev wlan0 info"), ("iw", " dev wlan0 info"));
        assert_eq!(split_program("/usr/sbin/info.sh"), ("/usr/sbin/info.sh", ""));
        assert_eq!(
            split_program("dmesg | grep -i 'packet\\|drop\\|error'"),
            ("dmesg", " | grep -i 'packet\\|drop\\|error'")
        );
    }

    #[test]
    fn split_program_tolerates_unbalanced_quotes() {
        assert_eq!(split_program("echo 'oops"), ("", "echo 'oops"));
    }
}
