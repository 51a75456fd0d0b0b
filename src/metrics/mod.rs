mod circular_buffer;
mod monitor;

pub use circular_buffer::CircularBuffer;
pub use monitor::*;

/// Label shown on every card when the metrics backend cannot run here.
pub const UNAVAILABLE: &str = "sysinfo non disponibile";

/// Network traffic is displayed in MB and saturates at this value.
pub const NETWORK_CAP_MB: f32 = 100.0;

/// One poll of the three monitored resources.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SystemSample {
    pub cpu_percent: f32,
    pub network_mb: f32,
    pub disk_percent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Cpu,
    Network,
    Disk,
}

impl StatKind {
    pub const ALL: [StatKind; 3] = [StatKind::Cpu, StatKind::Network, StatKind::Disk];

    pub fn title(&self) -> &'static str {
        match self {
            StatKind::Cpu => "CPU",
            StatKind::Network => "Rete",
            StatKind::Disk => "Disco",
        }
    }
}

/// Text and progress value (0..=100) of one stat card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatReadout {
    pub kind: StatKind,
    pub text: String,
    pub value: f32,
}

impl StatReadout {
    /// Card contents for a sample, or the unavailable placeholder.
    pub fn from_sample(sample: Option<&SystemSample>) -> [StatReadout; 3] {
        StatKind::ALL.map(|kind| match sample {
            Some(s) => {
                let (text, value) = match kind {
                    StatKind::Cpu => (format!("Utilizzo CPU: {:.0}%", s.cpu_percent), s.cpu_percent),
                    StatKind::Network => {
                        (format!("Traffico rete: {:.1} MB", s.network_mb), s.network_mb)
                    }
                    StatKind::Disk => {
                        (format!("Utilizzo disco: {:.0}%", s.disk_percent), s.disk_percent)
                    }
                };
                StatReadout {
                    kind,
                    text,
                    value: value.clamp(0.0, 100.0),
                }
            }
            None => StatReadout {
                kind,
                text: UNAVAILABLE.to_string(),
                value: 0.0,
            },
        })
    }

    /// Progress bar fill in `0..=1`.
    pub fn fraction(&self) -> f32 {
        self.value / 100.0
    }
}

/// Total traffic in MB, capped for display.
pub fn network_mb(bytes_sent: u64, bytes_received: u64) -> f32 {
    let total = bytes_sent.saturating_add(bytes_received) as f64 / (1024.0 * 1024.0);
    (total as f32).min(NETWORK_CAP_MB)
}
