/// Utilities to simulate a single bottleneck link
///
/// There are two important primitives in this module
///     * Packets are the unit of traffic competing for the link
///     * The LinkSimulator serializes admitted packets onto the link
use crate::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod packet;
pub use packet::{FlowType, Packet, TrafficClass};

mod link;
pub use link::{CompletionRecord, CompletionSink, LinkSimulator, RunSummary};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bandwidth(u64);

impl Bandwidth {
    pub const fn from_bits_per_second(bps: u64) -> Self {
        Self(bps)
    }

    pub const fn from_kilobits_per_second(kbps: u64) -> Self {
        Self(kbps * 1_000)
    }

    pub const fn from_megabits_per_second(mbps: u64) -> Self {
        Self(mbps * 1_000_000)
    }

    pub fn into_bits_per_second(self) -> u64 {
        self.0
    }

    pub fn bytes_per_second(&self) -> f64 {
        self.0 as f64 / 8.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(fmt, "{}Mbps", self.0 as f64 / 1_000_000.0)
    }
}

/// How long it takes to put `size` bytes onto a link of the given bandwidth
///
/// The bandwidth must not be zero
pub fn get_size_delay(size: u64, bandwidth: Bandwidth) -> Duration {
    assert!(!bandwidth.is_zero(), "Bandwidth must be positive");
    Duration::from_seconds_f64(size as f64 / bandwidth.bytes_per_second())
}
