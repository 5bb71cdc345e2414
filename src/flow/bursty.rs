use rand::{Rng, RngCore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_time, make_packet_id, PacketSource};

use crate::error::ConfigError;
use crate::network::{FlowType, Packet};
use crate::time::{Duration, Time, START_TIME};

/// Upper bound of the random extra gap between two download packets
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_seconds_f64(0.0005);

/// A greedy bulk transfer that is only active during `[start, end)`
///
/// Each gap is the nominal interval plus a uniform draw from `[0, max_jitter)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BurstyGreedy {
    flow_id: String,
    flow_type: FlowType,
    start: Time,
    end: Time,
    packet_size: u64,
    interval: Duration,
    #[cfg_attr(feature = "serde", serde(default = "default_jitter"))]
    max_jitter: Duration,
}

#[cfg(feature = "serde")]
fn default_jitter() -> Duration {
    DEFAULT_MAX_JITTER
}

impl BurstyGreedy {
    pub fn new(
        flow_id: impl Into<String>,
        flow_type: FlowType,
        start: Time,
        end: Time,
        packet_size: u64,
        interval: Duration,
    ) -> Result<Self, ConfigError> {
        let flow = Self {
            flow_id: flow_id.into(),
            flow_type,
            start,
            end,
            packet_size,
            interval,
            max_jitter: DEFAULT_MAX_JITTER,
        };

        flow.validate()?;
        Ok(flow)
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Result<Self, ConfigError> {
        self.max_jitter = max_jitter;
        self.validate()?;
        Ok(self)
    }

    pub fn get_interval(&self) -> Duration {
        self.interval
    }

    pub fn get_window(&self) -> (Time, Time) {
        (self.start, self.end)
    }
}

impl PacketSource for BurstyGreedy {
    fn get_flow_id(&self) -> &str {
        &self.flow_id
    }

    fn get_flow_type(&self) -> &FlowType {
        &self.flow_type
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.packet_size == 0 {
            return Err(ConfigError::NonPositivePacketSize(self.flow_id.clone()));
        }
        if !self.interval.is_valid() || self.interval.is_zero() {
            return Err(ConfigError::InvalidInterval(self.flow_id.clone()));
        }
        if !self.max_jitter.is_valid() {
            return Err(ConfigError::InvalidJitter(self.flow_id.clone()));
        }
        check_time(&self.flow_id, self.start)?;
        check_time(&self.flow_id, self.end)
    }

    fn generate(&self, duration: Duration, rng: &mut dyn RngCore) -> Vec<Packet> {
        if !duration.is_valid() {
            log::warn!("Flow {} got invalid duration {duration}", self.flow_id);
            return vec![];
        }

        let limit = self.end.min(START_TIME + duration);
        let max_jitter = self.max_jitter.as_seconds_f64();

        let mut packets = vec![];
        let mut current = self.start;

        while current < limit {
            packets.push(Packet::new(
                make_packet_id(&self.flow_id, packets.len() as u64),
                self.flow_type.clone(),
                self.packet_size,
                current,
            ));

            let jitter = if max_jitter > 0.0 {
                rng.random_range(0.0..max_jitter)
            } else {
                0.0
            };

            current += self.interval + Duration::from_seconds_f64(jitter);
        }

        if packets.is_empty() {
            log::warn!("Flow {} produced no packets", self.flow_id);
        }

        packets
    }
}
