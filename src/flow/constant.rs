use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_time, make_packet_id, PacketSource};

use crate::error::ConfigError;
use crate::network::{get_size_delay, Bandwidth, FlowType, Packet};
use crate::time::{Duration, Time, START_TIME};

/// A constant bit rate stream, e.g., a video call
///
/// Packets are spaced by exactly `packet_size / (bitrate / 8)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantBitRate {
    flow_id: String,
    flow_type: FlowType,
    bitrate: Bandwidth,
    packet_size: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    start: Time,
}

impl ConstantBitRate {
    pub fn new(
        flow_id: impl Into<String>,
        flow_type: FlowType,
        bitrate: Bandwidth,
        packet_size: u64,
    ) -> Result<Self, ConfigError> {
        let flow = Self {
            flow_id: flow_id.into(),
            flow_type,
            bitrate,
            packet_size,
            start: START_TIME,
        };

        flow.validate()?;
        Ok(flow)
    }

    /// Delay the first packet until `start`
    pub fn with_start(mut self, start: Time) -> Result<Self, ConfigError> {
        self.start = start;
        self.validate()?;
        Ok(self)
    }

    /// Gap between two consecutive packets
    pub fn get_interval(&self) -> Duration {
        get_size_delay(self.packet_size, self.bitrate)
    }

    pub fn get_bitrate(&self) -> Bandwidth {
        self.bitrate
    }
}

impl PacketSource for ConstantBitRate {
    fn get_flow_id(&self) -> &str {
        &self.flow_id
    }

    fn get_flow_type(&self) -> &FlowType {
        &self.flow_type
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bitrate.is_zero() {
            return Err(ConfigError::NonPositiveBitrate(self.flow_id.clone()));
        }
        if self.packet_size == 0 {
            return Err(ConfigError::NonPositivePacketSize(self.flow_id.clone()));
        }
        check_time(&self.flow_id, self.start)
    }

    fn generate(&self, duration: Duration, _rng: &mut dyn RngCore) -> Vec<Packet> {
        if !duration.is_valid() {
            log::warn!("Flow {} got invalid duration {duration}", self.flow_id);
            return vec![];
        }

        let end = START_TIME + duration;
        let interval = self.get_interval();

        // Offsets are computed from the start so rounding errors do not accumulate
        (0u64..)
            .map(|sequence| (sequence, self.start + interval * sequence))
            .take_while(|(_, arrival)| *arrival < end)
            .map(|(sequence, arrival)| {
                Packet::new(
                    make_packet_id(&self.flow_id, sequence),
                    self.flow_type.clone(),
                    self.packet_size,
                    arrival,
                )
            })
            .collect()
    }
}
