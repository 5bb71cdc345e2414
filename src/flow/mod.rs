/// Traffic generators feeding the link
///
/// Every flow turns its static parameters into a finite, time-ordered list
/// of packets. All flows of a run are merged into one [`AdmissionStream`].
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::network::{FlowType, Packet};
use crate::time::{Duration, Time};

mod constant;
pub use constant::ConstantBitRate;

mod bursty;
pub use bursty::{BurstyGreedy, DEFAULT_MAX_JITTER};

mod stream;
pub use stream::AdmissionStream;

/// Implemented by every traffic generator
pub trait PacketSource {
    fn get_flow_id(&self) -> &str;

    fn get_flow_type(&self) -> &FlowType;

    /// Check the parameters again, e.g., after deserializing them
    fn validate(&self) -> Result<(), ConfigError>;

    /// Produce all packets arriving before `duration` has elapsed
    ///
    /// Only randomized generators draw from `rng`
    fn generate(&self, duration: Duration, rng: &mut dyn RngCore) -> Vec<Packet>;
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    ConstantBitRate(ConstantBitRate),
    BurstyGreedy(BurstyGreedy),
}

impl PacketSource for Flow {
    fn get_flow_id(&self) -> &str {
        match self {
            Self::ConstantBitRate(flow) => flow.get_flow_id(),
            Self::BurstyGreedy(flow) => flow.get_flow_id(),
        }
    }

    fn get_flow_type(&self) -> &FlowType {
        match self {
            Self::ConstantBitRate(flow) => flow.get_flow_type(),
            Self::BurstyGreedy(flow) => flow.get_flow_type(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::ConstantBitRate(flow) => flow.validate(),
            Self::BurstyGreedy(flow) => flow.validate(),
        }
    }

    fn generate(&self, duration: Duration, rng: &mut dyn RngCore) -> Vec<Packet> {
        match self {
            Self::ConstantBitRate(flow) => flow.generate(duration, rng),
            Self::BurstyGreedy(flow) => flow.generate(duration, rng),
        }
    }
}

impl From<ConstantBitRate> for Flow {
    fn from(flow: ConstantBitRate) -> Self {
        Self::ConstantBitRate(flow)
    }
}

impl From<BurstyGreedy> for Flow {
    fn from(flow: BurstyGreedy) -> Self {
        Self::BurstyGreedy(flow)
    }
}

pub(crate) fn make_packet_id(flow_id: &str, sequence: u64) -> String {
    format!("{flow_id}_{sequence}")
}

pub(crate) fn check_time(context: &str, time: Time) -> Result<(), ConfigError> {
    if time.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTime(
            context.to_string(),
            time.as_seconds_f64(),
        ))
    }
}
