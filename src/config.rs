//! Static description of a simulation
//!
//! Everything a run needs is passed in here, there are no global settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

use crate::discipline::{Classifier, DisciplineConfig};
use crate::error::ConfigError;
use crate::flow::{BurstyGreedy, ConstantBitRate, Flow, PacketSource};
use crate::network::{Bandwidth, FlowType};
use crate::time::{Duration, Time};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// How long the flows generate traffic
    pub duration: Duration,

    /// Capacity of the shared link
    pub link_bandwidth: Bandwidth,

    /// Seeds the jitter of randomized flows
    pub seed: u64,

    pub flows: Vec<Flow>,

    /// Each discipline gets its own run over the same packets
    pub disciplines: Vec<DisciplineConfig>,
}

impl SimulationConfig {
    /// A video call competing with a download from 5s to 25s on a 10Mbps link
    pub fn reference() -> Result<Self, ConfigError> {
        let video = ConstantBitRate::new(
            "video_1",
            FlowType::VIDEO,
            Bandwidth::from_megabits_per_second(5),
            1200,
        )?;

        let download = BurstyGreedy::new(
            "download_1",
            FlowType::DOWNLOAD,
            Time::from_seconds(5),
            Time::from_seconds(25),
            1500,
            Duration::from_millis(1),
        )?;

        Ok(Self {
            duration: Duration::from_seconds(30),
            link_bandwidth: Bandwidth::from_megabits_per_second(10),
            seed: 0,
            flows: vec![video.into(), download.into()],
            disciplines: vec![
                DisciplineConfig::Fifo,
                DisciplineConfig::StrictPriority {
                    classifier: Classifier::default(),
                },
                DisciplineConfig::WeightedRoundRobin {
                    classifier: Classifier::default(),
                    realtime_weight: 7,
                    best_effort_weight: 3,
                },
            ],
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link_bandwidth.is_zero() {
            return Err(ConfigError::NonPositiveBandwidth);
        }
        if !self.duration.is_valid() {
            return Err(ConfigError::InvalidTime(
                "duration".to_string(),
                self.duration.as_seconds_f64(),
            ));
        }

        let mut flow_ids = HashSet::new();
        for flow in self.flows.iter() {
            flow.validate()?;

            if !flow_ids.insert(flow.get_flow_id()) {
                return Err(ConfigError::DuplicateFlow(flow.get_flow_id().to_string()));
            }
        }

        for discipline in self.disciplines.iter() {
            discipline.validate()?;
        }

        Ok(())
    }
}
