/// Queuing disciplines deciding which buffered packet leaves next
///
/// A discipline only decides order. When packets become visible to it is
/// up to the [`LinkSimulator`](crate::network::LinkSimulator).
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::network::{FlowType, Packet, TrafficClass};

mod fifo;
pub use fifo::Fifo;

mod priority;
pub use priority::StrictPriority;

mod round_robin;
pub use round_robin::WeightedRoundRobin;

/// Implement this trait to plug a custom scheduler into the link
pub trait Discipline {
    /// Buffer a packet that has arrived at the link
    fn admit(&mut self, packet: Packet);

    /// Remove the packet that should be transmitted next
    ///
    /// Returns None iff nothing is buffered
    fn select_next(&mut self) -> Option<Packet>;

    /// Number of buffered packets
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn name(&self) -> &'static str;
}

/// Maps flow types onto the two traffic classes
///
/// Everything not listed as realtime is best-effort.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    realtime: BTreeSet<FlowType>,
}

impl Classifier {
    pub fn new(realtime: impl IntoIterator<Item = FlowType>) -> Self {
        Self {
            realtime: realtime.into_iter().collect(),
        }
    }

    pub fn classify(&self, flow_type: &FlowType) -> TrafficClass {
        if self.realtime.contains(flow_type) {
            TrafficClass::Realtime
        } else {
            TrafficClass::BestEffort
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new([FlowType::VIDEO])
    }
}

/// The disciplines shipped with this crate
#[derive(Debug, Clone)]
pub enum QueueDiscipline {
    Fifo(Fifo),
    StrictPriority(StrictPriority),
    WeightedRoundRobin(WeightedRoundRobin),
}

impl QueueDiscipline {
    pub fn fifo() -> Self {
        Self::Fifo(Fifo::default())
    }

    pub fn strict_priority(classifier: Classifier) -> Self {
        Self::StrictPriority(StrictPriority::new(classifier))
    }

    pub fn weighted_round_robin(
        classifier: Classifier,
        realtime_weight: u32,
        best_effort_weight: u32,
    ) -> Result<Self, ConfigError> {
        let wrr = WeightedRoundRobin::new(classifier, realtime_weight, best_effort_weight)?;
        Ok(Self::WeightedRoundRobin(wrr))
    }
}

impl Discipline for QueueDiscipline {
    fn admit(&mut self, packet: Packet) {
        match self {
            Self::Fifo(inner) => inner.admit(packet),
            Self::StrictPriority(inner) => inner.admit(packet),
            Self::WeightedRoundRobin(inner) => inner.admit(packet),
        }
    }

    fn select_next(&mut self) -> Option<Packet> {
        match self {
            Self::Fifo(inner) => inner.select_next(),
            Self::StrictPriority(inner) => inner.select_next(),
            Self::WeightedRoundRobin(inner) => inner.select_next(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Fifo(inner) => inner.len(),
            Self::StrictPriority(inner) => inner.len(),
            Self::WeightedRoundRobin(inner) => inner.len(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Fifo(inner) => inner.name(),
            Self::StrictPriority(inner) => inner.name(),
            Self::WeightedRoundRobin(inner) => inner.name(),
        }
    }
}

/// Serializable description of a discipline
///
/// Used to build a fresh, empty instance for every run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum DisciplineConfig {
    Fifo,
    StrictPriority {
        classifier: Classifier,
    },
    WeightedRoundRobin {
        classifier: Classifier,
        realtime_weight: u32,
        best_effort_weight: u32,
    },
}

impl DisciplineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build().map(|_| ())
    }

    pub fn build(&self) -> Result<QueueDiscipline, ConfigError> {
        match self {
            Self::Fifo => Ok(QueueDiscipline::fifo()),
            Self::StrictPriority { classifier } => {
                Ok(QueueDiscipline::strict_priority(classifier.clone()))
            }
            Self::WeightedRoundRobin {
                classifier,
                realtime_weight,
                best_effort_weight,
            } => QueueDiscipline::weighted_round_robin(
                classifier.clone(),
                *realtime_weight,
                *best_effort_weight,
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Classifier, DisciplineConfig, Discipline};

    use crate::error::ConfigError;
    use crate::network::{FlowType, Packet, TrafficClass};
    use crate::time::Time;

    /// Make a packet that arrives at time zero
    pub(crate) fn packet(id: &str, flow_type: FlowType) -> Packet {
        Packet::new(id, flow_type, 1000, Time::from_seconds(0))
    }

    pub(crate) fn drain(discipline: &mut dyn Discipline) -> Vec<String> {
        std::iter::from_fn(|| discipline.select_next())
            .map(|p| p.get_id().to_string())
            .collect()
    }

    #[test]
    fn classify() {
        let classifier = Classifier::new([FlowType::new("VOIP"), FlowType::VIDEO]);

        assert_eq!(TrafficClass::Realtime, classifier.classify(&FlowType::VIDEO));
        assert_eq!(
            TrafficClass::Realtime,
            classifier.classify(&FlowType::new("VOIP"))
        );
        assert_eq!(
            TrafficClass::BestEffort,
            classifier.classify(&FlowType::DOWNLOAD)
        );
    }

    #[test]
    fn build_from_config() {
        let config = DisciplineConfig::WeightedRoundRobin {
            classifier: Classifier::default(),
            realtime_weight: 7,
            best_effort_weight: 3,
        };
        let discipline = config.build().unwrap();
        assert_eq!("WRR", discipline.name());
        assert!(discipline.is_empty());

        let config = DisciplineConfig::WeightedRoundRobin {
            classifier: Classifier::default(),
            realtime_weight: 0,
            best_effort_weight: 3,
        };
        assert_eq!(Err(ConfigError::NonPositiveWeight(0, 3)), config.validate());
    }
}
