use std::collections::VecDeque;

use super::{Classifier, Discipline};

use crate::error::ConfigError;
use crate::network::{Packet, TrafficClass};

/// Credit based weighted round robin over the two traffic classes
///
/// Every round each class may send as many packets as its weight. While both
/// classes are backlogged the packet ratio is exactly the weight ratio. A
/// class without backlog donates its share to the other one, so the link
/// never idles while anything is buffered.
#[derive(Debug, Clone)]
pub struct WeightedRoundRobin {
    classifier: Classifier,
    high: VecDeque<Packet>,
    low: VecDeque<Packet>,
    high_weight: u32,
    low_weight: u32,
    high_credit: u32,
    low_credit: u32,
}

impl WeightedRoundRobin {
    pub fn new(
        classifier: Classifier,
        high_weight: u32,
        low_weight: u32,
    ) -> Result<Self, ConfigError> {
        if high_weight == 0 || low_weight == 0 {
            return Err(ConfigError::NonPositiveWeight(high_weight, low_weight));
        }

        Ok(Self {
            classifier,
            high: Default::default(),
            low: Default::default(),
            high_weight,
            low_weight,
            high_credit: high_weight,
            low_credit: low_weight,
        })
    }

    /// Remaining credits of the current round (realtime, best-effort)
    pub fn get_credits(&self) -> (u32, u32) {
        (self.high_credit, self.low_credit)
    }
}

impl Discipline for WeightedRoundRobin {
    fn admit(&mut self, packet: Packet) {
        match self.classifier.classify(packet.get_flow_type()) {
            TrafficClass::Realtime => self.high.push_back(packet),
            TrafficClass::BestEffort => self.low.push_back(packet),
        }
    }

    fn select_next(&mut self) -> Option<Packet> {
        let backlogged = !self.high.is_empty() && !self.low.is_empty();

        if backlogged && self.high_credit == 0 && self.low_credit == 0 {
            log::trace!("Starting new round");
            self.high_credit = self.high_weight;
            self.low_credit = self.low_weight;
        }

        if !self.high.is_empty() && self.high_credit > 0 {
            self.high_credit -= 1;
            return self.high.pop_front();
        }

        if !self.low.is_empty() && self.low_credit > 0 {
            self.low_credit -= 1;
            return self.low.pop_front();
        }

        // Spare capacity, serve whoever has backlog without spending credit
        self.high.pop_front().or_else(|| self.low.pop_front())
    }

    fn len(&self) -> usize {
        self.high.len() + self.low.len()
    }

    fn name(&self) -> &'static str {
        "WRR"
    }
}
