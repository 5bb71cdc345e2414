use std::collections::VecDeque;

use super::{Classifier, Discipline};

use crate::network::{Packet, TrafficClass};

/// Realtime traffic always goes first
///
/// Best-effort packets are only sent while no realtime packet is buffered,
/// so sustained realtime load starves them.
#[derive(Debug, Clone)]
pub struct StrictPriority {
    classifier: Classifier,
    high: VecDeque<Packet>,
    low: VecDeque<Packet>,
}

impl StrictPriority {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            high: Default::default(),
            low: Default::default(),
        }
    }
}

impl Discipline for StrictPriority {
    fn admit(&mut self, packet: Packet) {
        match self.classifier.classify(packet.get_flow_type()) {
            TrafficClass::Realtime => self.high.push_back(packet),
            TrafficClass::BestEffort => self.low.push_back(packet),
        }
    }

    fn select_next(&mut self) -> Option<Packet> {
        self.high.pop_front().or_else(|| self.low.pop_front())
    }

    fn len(&self) -> usize {
        self.high.len() + self.low.len()
    }

    fn name(&self) -> &'static str {
        "PQ"
    }
}

#[cfg(test)]
mod tests {
    use super::StrictPriority;

    use crate::discipline::tests::{drain, packet};
    use crate::discipline::{Classifier, Discipline};
    use crate::network::FlowType;

    #[test]
    fn realtime_first() {
        let mut pq = StrictPriority::new(Classifier::default());

        pq.admit(packet("d0", FlowType::DOWNLOAD));
        pq.admit(packet("d1", FlowType::DOWNLOAD));
        pq.admit(packet("v0", FlowType::VIDEO));
        pq.admit(packet("v1", FlowType::VIDEO));

        assert_eq!(vec!["v0", "v1", "d0", "d1"], drain(&mut pq));
        assert!(pq.is_empty());
    }

    #[test]
    fn starves_best_effort() {
        let mut pq = StrictPriority::new(Classifier::default());
        pq.admit(packet("d0", FlowType::DOWNLOAD));

        // Keep one video packet buffered at all times
        pq.admit(packet("v0", FlowType::VIDEO));
        for idx in 1..100 {
            pq.admit(packet(&format!("v{idx}"), FlowType::VIDEO));
            let selected = pq.select_next().unwrap();
            assert_eq!(&FlowType::VIDEO, selected.get_flow_type());
        }

        assert_eq!("v99", pq.select_next().unwrap().get_id());
        assert_eq!("d0", pq.select_next().unwrap().get_id());
        assert!(pq.select_next().is_none());
    }

    #[test]
    fn custom_classifier() {
        let mut pq = StrictPriority::new(Classifier::new([FlowType::DOWNLOAD]));

        pq.admit(packet("v0", FlowType::VIDEO));
        pq.admit(packet("d0", FlowType::DOWNLOAD));

        assert_eq!(vec!["d0", "v0"], drain(&mut pq));
    }
}
