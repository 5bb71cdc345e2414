use std::collections::VecDeque;

use super::Discipline;

use crate::network::Packet;

/// Single queue, packets leave in the order they were admitted
#[derive(Debug, Clone, Default)]
pub struct Fifo {
    queue: VecDeque<Packet>,
}

impl Discipline for Fifo {
    fn admit(&mut self, packet: Packet) {
        self.queue.push_back(packet);
    }

    fn select_next(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn name(&self) -> &'static str {
        "FIFO"
    }
}
