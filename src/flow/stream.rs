use std::collections::HashSet;

use rand::RngCore;

use super::PacketSource;

use crate::error::ConfigError;
use crate::network::Packet;
use crate::time::Duration;

/// All packets of a run in the order they arrive at the link
///
/// Arrivals are non-decreasing and packet ids are unique. Packets with the
/// same arrival time keep the order of the flows that generated them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdmissionStream {
    packets: Vec<Packet>,
}

impl AdmissionStream {
    /// Generate the packets of every flow and merge them
    pub fn generate<F: PacketSource>(
        flows: &[F],
        duration: Duration,
        rng: &mut dyn RngCore,
    ) -> Result<Self, ConfigError> {
        if !duration.is_valid() {
            return Err(ConfigError::InvalidTime(
                "duration".to_string(),
                duration.as_seconds_f64(),
            ));
        }

        let mut flow_ids = HashSet::new();

        for flow in flows.iter() {
            flow.validate()?;

            if !flow_ids.insert(flow.get_flow_id()) {
                return Err(ConfigError::DuplicateFlow(flow.get_flow_id().to_string()));
            }
        }

        let packets = flows
            .iter()
            .flat_map(|flow| {
                let packets = flow.generate(duration, rng);
                log::debug!(
                    "Flow {} generated {} packets",
                    flow.get_flow_id(),
                    packets.len()
                );
                packets
            })
            .collect();

        Self::from_unsorted(packets)
    }

    /// Sort caller-supplied packets by arrival
    ///
    /// The sort is stable, so earlier entries win ties
    pub fn from_unsorted(mut packets: Vec<Packet>) -> Result<Self, ConfigError> {
        packets.sort_by(|a, b| a.get_arrival().total_cmp(&b.get_arrival()));
        Self::from_sorted(packets)
    }

    /// Use packets that are already in arrival order
    pub fn from_sorted(packets: Vec<Packet>) -> Result<Self, ConfigError> {
        let mut ids = HashSet::with_capacity(packets.len());

        for packet in packets.iter() {
            if !packet.get_arrival().is_valid() {
                return Err(ConfigError::InvalidTime(
                    packet.get_id().to_string(),
                    packet.get_arrival().as_seconds_f64(),
                ));
            }
            if !ids.insert(packet.get_id()) {
                return Err(ConfigError::DuplicatePacket(packet.get_id().to_string()));
            }
        }

        if let Some(pair) = packets
            .windows(2)
            .find(|pair| pair[1].get_arrival() < pair[0].get_arrival())
        {
            return Err(ConfigError::UnsortedArrivals(pair[1].get_id().to_string()));
        }

        Ok(Self { packets })
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Packet> {
        self.packets.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Packet> {
        self.packets.iter()
    }

    pub fn as_slice(&self) -> &[Packet] {
        &self.packets
    }
}
