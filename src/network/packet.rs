use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Time;

/// Tag naming the kind of traffic a packet belongs to
///
/// The tag itself carries no scheduling meaning, disciplines map it
/// to a [`TrafficClass`] through their classifier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlowType(Cow<'static, str>);

impl FlowType {
    /// Interactive, latency sensitive traffic
    pub const VIDEO: Self = Self(Cow::Borrowed("VIDEO"));

    /// Bulk traffic that only cares about throughput
    pub const DOWNLOAD: Self = Self(Cow::Borrowed("DOWNLOAD"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlowType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        fmt.write_str(&self.0)
    }
}

/// The two service classes a discipline distinguishes
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficClass {
    Realtime,
    BestEffort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    id: String,
    flow_type: FlowType,
    size_bytes: u64,
    arrival: Time,
}

impl Packet {
    pub fn new(id: impl Into<String>, flow_type: FlowType, size_bytes: u64, arrival: Time) -> Self {
        Self {
            id: id.into(),
            flow_type,
            size_bytes,
            arrival,
        }
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_flow_type(&self) -> &FlowType {
        &self.flow_type
    }

    pub fn get_size(&self) -> u64 {
        self.size_bytes
    }

    pub fn get_arrival(&self) -> Time {
        self.arrival
    }
}

impl std::fmt::Display for Packet {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            fmt,
            "{} ({}, {}B @ {})",
            self.id, self.flow_type, self.size_bytes, self.arrival
        )
    }
}
