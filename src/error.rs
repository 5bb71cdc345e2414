//! Error types for simulation setup

use thiserror::Error;

/// Rejected configuration or input, detected before a run starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("link bandwidth must be positive")]
    NonPositiveBandwidth,
    #[error("flow {0}: bitrate must be positive")]
    NonPositiveBitrate(String),
    #[error("flow {0}: packet size must be positive")]
    NonPositivePacketSize(String),
    #[error("flow {0}: packet interval must be positive and finite")]
    InvalidInterval(String),
    #[error("flow {0}: jitter must be non-negative and finite")]
    InvalidJitter(String),
    #[error("invalid time for {0}: {1}")]
    InvalidTime(String, f64), // context, value
    #[error("weights must be positive, got {0}:{1}")]
    NonPositiveWeight(u32, u32), // realtime, best-effort
    #[error("duplicate flow id: {0}")]
    DuplicateFlow(String),
    #[error("duplicate packet id: {0}")]
    DuplicatePacket(String),
    #[error("packet {0} arrives before its predecessor")]
    UnsortedArrivals(String),
    #[error("discipline already holds {0} packets")]
    DisciplineNotEmpty(usize),
}
