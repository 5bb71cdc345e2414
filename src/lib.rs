//! linkqos is a discrete event simulator for a single congested link
//!
//! Several traffic flows compete for one bottleneck. A queuing discipline
//! decides the transmission order whenever the link is oversubscribed, and
//! the engine reports when each packet finished transmitting.

pub mod time;

pub mod network;

pub mod flow;

pub mod discipline;

pub mod config;
pub use config::SimulationConfig;

pub mod error;
pub use error::ConfigError;

pub mod stats;
pub use stats::Statistics;

pub mod runtime;
pub use runtime::{Experiment, Outcome};
