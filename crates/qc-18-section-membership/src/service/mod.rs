//! # Service Layer
//!
//! The network orchestrator and its builder.

mod builder;
mod network;

pub use builder::NetworkBuilder;
pub use network::{AgeHistogram, Network, NetworkStats};
