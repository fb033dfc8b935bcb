//! # Adapters
//!
//! Handles that drive the network service from outside.

pub mod shared_network;

pub use shared_network::SharedNetwork;
