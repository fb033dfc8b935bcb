//! # Ports
//!
//! - `inbound`: the API the network exposes to drivers
//! - `outbound`: the policies the network is constructed with

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipApi;
pub use outbound::{
    AdmissionPolicy, AdmitAll, AgeingRelocation, NoRelocation, OneInfantPerSection,
    RelocationPolicy,
};
