//! # Integration Flows
//!
//! Whole-network scenarios exercising routing, splitting, merging and
//! relocation together.

pub mod churn_flows;
pub mod shared_flows;
