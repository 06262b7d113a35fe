//! # Integration Flows
//!
//! Multi-generation scenarios driven through `MlbfService` against a real
//! filesystem store.

pub mod generation_flow;
pub mod reset_flow;
pub mod stash_flow;
