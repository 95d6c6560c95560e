//! Capability -> provider lookup.

mod index;

pub use index::{CapabilityIndex, DroppedProvision};
