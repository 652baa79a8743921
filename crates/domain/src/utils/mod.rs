//! Serialization helpers shared by the wire types

pub mod serde_helpers;
