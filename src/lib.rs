//! # Toolbox
//!
//! Umbrella crate re-exporting the toolbox workspace:
//! - [`core`]: settings injection, timer queue, formatters, hashing and thread context
//! - [`uuid`]: sharded UUID generation and numeric ids
//! - [`provider`]: provider, factory and resource lifecycles
//! - [`types`]: validated value types

pub use toolbox_core as core;
pub use toolbox_provider as provider;
pub use toolbox_types as types;
pub use toolbox_uuid as uuid;
