//! # Toolbox Core
//!
//! Standalone helpers shared by the toolbox crates:
//! - formatters for hex, numbers, booleans and RFC 2822 / ISO 8601 dates
//! - CRC64 hashing, validators, shuffling and random data
//! - time units, a stopwatch and an expiry-ordered timer queue
//! - a per-thread scratchpad and a JSON serializer facade
//! - the [`settings::Settings`] bag with its descriptor-driven injector
//!
//! **No lifecycle concerns**: providers and resources live in `toolbox-provider`,
//! identifier generation in `toolbox-uuid`.

pub mod constants;
pub mod error;
pub mod formatter;
pub mod hash;
pub mod security;
pub mod serialization;
pub mod settings;
pub mod thread_info;
pub mod time;
pub mod validation;

pub use error::{CoreError, CoreResult};
pub use serialization::{JsonSerializer, Serializer};
pub use settings::{Configurable, NamedEnum, PropertyDescriptor, PropertyValue, Settings};
pub use thread_info::ThreadInfo;
pub use time::{StopWatch, TimeUnit, TimerQueue};
