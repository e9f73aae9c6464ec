//! # Toolbox Provider
//!
//! Lifecycle framework for long-lived services:
//! - [`Provider`]: activated once, hands out [`Resource`]s, shut down with a grace time
//! - [`ProviderFactory`]: creates and destroys providers of one type, with the same
//!   lifecycle and optional settings hooks
//! - [`Resource`]: opened once, closed idempotently
//!
//! Implementations hold a [`Lifecycle`] (or [`ResourceLifecycle`]) and supply only the
//! hooks; the transitions, rollbacks and guards live here.

mod error;
mod factory;
mod lifecycle;
mod provider;
mod resource;

pub use error::{BoxError, ProviderError, ProviderErrorKind, ProviderResult};
pub use factory::{ProviderFactory, ProviderType};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use provider::Provider;
pub use resource::{Resource, ResourceLifecycle, ResourceState};

pub use toolbox_core::TimeUnit;
