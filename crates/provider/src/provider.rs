use std::any::Any;
use std::time::Duration;

use toolbox_core::TimeUnit;

use crate::{Lifecycle, ProviderError, ProviderResult, Resource};

/// A long-lived service with an explicit activation/shutdown lifecycle that hands out
/// [`Resource`]s while active.
///
/// Implementors hold a [`Lifecycle`] and supply the two hooks. `activate` and `shutdown`
/// return the same instance so calls can be chained:
///
/// ```ignore
/// provider.activate()?.open_resource()?;
/// ```
///
/// Resource-producing methods should begin with
/// [`Lifecycle::check_shutdown_in_progress`] and [`Lifecycle::check_active`].
/// Both pass while [`Provider::on_activate`] runs, so the hook may pre-open resources.
pub trait Provider: Send + Sync {
    type Resource: Resource;

    /// Process-wide identifier; defaults to the implementing type's name.
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn lifecycle(&self) -> &Lifecycle;

    /// Acquires whatever the provider needs. A failure leaves the provider inactive.
    fn on_activate(&self) -> ProviderResult<()>;

    /// Releases everything, closing open resources, within `grace`. A failure leaves the
    /// provider active.
    fn on_shutdown(&self, grace: Duration) -> ProviderResult<()>;

    /// # Errors
    ///
    /// [`ProviderError::IllegalState`] if already active, shutting down or shut down;
    /// otherwise whatever [`Provider::on_activate`] returns.
    fn activate(&self) -> ProviderResult<&Self> {
        self.lifecycle().activate(self.id(), || self.on_activate())?;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`ProviderError::IllegalState`] if not active, [`ProviderError::InvalidArgument`]
    /// for a negative grace time; otherwise whatever [`Provider::on_shutdown`] returns.
    fn shutdown(&self, grace_time: i64, unit: TimeUnit) -> ProviderResult<&Self> {
        self.lifecycle()
            .shutdown(self.id(), grace_time, unit, |grace| self.on_shutdown(grace))?;
        Ok(self)
    }

    fn is_active(&self) -> bool {
        self.lifecycle().is_active()
    }

    fn is_shutdown_in_progress(&self) -> bool {
        self.lifecycle().is_shutdown_in_progress()
    }

    fn open_resource(&self) -> ProviderResult<Self::Resource> {
        Err(ProviderError::Unsupported(format!(
            "{}: provider feature not supported by this implementation",
            self.id()
        )))
    }

    /// Opens a resource parameterised by `value`, which the implementation downcasts.
    fn open_resource_with(&self, _value: &dyn Any) -> ProviderResult<Self::Resource> {
        Err(ProviderError::Unsupported(format!(
            "{}: provider feature not supported by this implementation",
            self.id()
        )))
    }
}
