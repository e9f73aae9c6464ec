use std::any::{Any, TypeId};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use toolbox_core::TimeUnit;

use crate::{Lifecycle, Provider, ProviderError, ProviderResult};

/// Runtime token for the provider type a factory produces.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderType {
    id: TypeId,
    name: &'static str,
}

impl ProviderType {
    pub fn of<P: Provider + 'static>() -> Self {
        Self {
            id: TypeId::of::<P>(),
            name: std::any::type_name::<P>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<P: Provider + 'static>(&self) -> bool {
        self.id == TypeId::of::<P>()
    }
}

impl fmt::Debug for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderType").field(&self.name).finish()
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Builds and tears down providers of one type. The factory has its own lifecycle,
/// identical in shape to a provider's.
///
/// Everything except the lifecycle hooks defaults to [`ProviderError::Unsupported`].
pub trait ProviderFactory: Send + Sync {
    type Provider: Provider + 'static;

    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::of::<Self::Provider>()
    }

    fn lifecycle(&self) -> &Lifecycle;

    fn on_activate(&self) -> ProviderResult<()>;

    fn on_shutdown(&self, grace: Duration) -> ProviderResult<()>;

    /// Loads settings from the implementation's default location.
    fn load_default_settings(&self) -> ProviderResult<&Self> {
        Err(unsupported(self.id()))
    }

    /// Loads settings from a properties file.
    fn load_settings(&self, _path: &Path) -> ProviderResult<&Self> {
        Err(unsupported(self.id()))
    }

    /// # Errors
    ///
    /// [`ProviderError::IllegalState`] if already active, shutting down or shut down;
    /// otherwise whatever [`ProviderFactory::on_activate`] returns.
    fn activate(&self) -> ProviderResult<&Self> {
        self.lifecycle().activate(self.id(), || self.on_activate())?;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`ProviderError::IllegalState`] if not active, [`ProviderError::InvalidArgument`]
    /// for a negative grace time; otherwise whatever [`ProviderFactory::on_shutdown`]
    /// returns.
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

    fn create(&self) -> ProviderResult<Self::Provider> {
        Err(unsupported(self.id()))
    }

    /// Creates a provider parameterised by `value`, which the implementation downcasts.
    fn create_with(&self, _value: &dyn Any) -> ProviderResult<Self::Provider> {
        Err(unsupported(self.id()))
    }

    fn destroy(&self, _provider: Self::Provider) -> ProviderResult<()> {
        Err(unsupported(self.id()))
    }

    /// Tears `provider` down, allowing it `grace_time` to shut down.
    fn destroy_within(
        &self,
        _provider: Self::Provider,
        _grace_time: i64,
        _unit: TimeUnit,
    ) -> ProviderResult<()> {
        Err(unsupported(self.id()))
    }
}

fn unsupported(id: &str) -> ProviderError {
    ProviderError::Unsupported(format!(
        "{id}: factory feature not supported by this implementation"
    ))
}
