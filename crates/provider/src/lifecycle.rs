//! Activation/shutdown state machine shared by providers and factories.
//!
//! ```text
//!             activate()                 shutdown(grace)
//! Inactive ──────────────▶ Active ─────────────────────────▶ Terminated
//!    │  ▲                   │  ▲
//!    ▼  │ hook failed       ▼  │ hook failed
//!  Activating            ShuttingDown
//! ```
//!
//! The state is a single atomic word advanced by compare-and-set, so concurrent callers
//! race for a transition and exactly one of them runs the hook. Observable flags:
//!
//! | state          | `is_active` | `is_shutdown_in_progress` |
//! |----------------|-------------|---------------------------|
//! | `Inactive`     | false       | false                     |
//! | `Activating`   | false       | false                     |
//! | `Active`       | true        | false                     |
//! | `ShuttingDown` | true        | true                      |
//! | `Terminated`   | false       | false                     |
//!
//! `Terminated` is final: a component that completed a shutdown cannot be activated
//! again.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use toolbox_core::TimeUnit;

use crate::{ProviderError, ProviderResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LifecycleState {
    Inactive = 0,
    Activating = 1,
    Active = 2,
    ShuttingDown = 3,
    Terminated = 4,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Inactive,
            1 => Self::Activating,
            2 => Self::Active,
            3 => Self::ShuttingDown,
            _ => Self::Terminated,
        }
    }
}

/// Atomic lifecycle state of one provider or factory.
#[derive(Debug)]
pub struct Lifecycle {
    state: AtomicU8,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(LifecycleState::Inactive as u8),
        }
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// True once activation succeeded and until a shutdown completes.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state(),
            LifecycleState::Active | LifecycleState::ShuttingDown
        )
    }

    pub fn is_shutdown_in_progress(&self) -> bool {
        self.state() == LifecycleState::ShuttingDown
    }

    pub fn is_terminated(&self) -> bool {
        self.state() == LifecycleState::Terminated
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> Result<(), LifecycleState> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(LifecycleState::from_u8)
    }

    fn set(&self, state: LifecycleState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Runs `hook` as the single `Inactive -> Active` transition.
    ///
    /// `is_active` turns true only after `hook` returns successfully. If the hook fails
    /// the state rolls back to `Inactive` and the error is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] if the component is active, activating,
    /// shutting down or terminated; otherwise whatever `hook` returns.
    pub fn activate<F>(&self, id: &str, hook: F) -> ProviderResult<()>
    where
        F: FnOnce() -> ProviderResult<()>,
    {
        if let Err(current) = self.transition(LifecycleState::Inactive, LifecycleState::Activating) {
            return Err(ProviderError::IllegalState(match current {
                LifecycleState::ShuttingDown => {
                    format!("{id}: illegal invocation; shutdown is already in progress")
                }
                LifecycleState::Terminated => {
                    format!("{id}: cannot activate after shutdown; create a new instance")
                }
                _ => format!("{id}: attempt to activate an already active object"),
            }));
        }

        match hook() {
            Ok(()) => {
                self.set(LifecycleState::Active);
                tracing::info!(id, "activated");
                Ok(())
            }
            Err(e) => {
                self.set(LifecycleState::Inactive);
                tracing::warn!(id, error = %e, "activation failed; rolled back");
                Err(e)
            }
        }
    }

    /// Runs `hook` as the single `Active -> Terminated` transition.
    ///
    /// The hook receives the grace budget and is expected to finish its housekeeping
    /// within it. If the hook fails the state returns to `Active` so shutdown can be
    /// retried. A call made while another shutdown is running returns `Ok` without
    /// running the hook.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::IllegalState`] if the component is not active
    /// - [`ProviderError::InvalidArgument`] if `grace_time` is negative
    /// - whatever `hook` returns
    pub fn shutdown<F>(&self, id: &str, grace_time: i64, unit: TimeUnit, hook: F) -> ProviderResult<()>
    where
        F: FnOnce(Duration) -> ProviderResult<()>,
    {
        if !self.is_active() {
            return Err(Self::non_active(id));
        }
        let grace = unit.to_duration(grace_time).ok_or_else(|| {
            ProviderError::InvalidArgument("invalid grace time value; cannot be negative".into())
        })?;

        match self.transition(LifecycleState::Active, LifecycleState::ShuttingDown) {
            Ok(()) => {}
            Err(LifecycleState::ShuttingDown) => {
                tracing::debug!(id, "skipped shutdown; already in progress");
                return Ok(());
            }
            Err(_) => return Err(Self::non_active(id)),
        }

        tracing::info!(id, grace_ms = grace.as_millis() as u64, "shutting down");
        match hook(grace) {
            Ok(()) => {
                self.set(LifecycleState::Terminated);
                tracing::info!(id, "shut down");
                Ok(())
            }
            Err(e) => {
                self.set(LifecycleState::Active);
                tracing::warn!(id, error = %e, "shutdown failed; still active");
                Err(e)
            }
        }
    }

    /// True while the activation hook runs and for as long as `is_active` is true.
    fn is_usable(&self) -> bool {
        matches!(
            self.state(),
            LifecycleState::Activating | LifecycleState::Active | LifecycleState::ShuttingDown
        )
    }

    fn non_active(id: &str) -> ProviderError {
        ProviderError::IllegalState(format!("{id}: attempt to use a non-active object"))
    }

    /// Passes once activation has started, so an activation hook may use the component's
    /// own guarded operations.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] unless the component is activating or active.
    pub fn check_active(&self, id: &str) -> ProviderResult<()> {
        if !self.is_usable() {
            return Err(Self::non_active(id));
        }
        Ok(())
    }

    /// For long-running operations that must stop once the component is gone.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AbortOperation`] unless the component is activating or
    /// active.
    pub fn check_abort_operation(&self, id: &str) -> ProviderResult<()> {
        if !self.is_usable() {
            return Err(ProviderError::AbortOperation(format!(
                "{id}: aborting execution; this object was deactivated"
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] while a shutdown is running.
    pub fn check_shutdown_in_progress(&self, id: &str) -> ProviderResult<()> {
        if self.is_shutdown_in_progress() {
            return Err(ProviderError::IllegalState(format!(
                "{id}: illegal invocation; shutdown is already in progress"
            )));
        }
        Ok(())
    }
}
