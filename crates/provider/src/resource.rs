//! Short-lived handles opened from a provider.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::{ProviderError, ProviderResult};

/// `Idle -> Opening -> Open -> Closing -> Closed`; `Closed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ResourceState {
    Idle = 0,
    Opening = 1,
    Open = 2,
    Closing = 3,
    Closed = 4,
}

impl ResourceState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Opening,
            2 => Self::Open,
            3 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

/// Atomic open/close state of one resource.
#[derive(Debug)]
pub struct ResourceLifecycle {
    state: AtomicU8,
}

impl Default for ResourceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLifecycle {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ResourceState::Idle as u8),
        }
    }

    pub fn state(&self) -> ResourceState {
        ResourceState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_open(&self) -> bool {
        self.state() == ResourceState::Open
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state(), ResourceState::Closing | ResourceState::Closed)
    }

    fn transition(&self, from: ResourceState, to: ResourceState) -> Result<(), ResourceState> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(ResourceState::from_u8)
    }

    fn set(&self, state: ResourceState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Runs `hook` as the single `Idle -> Open` transition, rolling back to `Idle` if it
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] if the resource was already opened or is
    /// closing; otherwise whatever `hook` returns.
    pub fn open<F>(&self, id: &str, hook: F) -> ProviderResult<()>
    where
        F: FnOnce() -> ProviderResult<()>,
    {
        if let Err(current) = self.transition(ResourceState::Idle, ResourceState::Opening) {
            return Err(ProviderError::IllegalState(match current {
                ResourceState::Closing | ResourceState::Closed => {
                    format!("{id}: illegal invocation; closing is already in progress")
                }
                _ => format!("{id}: attempt to open an already open resource"),
            }));
        }

        match hook() {
            Ok(()) => {
                self.set(ResourceState::Open);
                tracing::debug!(id, "resource opened");
                Ok(())
            }
            Err(e) => {
                self.set(ResourceState::Idle);
                tracing::warn!(id, error = %e, "could not open resource");
                Err(e)
            }
        }
    }

    /// Closes the resource, running `hook` only if it was open.
    ///
    /// The state ends in `Closed` even when `hook` fails; the failure is still returned.
    /// Closing an already closing or closed resource is a no-op, and closing one that
    /// was never opened marks it closed without running `hook`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] while an open is in flight; otherwise
    /// whatever `hook` returns.
    pub fn close<F>(&self, id: &str, hook: F) -> ProviderResult<()>
    where
        F: FnOnce() -> ProviderResult<()>,
    {
        loop {
            match self.state() {
                ResourceState::Closing | ResourceState::Closed => return Ok(()),
                ResourceState::Opening => {
                    return Err(ProviderError::IllegalState(format!(
                        "{id}: cannot close a resource while it is opening"
                    )))
                }
                ResourceState::Idle => {
                    if self.transition(ResourceState::Idle, ResourceState::Closed).is_ok() {
                        return Ok(());
                    }
                }
                ResourceState::Open => {
                    if self.transition(ResourceState::Open, ResourceState::Closing).is_ok() {
                        break;
                    }
                }
            }
        }

        let result = hook();
        self.set(ResourceState::Closed);
        match &result {
            Ok(()) => tracing::debug!(id, "resource closed"),
            Err(e) => tracing::warn!(id, error = %e, "resource closed with errors"),
        }
        result
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] unless the resource is open.
    pub fn check_open(&self, id: &str) -> ProviderResult<()> {
        if !self.is_open() {
            return Err(ProviderError::IllegalState(format!(
                "{id}: attempt to use a non-open resource"
            )));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::IllegalState`] once closing has started.
    pub fn check_closing(&self, id: &str) -> ProviderResult<()> {
        if self.is_closing() {
            return Err(ProviderError::IllegalState(format!(
                "{id}: illegal invocation; closing is already in progress"
            )));
        }
        Ok(())
    }
}

/// A handle owned by exactly one provider.
///
/// Implementors supply the state holder and the two hooks; `open`, `close` and `is_open`
/// come for free.
pub trait Resource: Send + Sync {
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn lifecycle(&self) -> &ResourceLifecycle;

    fn on_open(&self) -> ProviderResult<()>;

    fn on_close(&self) -> ProviderResult<()>;

    fn open(&self) -> ProviderResult<()> {
        self.lifecycle().open(self.id(), || self.on_open())
    }

    fn close(&self) -> ProviderResult<()> {
        self.lifecycle().close(self.id(), || self.on_close())
    }

    fn is_open(&self) -> bool {
        self.lifecycle().is_open()
    }
}

impl<R: Resource + ?Sized> Resource for std::sync::Arc<R> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn lifecycle(&self) -> &ResourceLifecycle {
        (**self).lifecycle()
    }

    fn on_open(&self) -> ProviderResult<()> {
        (**self).on_open()
    }

    fn on_close(&self) -> ProviderResult<()> {
        (**self).on_close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct Channel {
        lifecycle: ResourceLifecycle,
        fail_open: bool,
        fail_close: bool,
        closes: AtomicUsize,
    }

    impl Resource for Channel {
        fn id(&self) -> &str {
            "channel"
        }

        fn lifecycle(&self) -> &ResourceLifecycle {
            &self.lifecycle
        }

        fn on_open(&self) -> ProviderResult<()> {
            if self.fail_open {
                return Err(ProviderError::OperationTimeout("connect".into()));
            }
            Ok(())
        }

        fn on_close(&self) -> ProviderResult<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                return Err(ProviderError::failed("flush failed"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_open_close() {
        let channel = Channel::default();
        channel.open().unwrap();
        assert!(channel.is_open());
        assert!(channel.lifecycle().check_open("channel").is_ok());

        let err = channel.open().unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::IllegalState);

        channel.close().unwrap();
        assert!(!channel.is_open());
        assert_eq!(channel.lifecycle().state(), ResourceState::Closed);
    }

    #[test]
    fn test_close_is_idempotent() {
        let channel = Channel::default();
        channel.open().unwrap();
        channel.close().unwrap();
        channel.close().unwrap();
        channel.close().unwrap();
        assert_eq!(channel.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_open_rolls_back() {
        let channel = Channel {
            fail_open: true,
            ..Channel::default()
        };
        let err = channel.open().unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::OperationTimeout);
        assert_eq!(channel.lifecycle().state(), ResourceState::Idle);
        assert!(!channel.is_open());
    }

    #[test]
    fn test_failed_close_still_closes() {
        let channel = Channel {
            fail_close: true,
            ..Channel::default()
        };
        channel.open().unwrap();
        assert!(channel.close().is_err());
        assert!(!channel.is_open());
        assert!(channel.close().is_ok());
        assert_eq!(channel.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_closed_resource_cannot_reopen() {
        let channel = Channel::default();
        channel.open().unwrap();
        channel.close().unwrap();
        let err = channel.open().unwrap_err();
        assert_eq!(err.kind(), ProviderErrorKind::IllegalState);
        assert!(channel.lifecycle().check_closing("channel").is_err());
    }

    #[test]
    fn test_close_before_open() {
        let channel = Channel::default();
        channel.close().unwrap();
        assert_eq!(channel.closes.load(Ordering::SeqCst), 0);
        assert_eq!(channel.lifecycle().state(), ResourceState::Closed);
        assert!(channel.open().is_err());
    }

    #[test]
    fn test_close_during_open_rejected() {
        let lifecycle = ResourceLifecycle::new();
        lifecycle
            .open("r", || {
                let err = lifecycle.close("r", || Ok(())).unwrap_err();
                assert_eq!(err.kind(), ProviderErrorKind::IllegalState);
                assert!(lifecycle.check_open("r").is_err());
                Ok(())
            })
            .unwrap();
        assert!(lifecycle.is_open());
    }

    #[test]
    fn test_concurrent_close_runs_hook_once() {
        let channel = std::sync::Arc::new(Channel::default());
        channel.open().unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let channel = channel.clone();
                std::thread::spawn(move || channel.close())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(channel.closes.load(Ordering::SeqCst), 1);
        assert!(!channel.is_open());
    }
}
