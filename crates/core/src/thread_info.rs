//! Per-thread key/value scratchpad.
//!
//! Each thread owns at most one bound [`ThreadInfo`]. It lives in thread-local storage, so
//! it is released automatically when the thread exits; [`ThreadInfo::unbind`] drops it
//! earlier. Handles are `!Send` and cannot leak a map into another thread.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

thread_local! {
    static CURRENT: RefCell<Option<ThreadInfo>> = const { RefCell::new(None) };
}

/// Handle to the calling thread's scratchpad.
///
/// Cloning the handle shares the same map.
#[derive(Clone, Default)]
pub struct ThreadInfo {
    map: Rc<RefCell<HashMap<String, Box<dyn Any>>>>,
}

impl ThreadInfo {
    /// Returns the scratchpad bound to this thread, creating one on first use.
    pub fn current() -> ThreadInfo {
        CURRENT.with(|slot| slot.borrow_mut().get_or_insert_with(ThreadInfo::default).clone())
    }

    /// Binds a fresh, empty scratchpad to this thread and returns it.
    ///
    /// Handles obtained earlier keep the previous map but it is no longer reachable
    /// through [`ThreadInfo::current`].
    pub fn reset() -> ThreadInfo {
        let fresh = ThreadInfo::default();
        CURRENT.with(|slot| *slot.borrow_mut() = Some(fresh.clone()));
        fresh
    }

    /// Drops this thread's binding.
    pub fn unbind() {
        CURRENT.with(|slot| slot.borrow_mut().take());
    }

    /// Returns true if this thread currently has a bound scratchpad.
    pub fn is_bound() -> bool {
        CURRENT.with(|slot| slot.borrow().is_some())
    }

    pub fn put<V: Any>(&self, key: impl Into<String>, value: V) -> &Self {
        self.map.borrow_mut().insert(key.into(), Box::new(value));
        self
    }

    /// Returns a copy of the value under `key` if present and of type `V`.
    pub fn get<V: Any + Clone>(&self, key: &str) -> Option<V> {
        self.map
            .borrow()
            .get(key)
            .and_then(|value| value.downcast_ref::<V>())
            .cloned()
    }

    /// Removes the value under `key`, returning it if it was of type `V`.
    pub fn remove<V: Any>(&self, key: &str) -> Option<V> {
        let value = self.map.borrow_mut().remove(key)?;
        value.downcast::<V>().ok().map(|boxed| *boxed)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    pub fn clear(&self) -> &Self {
        self.map.borrow_mut().clear();
        self
    }
}

impl std::fmt::Debug for ThreadInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let map = self.map.borrow();
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        f.debug_struct("ThreadInfo").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_is_lazy_and_stable() {
        ThreadInfo::unbind();
        assert!(!ThreadInfo::is_bound());

        ThreadInfo::current().put("request", 42u32);
        assert!(ThreadInfo::is_bound());
        assert_eq!(ThreadInfo::current().get::<u32>("request"), Some(42));
    }

    #[test]
    fn test_get_checks_type() {
        let info = ThreadInfo::reset();
        info.put("name", String::from("svc"));
        assert_eq!(info.get::<String>("name").as_deref(), Some("svc"));
        assert_eq!(info.get::<u64>("name"), None);
        assert_eq!(info.get::<String>("missing"), None);
    }

    #[test]
    fn test_reset_replaces_map() {
        let old = ThreadInfo::reset();
        old.put("k", 1i32);
        let fresh = ThreadInfo::reset();
        assert!(fresh.is_empty());
        assert!(!ThreadInfo::current().contains("k"));
        assert_eq!(old.get::<i32>("k"), Some(1));
    }

    #[test]
    fn test_remove_and_clear() {
        let info = ThreadInfo::reset();
        info.put("a", 1u8).put("b", 2u8);
        assert_eq!(info.remove::<u8>("a"), Some(1));
        assert_eq!(info.len(), 1);
        info.clear();
        assert!(info.is_empty());
    }

    #[test]
    fn test_unbind_forgets_values() {
        ThreadInfo::current().put("tx", "abc");
        ThreadInfo::unbind();
        assert!(!ThreadInfo::is_bound());
        assert!(!ThreadInfo::current().contains("tx"));
    }

    #[test]
    fn test_threads_are_isolated() {
        ThreadInfo::reset().put("owner", "main");
        let seen = std::thread::spawn(|| ThreadInfo::current().get::<&str>("owner"))
            .join()
            .unwrap();
        assert_eq!(seen, None);
        assert_eq!(ThreadInfo::current().get::<&str>("owner"), Some("main"));
    }
}
