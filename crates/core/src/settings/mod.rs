//! # Settings
//!
//! A thread-safe bag of string properties with typed getters, plus a descriptor-driven
//! injector that populates [`Configurable`] targets from it.
//!
//! Keys are case-sensitive [`NonEmptyText`] stored exactly as given, surrounding
//! whitespace included; only blank keys are rejected. Loading merges: new keys are added and
//! existing keys overwritten.

mod properties;
mod property;

pub use properties::parse as parse_properties;
pub use property::{Configurable, EnumResolver, PropertyDescriptor, PropertyValue, SlotType};

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use toolbox_types::NonEmptyText;

use crate::formatter::boolean;
use crate::{CoreError, CoreResult};

/// An enum whose members can be looked up by name.
pub trait NamedEnum: Copy + Sized + 'static {
    fn variants() -> &'static [Self];

    fn name(&self) -> &'static str;

    /// Finds the member whose name matches `name`, ignoring ASCII case.
    fn from_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|member| member.name().eq_ignore_ascii_case(name))
    }
}

/// String-to-string property bag.
#[derive(Debug, Default)]
pub struct Settings {
    properties: RwLock<HashMap<NonEmptyText, String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bag from `(key, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if a key is blank.
    pub fn from_pairs<I, K, V>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let settings = Self::new();
        settings.load(entries)?;
        Ok(settings)
    }

    /// Merges properties read from a properties file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BackingStore`] if the file cannot be read and
    /// [`CoreError::InvalidSettings`] if its content is malformed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> CoreResult<&Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CoreError::BackingStore {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = parse_properties(&text)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "loading settings file");
        self.load(entries)
    }

    /// Merges `(key, value)` pairs, such as an existing `HashMap<String, String>`.
    ///
    /// Nothing is merged if any key is blank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if a key is blank.
    pub fn load<I, K, V>(&self, entries: I) -> CoreResult<&Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok((Self::key(key.as_ref())?, value.into())))
            .collect::<CoreResult<Vec<_>>>()?;
        tracing::debug!(entries = entries.len(), "merging settings");
        self.properties.write().extend(entries);
        Ok(self)
    }

    /// Sets one property, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `key` is blank.
    pub fn set(&self, key: &str, value: impl Into<String>) -> CoreResult<Option<String>> {
        let key = Self::key(key)?;
        Ok(self.properties.write().insert(key, value.into()))
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.properties.write().remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.read().is_empty()
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .properties
            .read()
            .keys()
            .map(|key| key.as_str().to_owned())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Copies the current properties into a plain map.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.properties
            .read()
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), value.clone()))
            .collect()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.properties.read().get(key).cloned()
    }

    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_owned())
    }

    /// Reads a 32-bit integer; `None` if absent or malformed.
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.get_string(key)?.trim().parse().ok()
    }

    /// Reads a 32-bit integer, falling back to `default` if absent or malformed.
    pub fn get_integer_or(&self, key: &str, default: i32) -> i32 {
        self.get_integer(key).unwrap_or(default)
    }

    /// Reads a 64-bit integer; `None` if absent or malformed.
    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get_string(key)?.trim().parse().ok()
    }

    pub fn get_long_or(&self, key: &str, default: i64) -> i64 {
        self.get_long(key).unwrap_or(default)
    }

    /// Reads a boolean.
    ///
    /// Returns `None` when the key is absent. A present value reads as `true` for
    /// `true`/`yes`/`on` and as `false` for anything else, ignoring case.
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        let value = self.get_string(key)?;
        Some(boolean::to_boolean(Some(value.trim())))
    }

    /// Reads a boolean, falling back to `default` if absent or not a recognised token.
    pub fn get_boolean_or(&self, key: &str, default: bool) -> bool {
        self.get_string(key)
            .and_then(|value| boolean::parse(value.trim()))
            .unwrap_or(default)
    }

    /// Reads an enum member by case-insensitive name; `None` if absent or unknown.
    pub fn get_enum<E: NamedEnum>(&self, key: &str) -> Option<E> {
        E::from_name(self.get_string(key)?.trim())
    }

    pub fn get_enum_or<E: NamedEnum>(&self, key: &str, default: E) -> E {
        self.get_enum(key).unwrap_or(default)
    }

    /// Populates `target` from this bag, slot by slot.
    ///
    /// For each descriptor the value under its resolved key (or else its default) is
    /// converted to the slot type and assigned. Absent nullable slots are assigned `None`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingProperty`] if a non-nullable slot has neither value nor default
    /// - [`CoreError::Conversion`] if a value or default does not convert
    /// - whatever [`Configurable::assign`] returns
    pub fn inject<'t, T: Configurable + ?Sized>(&self, target: &'t mut T) -> CoreResult<&'t mut T> {
        let descriptors = target.descriptors();
        for descriptor in &descriptors {
            let key = descriptor.resolved_key();
            let raw = self
                .get_string(key)
                .or_else(|| descriptor.default().map(str::to_owned));
            let value = raw.map(|raw| descriptor.convert(&raw)).transpose()?;
            if value.is_none() && !descriptor.is_nullable() {
                return Err(CoreError::MissingProperty(key.to_owned()));
            }
            target.assign(descriptor.slot(), value)?;
        }
        tracing::debug!(slots = descriptors.len(), "injected settings");
        Ok(target)
    }

    fn key(key: &str) -> CoreResult<NonEmptyText> {
        NonEmptyText::exact(key)
            .map_err(|_| CoreError::InvalidInput("settings key cannot be blank".into()))
    }
}
