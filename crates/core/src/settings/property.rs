//! Property descriptors consumed by [`Settings::inject`](super::Settings::inject).

use std::fmt;

use super::NamedEnum;
use crate::constants::DEFAULT_DELIMITERS;
use crate::{CoreError, CoreResult};

/// Resolves a raw string to the canonical member name of an enum, ignoring case.
pub type EnumResolver = fn(&str) -> Option<&'static str>;

/// Static type of an injectable slot.
#[derive(Clone, Copy)]
pub enum SlotType {
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    Boolean,
    Enum {
        type_name: &'static str,
        resolve: EnumResolver,
    },
    /// Tokens split on the descriptor's delimiter set.
    List,
}

impl SlotType {
    /// Slot type for the enum `E`; values are matched against its member names.
    pub fn enumeration<E: NamedEnum>() -> Self {
        SlotType::Enum {
            type_name: std::any::type_name::<E>(),
            resolve: |raw| E::from_name(raw).map(|member| member.name()),
        }
    }
}

impl fmt::Debug for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotType::String => f.write_str("String"),
            SlotType::Integer => f.write_str("Integer"),
            SlotType::Long => f.write_str("Long"),
            SlotType::Boolean => f.write_str("Boolean"),
            SlotType::Enum { type_name, .. } => write!(f, "Enum({type_name})"),
            SlotType::List => f.write_str("List"),
        }
    }
}

/// A converted value handed to [`Configurable::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    String(String),
    Integer(i32),
    Long(i64),
    Boolean(bool),
    /// Canonical member name of the enum.
    Enum(&'static str),
    List(Vec<String>),
}

impl PropertyValue {
    pub fn into_string(self) -> Option<String> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer slots widen losslessly into longs.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(value) => Some(*value),
            PropertyValue::Integer(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_enum<E: NamedEnum>(&self) -> Option<E> {
        match self {
            PropertyValue::Enum(name) => E::from_name(name),
            _ => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            PropertyValue::List(values) => Some(values),
            _ => None,
        }
    }
}

/// Describes one injectable slot of a [`Configurable`] target.
///
/// ```
/// use toolbox_core::settings::PropertyDescriptor;
///
/// let port = PropertyDescriptor::integer("port").key("server.port").default_value("8080");
/// assert_eq!(port.resolved_key(), "server.port");
/// assert!(port.is_nullable());
/// ```
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    slot: String,
    key: Option<String>,
    slot_type: SlotType,
    default: Option<String>,
    nullable: bool,
    delimiters: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(slot: impl Into<String>, slot_type: SlotType) -> Self {
        Self {
            slot: slot.into(),
            key: None,
            slot_type,
            default: None,
            nullable: true,
            delimiters: None,
        }
    }

    pub fn string(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::String)
    }

    pub fn integer(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::Integer)
    }

    pub fn long(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::Long)
    }

    pub fn boolean(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::Boolean)
    }

    pub fn enumeration<E: NamedEnum>(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::enumeration::<E>())
    }

    pub fn list(slot: impl Into<String>) -> Self {
        Self::new(slot, SlotType::List)
    }

    /// Reads the slot from `key` instead of the slot name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Shorthand for `nullable(false)`.
    pub fn required(self) -> Self {
        self.nullable(false)
    }

    pub fn delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = Some(delimiters.into());
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// The settings key: the explicit key if one was given, otherwise the slot name.
    pub fn resolved_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.slot)
    }

    pub fn slot_type(&self) -> SlotType {
        self.slot_type
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn delimiter_set(&self) -> &str {
        self.delimiters.as_deref().unwrap_or(DEFAULT_DELIMITERS)
    }

    /// Converts a raw string according to the slot type.
    ///
    /// Unrecognised boolean tokens read as `false`. List values drop empty tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Conversion`] for malformed numbers and unknown enum members.
    pub fn convert(&self, raw: &str) -> CoreResult<PropertyValue> {
        let value = match self.slot_type {
            SlotType::String => PropertyValue::String(raw.to_owned()),
            SlotType::Integer => PropertyValue::Integer(
                raw.trim()
                    .parse::<i32>()
                    .map_err(|e| self.conversion_error(raw, Some(Box::new(e))))?,
            ),
            SlotType::Long => PropertyValue::Long(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|e| self.conversion_error(raw, Some(Box::new(e))))?,
            ),
            SlotType::Boolean => {
                PropertyValue::Boolean(crate::formatter::boolean::to_boolean(Some(raw.trim())))
            }
            SlotType::Enum { resolve, .. } => PropertyValue::Enum(
                resolve(raw.trim()).ok_or_else(|| self.conversion_error(raw, None))?,
            ),
            SlotType::List => {
                let delimiters = self.delimiter_set();
                PropertyValue::List(
                    raw.split(|c: char| delimiters.contains(c))
                        .filter(|token| !token.is_empty())
                        .map(str::to_owned)
                        .collect(),
                )
            }
        };
        Ok(value)
    }

    fn conversion_error(
        &self,
        raw: &str,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> CoreError {
        CoreError::Conversion {
            property: self.resolved_key().to_owned(),
            reason: format!("'{raw}' is not a valid {:?}", self.slot_type),
            source,
        }
    }
}

/// A target whose slots can be populated from [`Settings`](super::Settings).
///
/// `descriptors` enumerates the slots; `assign` stores one converted value. `None` is
/// passed for absent nullable slots so the target can clear them.
pub trait Configurable {
    fn descriptors(&self) -> Vec<PropertyDescriptor>;

    /// # Errors
    ///
    /// Implementations return [`CoreError::Conversion`] when the value does not fit the
    /// slot.
    fn assign(&mut self, slot: &str, value: Option<PropertyValue>) -> CoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Level {
        Low,
        High,
    }

    impl NamedEnum for Level {
        fn variants() -> &'static [Self] {
            &[Level::Low, Level::High]
        }

        fn name(&self) -> &'static str {
            match self {
                Level::Low => "LOW",
                Level::High => "HIGH",
            }
        }
    }

    #[test]
    fn test_defaults() {
        let descriptor = PropertyDescriptor::list("hosts");
        assert_eq!(descriptor.resolved_key(), "hosts");
        assert_eq!(descriptor.delimiter_set(), DEFAULT_DELIMITERS);
        assert!(descriptor.is_nullable());
        assert_eq!(descriptor.default(), None);
        assert!(!descriptor.required().is_nullable());
    }

    #[test]
    fn test_convert_numbers() {
        let int = PropertyDescriptor::integer("port");
        assert_eq!(int.convert(" 8080 ").unwrap(), PropertyValue::Integer(8080));
        let err = int.convert("80x").unwrap_err();
        assert!(err.is_invalid_input());
        assert!(std::error::Error::source(&err).is_some());

        let long = PropertyDescriptor::long("size");
        assert_eq!(
            long.convert("4294967296").unwrap().as_long(),
            Some(4_294_967_296)
        );
        assert!(int.convert("4294967296").is_err());
    }

    #[test]
    fn test_convert_boolean_is_lenient() {
        let flag = PropertyDescriptor::boolean("enabled");
        assert_eq!(flag.convert("YES").unwrap(), PropertyValue::Boolean(true));
        assert_eq!(flag.convert("maybe").unwrap(), PropertyValue::Boolean(false));
    }

    #[test]
    fn test_convert_enum() {
        let level = PropertyDescriptor::enumeration::<Level>("level");
        let value = level.convert("high").unwrap();
        assert_eq!(value, PropertyValue::Enum("HIGH"));
        assert_eq!(value.as_enum::<Level>(), Some(Level::High));
        assert!(matches!(
            level.convert("medium"),
            Err(CoreError::Conversion { .. })
        ));
    }

    #[test]
    fn test_convert_list_skips_empty_tokens() {
        let hosts = PropertyDescriptor::list("hosts");
        assert_eq!(
            hosts.convert("a, b;;c\nd").unwrap().into_list(),
            Some(vec!["a".into(), "b".into(), "c".into(), "d".into()])
        );

        let custom = PropertyDescriptor::list("paths").delimiters("|");
        assert_eq!(
            custom.convert("/a b|/c").unwrap().into_list(),
            Some(vec!["/a b".into(), "/c".into()])
        );
    }
}
