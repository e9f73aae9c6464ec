//! JSON serializer facade: deflate values to bytes, inflate them back, deep-clone.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{CoreError, CoreResult};

/// Byte-level serialization of arbitrary serde values.
pub trait Serializer {
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if the value cannot be encoded.
    fn deflate<T: Serialize + ?Sized>(&self, value: &T) -> CoreResult<Vec<u8>>;

    /// Decodes `bytes` as a `T`; malformed input yields `None`.
    fn inflate<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T>;

    /// Deep copy through the wire form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if the value does not survive the round trip.
    fn clone_value<T: Serialize + DeserializeOwned>(&self, value: &T) -> CoreResult<T> {
        let bytes = self.deflate(value)?;
        self.inflate(&bytes).ok_or_else(|| {
            CoreError::InvalidState("serialized value could not be read back".into())
        })
    }
}

/// [`Serializer`] producing compact UTF-8 JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Serializer for JsonSerializer {
    fn deflate<T: Serialize + ?Sized>(&self, value: &T) -> CoreResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(CoreError::Serialization)
    }

    fn inflate<T: DeserializeOwned>(&self, bytes: &[u8]) -> Option<T> {
        match serde_json::from_slice(bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "could not inflate value");
                None
            }
        }
    }

    fn clone_value<T: Serialize + DeserializeOwned>(&self, value: &T) -> CoreResult<T> {
        let tree = serde_json::to_value(value).map_err(CoreError::Serialization)?;
        serde_json::from_value(tree).map_err(CoreError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Node {
        name: String,
        weight: i64,
        children: Vec<Node>,
        tags: BTreeMap<String, String>,
    }

    fn tree() -> Node {
        let leaf = |name: &str| Node {
            name: name.into(),
            weight: 1,
            children: Vec::new(),
            tags: BTreeMap::new(),
        };
        Node {
            name: "root".into(),
            weight: -3,
            children: vec![leaf("a"), leaf("b")],
            tags: BTreeMap::from([("env".to_owned(), "test".to_owned())]),
        }
    }

    #[test]
    fn test_deflate_is_json() {
        let bytes = JsonSerializer.deflate(&vec![1, 2, 3]).unwrap();
        assert_eq!(bytes, b"[1,2,3]");
        let bytes = JsonSerializer.deflate("text").unwrap();
        assert_eq!(bytes, b"\"text\"");
    }

    #[test]
    fn test_inflate_round_trip() {
        let serializer = JsonSerializer::new();
        let bytes = serializer.deflate(&tree()).unwrap();
        assert_eq!(serializer.inflate::<Node>(&bytes), Some(tree()));
    }

    #[test]
    fn test_inflate_malformed_is_none() {
        assert_eq!(JsonSerializer.inflate::<Node>(b"{not json"), None);
        assert_eq!(JsonSerializer.inflate::<u8>(b"300"), None);
        assert_eq!(JsonSerializer.inflate::<Node>(b""), None);
    }

    #[test]
    fn test_clone_value_is_deep() {
        let original = tree();
        let mut copy = JsonSerializer.clone_value(&original).unwrap();
        assert_eq!(copy, original);
        copy.children[0].name = "changed".into();
        assert_eq!(original.children[0].name, "a");
    }

    #[test]
    fn test_deflate_error() {
        let map = BTreeMap::from([((1, 2), "tuple keys are not JSON")]);
        assert!(matches!(
            JsonSerializer.deflate(&map),
            Err(CoreError::Serialization(_))
        ));
    }
}
