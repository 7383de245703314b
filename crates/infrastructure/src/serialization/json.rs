//! Encoding for the token storage file and the config file.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// A file could not be encoded or decoded.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The value has no JSON form.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The file content is not the expected JSON.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// Encodes `value` as the bytes of a file on disk.
///
/// Two-space indentation and a trailing newline, so a token or config
/// file can be read and diffed by hand. Maps keep their own order, which
/// is sorted for the storage file's `BTreeMap` of entries.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON.
pub fn to_file_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Decodes a file written by [`to_file_bytes`], or any minified equivalent.
///
/// # Errors
///
/// Returns an error if the content is not valid JSON for `T`.
pub fn from_file_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct StoredEntries {
        schema_version: u32,
        entries: BTreeMap<String, String>,
    }

    #[test]
    fn test_storage_file_layout() {
        let file = StoredEntries {
            schema_version: 1,
            entries: BTreeMap::from([
                ("NimbleAuthToken".to_string(), "e30=".to_string()),
                ("Another".to_string(), "AP8=".to_string()),
            ]),
        };

        let text = String::from_utf8(to_file_bytes(&file).unwrap()).unwrap();

        assert_eq!(
            text,
            "{\n  \"schema_version\": 1,\n  \"entries\": {\n    \"Another\": \"AP8=\",\n    \"NimbleAuthToken\": \"e30=\"\n  }\n}\n"
        );
        assert_eq!(from_file_bytes::<StoredEntries>(text.as_bytes()).unwrap(), file);
    }

    #[test]
    fn test_reads_hand_written_minified_file() {
        let file: StoredEntries =
            from_file_bytes(br#"{"schema_version":1,"entries":{}}"#).unwrap();
        assert!(file.entries.is_empty());
    }

    #[test]
    fn test_truncated_file_is_deserialize_error() {
        let result = from_file_bytes::<StoredEntries>(br#"{"schema_version":1,"entr"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }

    #[test]
    fn test_non_string_map_keys_are_serialize_error() {
        let value = HashMap::from([((1, 2), "cell")]);
        assert!(matches!(
            to_file_bytes(&value),
            Err(SerializationError::Serialize(_))
        ));
    }
}
