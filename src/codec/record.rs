//! Record encoding and decoding driven by per-type field tables.

use super::naming::FieldTable;
use crate::error::{OpenAIError, OpenAIResult};
use crate::logging::log_trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A request or response body whose top-level fields are described by a
/// prefixed field table.
///
/// Implement it with [`wire_record!`](crate::wire_record) rather than by hand.
pub trait WireRecord {
    /// Prefix shared by every internal field name of this record.
    const FIELD_PREFIX: &'static str;

    /// Internal field names, prefix included.
    const FIELDS: &'static [&'static str];

    /// Build the field table for this record type.
    fn field_table() -> OpenAIResult<FieldTable> {
        FieldTable::new(Self::FIELD_PREFIX.len(), Self::FIELDS).map_err(|e| {
            OpenAIError::encoding_error(format!(
                "invalid field table for {}: {e}",
                std::any::type_name::<Self>()
            ))
        })
    }
}

/// Implement [`WireRecord`] from a prefix and the record's logical field names.
///
/// ```rust,ignore
/// wire_record!(CompletionCreate, "ccr", ["Model", "Prompt", "MaxTokens"]);
/// // FIELDS == ["ccrModel", "ccrPrompt", "ccrMaxTokens"]
/// ```
#[macro_export]
macro_rules! wire_record {
    ($ty:ty, $prefix:literal, [$($field:literal),* $(,)?]) => {
        impl $crate::codec::WireRecord for $ty {
            const FIELD_PREFIX: &'static str = $prefix;
            const FIELDS: &'static [&'static str] = &[$(concat!($prefix, $field)),*];
        }
    };
}

/// Encode a record into its JSON wire form.
///
/// Absent optional fields are omitted. Every emitted key must resolve through
/// the record's field table.
pub fn encode<T>(record: &T) -> OpenAIResult<Value>
where
    T: WireRecord + Serialize,
{
    let table = T::field_table()?;
    let value = serde_json::to_value(record)
        .map_err(|e| OpenAIError::encoding_error(format!("failed to serialize record: {e}")))?;

    if let Value::Object(map) = &value {
        if let Some(unmapped) = map.keys().find(|key| !table.contains_wire(key)) {
            return Err(OpenAIError::encoding_error(format!(
                "{} emitted `{unmapped}`, which is not in its field table",
                std::any::type_name::<T>()
            )));
        }
    }

    Ok(value)
}

/// Encode a record straight to bytes.
pub fn encode_to_vec<T>(record: &T) -> OpenAIResult<Vec<u8>>
where
    T: WireRecord + Serialize,
{
    let value = encode(record)?;
    serde_json::to_vec(&value)
        .map_err(|e| OpenAIError::encoding_error(format!("failed to write JSON: {e}")))
}

/// Decode a record from a JSON body.
///
/// Top-level keys unknown to the record's field table are ignored. A missing
/// required field is a [`OpenAIError::ResponseParsingError`].
pub fn decode<T>(body: &[u8]) -> OpenAIResult<T>
where
    T: WireRecord + DeserializeOwned,
{
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| OpenAIError::response_parsing_error(format!("invalid JSON: {e}")))?;
    decode_value(value)
}

/// Decode a record from an already-parsed JSON value.
pub fn decode_value<T>(value: Value) -> OpenAIResult<T>
where
    T: WireRecord + DeserializeOwned,
{
    let table = T::field_table()?;
    let value = match value {
        Value::Object(map) => Value::Object(retain_known_fields::<T>(&table, map)),
        other => other,
    };

    serde_json::from_value(value).map_err(|e| {
        OpenAIError::response_parsing_error(format!(
            "failed to decode {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}

fn retain_known_fields<T>(table: &FieldTable, map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(key, _)| {
            let known = table.internal_for(key).is_some();
            if !known {
                log_trace!(
                    record = std::any::type_name::<T>(),
                    field = %key,
                    "Ignoring unknown wire field"
                );
            }
            known
        })
        .collect()
}
