//! Field-name mapping between internal identifiers and wire names.
//!
//! Internal field identifiers are a short per-record prefix followed by a
//! capitalized logical name, e.g. `ccrMaxTokens`. The wire name drops the
//! prefix and converts the rest to snake_case: `max_tokens`.
//!
//! Runs of uppercase letters are one word, so `ID` maps to `id` and
//! `FileID` to `file_id` rather than `file_i_d`. A lone lowercase `s` closing
//! an acronym pluralizes it, so `FileIDs` maps to `file_ids`. Digits never
//! start a word: `Top5` maps to `top5`, while `Gpt3Model` maps to `gpt3_model`.

use std::collections::HashMap;
use thiserror::Error;

/// Reasons a field name cannot be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldNameError {
    #[error("field `{field}` is not longer than its {prefix_len}-character prefix boundary")]
    PrefixTooLong { field: String, prefix_len: usize },

    #[error("field `{field}` has an empty logical name after its prefix")]
    EmptyLogicalName { field: String },

    #[error("field `{field}` contains `{character}`, which has no wire form")]
    InvalidCharacter { field: String, character: char },

    #[error("field `{field}` does not share the prefix `{expected}`")]
    PrefixMismatch { field: String, expected: String },

    #[error("fields `{first}` and `{second}` both map to wire name `{wire}`")]
    Collision {
        first: String,
        second: String,
        wire: String,
    },
}

/// Map an internal field identifier to its wire name.
///
/// `prefix_len` is the number of leading bytes shared by every field of the
/// record type; they are stripped before the snake_case conversion.
pub fn wire_name(internal: &str, prefix_len: usize) -> Result<String, FieldNameError> {
    if prefix_len > internal.len() || !internal.is_char_boundary(prefix_len) {
        return Err(FieldNameError::PrefixTooLong {
            field: internal.to_string(),
            prefix_len,
        });
    }

    let logical = &internal[prefix_len..];
    if logical.is_empty() {
        return Err(FieldNameError::EmptyLogicalName {
            field: internal.to_string(),
        });
    }

    if let Some(character) = logical.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(FieldNameError::InvalidCharacter {
            field: internal.to_string(),
            character,
        });
    }

    Ok(camel_to_snake(logical))
}

/// Convert a camel-cased ASCII identifier to snake_case.
fn camel_to_snake(logical: &str) -> String {
    let chars: Vec<char> = logical.chars().collect();
    let mut out = String::with_capacity(logical.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && starts_word(&chars, i) {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Whether the uppercase letter at `i` opens a new word.
fn starts_word(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    if prev.is_ascii_lowercase() || prev.is_ascii_digit() {
        return true;
    }
    // Last capital of an acronym run begins the next word: `APIKey` -> api_key.
    prev.is_ascii_uppercase()
        && chars
            .get(i + 1)
            .is_some_and(|next| next.is_ascii_lowercase())
        && !pluralizes_acronym(chars, i)
}

/// `IDs`, `URLs`: the `s` after position `i` ends the word on its own.
fn pluralizes_acronym(chars: &[char], i: usize) -> bool {
    chars.get(i + 1) == Some(&'s')
        && chars
            .get(i + 2)
            .map_or(true, |after| after.is_ascii_uppercase() || after.is_ascii_digit())
}

/// The mapped field set of one record type.
///
/// Building a table checks that every field carries the same prefix and that
/// no two fields share a wire name, so lookups are unambiguous both ways.
#[derive(Debug, Clone)]
pub struct FieldTable {
    prefix_len: usize,
    entries: Vec<(&'static str, String)>,
    by_wire: HashMap<String, usize>,
}

impl FieldTable {
    pub fn new(prefix_len: usize, fields: &[&'static str]) -> Result<Self, FieldNameError> {
        let mut entries: Vec<(&'static str, String)> = Vec::with_capacity(fields.len());
        let mut by_wire: HashMap<String, usize> = HashMap::with_capacity(fields.len());
        let prefix = fields.first().and_then(|f| f.get(..prefix_len));

        for &field in fields {
            let wire = wire_name(field, prefix_len)?;

            if let Some(expected) = prefix {
                if !field.starts_with(expected) {
                    return Err(FieldNameError::PrefixMismatch {
                        field: field.to_string(),
                        expected: expected.to_string(),
                    });
                }
            }

            if let Some(&existing) = by_wire.get(&wire) {
                let (first, _) = &entries[existing];
                return Err(FieldNameError::Collision {
                    first: first.to_string(),
                    second: field.to_string(),
                    wire,
                });
            }

            by_wire.insert(wire.clone(), entries.len());
            entries.push((field, wire));
        }

        Ok(Self {
            prefix_len,
            entries,
            by_wire,
        })
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wire name of an internal field, if the field belongs to this table.
    pub fn wire_name_of(&self, internal: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(field, _)| *field == internal)
            .map(|(_, wire)| wire.as_str())
    }

    /// Internal field for a wire name; `None` for names this record does not know.
    pub fn internal_for(&self, wire: &str) -> Option<&'static str> {
        self.by_wire.get(wire).map(|&idx| self.entries[idx].0)
    }

    pub fn contains_wire(&self, wire: &str) -> bool {
        self.by_wire.contains_key(wire)
    }

    /// Wire names in declaration order.
    pub fn wire_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, wire)| wire.as_str())
    }

    /// Internal names in declaration order.
    pub fn internal_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }
}
