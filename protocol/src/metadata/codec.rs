//! Canonical `MPTokenMetadata` encoding.
//!
//! Encoding rewrites known keys to their compact names, at the top level and
//! inside each `uris` entry, serializes with keys in sorted order, and
//! hex-encodes the UTF-8 text in uppercase. Decoding reverses the key
//! rewrite. A field given under both of its names is left untouched in both
//! directions, as are unknown keys.

use serde_json::{Map, Value};

use super::fields::{FieldMapping, MPT_META_FIELDS, MPT_META_URI_FIELDS, URIS};
use crate::error::MetadataError;
use crate::transaction::predicates::is_hex;

#[derive(Debug, Clone, Copy)]
enum KeyForm {
    Long,
    Compact,
}

fn rename_keys(
    input: &Map<String, Value>,
    mappings: &[FieldMapping],
    form: KeyForm,
) -> Map<String, Value> {
    let mut output = Map::new();
    for (key, value) in input {
        let Some(mapping) = mappings.iter().find(|mapping| mapping.matches(key)) else {
            output.insert(key.clone(), value.clone());
            continue;
        };
        if input.contains_key(mapping.long) && input.contains_key(mapping.compact) {
            output.insert(key.clone(), value.clone());
            continue;
        }
        let renamed = match form {
            KeyForm::Long => mapping.long,
            KeyForm::Compact => mapping.compact,
        };
        output.insert(renamed.to_string(), value.clone());
    }
    output
}

/// Renames the keys of every object inside the `uris`/`us` arrays.
fn rename_uri_entries(document: &mut Map<String, Value>, form: KeyForm) {
    for key in [URIS.long, URIS.compact] {
        let Some(Value::Array(entries)) = document.get_mut(key) else {
            continue;
        };
        for entry in entries.iter_mut() {
            if let Value::Object(uri) = entry {
                *uri = rename_keys(uri, &MPT_META_URI_FIELDS, form);
            }
        }
    }
}

fn rename_document(document: &Map<String, Value>, form: KeyForm) -> Map<String, Value> {
    let mappings: Vec<FieldMapping> = MPT_META_FIELDS.iter().map(|field| field.names).collect();
    let mut output = rename_keys(document, &mappings, form);
    rename_uri_entries(&mut output, form);
    output
}

/// Encodes a metadata document to its canonical hex form.
///
/// Accepts long or compact key names (or a mix). Two documents that differ
/// only in naming or key order encode identically.
pub fn encode_mpt_metadata(metadata: &Value) -> Result<String, MetadataError> {
    let Value::Object(document) = metadata else {
        return Err(MetadataError::EncodeNotObject);
    };
    let compact = Value::Object(rename_document(document, KeyForm::Compact));
    // `Map` is ordered, so serialization already emits sorted keys.
    let text =
        serde_json::to_string(&compact).map_err(|e| MetadataError::Serialize(e.to_string()))?;
    Ok(hex::encode_upper(text))
}

/// Parses hex-encoded metadata into a JSON object without renaming keys.
pub(crate) fn parse_hex_document(input: &str) -> Result<Value, MetadataError> {
    let bytes = hex::decode(input).map_err(|_| MetadataError::NotHex)?;
    let text = String::from_utf8(bytes).map_err(|e| MetadataError::NotUtf8(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| MetadataError::InvalidJson(e.to_string()))
}

/// Decodes hex metadata into a document with long key names.
pub fn decode_mpt_metadata(input: &str) -> Result<Value, MetadataError> {
    if !is_hex(input) {
        return Err(MetadataError::NotHex);
    }
    let Value::Object(document) = parse_hex_document(input)? else {
        return Err(MetadataError::NotObject);
    };
    Ok(Value::Object(rename_document(&document, KeyForm::Long)))
}
