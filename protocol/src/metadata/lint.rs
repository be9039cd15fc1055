//! XLS-89 conformance lint.
//!
//! Conformance is advisory: ledgers accept any metadata bytes, but explorers
//! and indexers only understand documents that follow the standard. The
//! linter therefore reports findings as plain strings and never fails.

use serde_json::{Map, Value};
use tracing::warn;

use super::codec::parse_hex_document;
use super::fields::{
    FieldMapping, MetaField, MetaRule, ASSET_CLASSES, ASSET_SUBCLASSES, MPT_META_FIELDS,
    MPT_META_URI_FIELDS, REAL_WORLD_ASSET,
};
use crate::config::{MAX_MPT_META_BYTE_LENGTH, MPT_META_WARNING_HEADER};
use crate::error::MetadataError;
use crate::transaction::predicates::is_hex;

const MAX_TICKER_LENGTH: usize = 6;

/// How a field appears in a document.
struct Lookup<'a> {
    /// Both names carry a non-null value.
    both: bool,
    /// Either name is a key, `null` included.
    present: bool,
    /// The first non-null value, long name first.
    value: Option<&'a Value>,
}

fn lookup<'a>(document: &'a Map<String, Value>, names: &FieldMapping) -> Lookup<'a> {
    let long = document.get(names.long).filter(|value| !value.is_null());
    let compact = document.get(names.compact).filter(|value| !value.is_null());
    Lookup {
        both: long.is_some() && compact.is_some(),
        present: document.contains_key(names.long) || document.contains_key(names.compact),
        value: long.or(compact),
    }
}

fn is_ticker(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).map_or(false, |ticker| {
        (1..=MAX_TICKER_LENGTH).contains(&ticker.len())
            && ticker
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    })
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).map_or(false, |text| !text.is_empty())
}

fn is_one_of(value: Option<&Value>, allowed: &[&str]) -> bool {
    value
        .and_then(Value::as_str)
        .map_or(false, |text| allowed.contains(&text))
}

fn is_real_world_asset(document: &Map<String, Value>) -> bool {
    ["asset_class", "ac"]
        .iter()
        .any(|key| document.get(*key).and_then(Value::as_str) == Some(REAL_WORLD_ASSET))
}

fn lint_uri_entry(label: &str, entry: &Value, messages: &mut Vec<String>) {
    let Some(uri) = entry
        .as_object()
        .filter(|uri| uri.len() == MPT_META_URI_FIELDS.len())
    else {
        messages.push(format!(
            "{}: should be an array of objects each with uri/u, category/c, and title/t properties.",
            label
        ));
        return;
    };

    let present = |key: &str| uri.get(key).map_or(false, |value| !value.is_null());
    if let Some(names) = MPT_META_URI_FIELDS
        .iter()
        .find(|names| present(names.long) && present(names.compact))
    {
        messages.push(format!(
            "{}: should not have both {} and {} fields.",
            label, names.long, names.compact
        ));
    }

    let complete = MPT_META_URI_FIELDS
        .iter()
        .all(|names| lookup(uri, names).value.map_or(false, Value::is_string));
    if !complete {
        messages.push(format!(
            "{}: should be an array of objects each with uri/u, category/c, and title/t properties.",
            label
        ));
    }
}

fn lint_field(document: &Map<String, Value>, field: &MetaField, messages: &mut Vec<String>) {
    let label = field.names.label();
    let found = lookup(document, &field.names);
    if found.both {
        messages.push(format!(
            "{}: both long and compact forms present. expected only one.",
            label
        ));
        return;
    }

    match field.rule {
        MetaRule::Ticker => {
            if !is_ticker(found.value) {
                messages.push(format!(
                    "{}: should have uppercase letters (A-Z) and digits (0-9) only. Max 6 characters recommended.",
                    label
                ));
            }
        }
        MetaRule::NonEmptyString { required } => {
            if (required || found.present) && !is_non_empty_string(found.value) {
                messages.push(format!("{}: should be a non-empty string.", label));
            }
        }
        MetaRule::AssetClass => {
            if !is_one_of(found.value, &ASSET_CLASSES) {
                messages.push(format!(
                    "{}: should be one of {}.",
                    label,
                    ASSET_CLASSES.join(", ")
                ));
            }
        }
        MetaRule::AssetSubclass => {
            if found.value.is_none() && is_real_world_asset(document) {
                messages.push(format!("{}: required when asset_class is rwa.", label));
            } else if found.present && !is_one_of(found.value, &ASSET_SUBCLASSES) {
                messages.push(format!(
                    "{}: should be one of {}.",
                    label,
                    ASSET_SUBCLASSES.join(", ")
                ));
            }
        }
        MetaRule::Uris => {
            if !found.present {
                return;
            }
            match found.value.and_then(Value::as_array) {
                Some(entries) if !entries.is_empty() => {
                    for entry in entries {
                        lint_uri_entry(&label, entry, messages);
                    }
                }
                _ => messages.push(format!("{}: should be a non-empty array.", label)),
            }
        }
        MetaRule::AdditionalInfo => {
            let ok = found
                .value
                .map_or(false, |value| value.is_string() || value.is_object());
            if found.present && !ok {
                messages.push(format!("{}: should be a string or JSON object.", label));
            }
        }
    }
}

/// Checks hex-encoded metadata against XLS-89 and returns every finding.
///
/// An empty result means the document conforms. Encoding problems (not hex,
/// too long, not JSON, not an object) are reported alone; field findings are
/// reported together.
pub fn lint_mpt_metadata(input: &str) -> Vec<String> {
    if !is_hex(input) {
        return vec![MetadataError::NotHex.to_string()];
    }
    if input.len() > 2 * MAX_MPT_META_BYTE_LENGTH {
        return vec![format!(
            "MPTokenMetadata must be max {} bytes.",
            MAX_MPT_META_BYTE_LENGTH
        )];
    }

    let document = match parse_hex_document(input) {
        Ok(Value::Object(document)) => document,
        Ok(_) => {
            return vec![
                "MPTokenMetadata is not properly formatted JSON object as per XLS-89.".to_string(),
            ]
        }
        Err(err) => return vec![err.to_string()],
    };

    let mut messages = Vec::new();
    if document.len() > MPT_META_FIELDS.len() {
        messages.push(format!(
            "MPTokenMetadata must not contain more than {} top-level fields (found {}).",
            MPT_META_FIELDS.len(),
            document.len()
        ));
    }
    for field in &MPT_META_FIELDS {
        lint_field(&document, field, &mut messages);
    }
    messages
}

/// Lints `input`, logs any findings under the standard warning header, and
/// appends them to `advisories`.
pub fn report_mpt_metadata(tx_type: &str, input: &str, advisories: &mut Vec<String>) {
    let findings = lint_mpt_metadata(input);
    if findings.is_empty() {
        return;
    }

    let bullets: Vec<String> = findings.iter().map(|finding| format!("- {}", finding)).collect();
    warn!(
        tx_type,
        findings = findings.len(),
        "{}\n{}",
        MPT_META_WARNING_HEADER,
        bullets.join("\n")
    );
    advisories.extend(findings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lint(document: Value) -> Vec<String> {
        lint_mpt_metadata(&hex::encode_upper(document.to_string()))
    }

    fn conforming() -> Value {
        json!({
            "t": "TBILL",
            "n": "T-Bill Yield Token",
            "i": "https://example.org/tbill-icon.png",
            "ac": "rwa",
            "as": "treasury",
            "in": "Example Yield Co.",
        })
    }

    #[test]
    fn conforming_document_has_no_findings() {
        assert!(lint(conforming()).is_empty());
    }

    #[test]
    fn encoding_problems_short_circuit() {
        assert_eq!(lint_mpt_metadata("zz"), vec!["MPTokenMetadata must be in hex format."]);
        assert_eq!(
            lint_mpt_metadata(&"AB".repeat(1025)),
            vec!["MPTokenMetadata must be max 1024 bytes."]
        );
        // Half a byte over the limit still counts.
        assert_eq!(
            lint_mpt_metadata(&format!("{}A", "AB".repeat(1024))),
            vec!["MPTokenMetadata must be max 1024 bytes."]
        );
        assert_eq!(
            lint(json!("plain string")),
            vec!["MPTokenMetadata is not properly formatted JSON object as per XLS-89."]
        );
        let not_json = lint_mpt_metadata(&hex::encode("{ticker"));
        assert_eq!(not_json.len(), 1);
        assert!(not_json[0].starts_with("MPTokenMetadata is not properly formatted as JSON - "));
    }

    #[test]
    fn field_rules() {
        let mut doc = conforming();
        doc["t"] = json!("tbill");
        doc["ac"] = json!("stocks");
        let findings = lint(doc);
        assert_eq!(
            findings,
            vec![
                "ticker/t: should have uppercase letters (A-Z) and digits (0-9) only. Max 6 characters recommended.",
                "asset_class/ac: should be one of rwa, memes, wrapped, gaming, defi, other.",
            ]
        );
    }

    #[test]
    fn rwa_requires_subclass() {
        let mut doc = conforming();
        doc.as_object_mut().unwrap().remove("as");
        assert_eq!(
            lint(doc),
            vec!["asset_subclass/as: required when asset_class is rwa."]
        );
    }

    #[test]
    fn both_forms_reported() {
        let mut doc = conforming();
        doc["name"] = json!("Other");
        assert_eq!(
            lint(doc),
            vec!["name/n: both long and compact forms present. expected only one."]
        );
    }

    #[test]
    fn uris_shape() {
        let mut doc = conforming();
        doc["us"] = json!([]);
        assert_eq!(lint(doc.clone()), vec!["uris/us: should be a non-empty array."]);

        doc["us"] = json!([{"u": "https://a", "c": "website"}]);
        assert_eq!(
            lint(doc.clone()),
            vec!["uris/us: should be an array of objects each with uri/u, category/c, and title/t properties."]
        );

        doc["us"] = json!([{"u": "https://a", "uri": "https://b", "c": "website"}]);
        assert_eq!(
            lint(doc),
            vec![
                "uris/us: should not have both uri and u fields.",
                "uris/us: should be an array of objects each with uri/u, category/c, and title/t properties.",
            ]
        );
    }

    #[test]
    fn null_uri_key_is_not_a_conflict() {
        let mut doc = conforming();
        doc["us"] = json!([{"u": "https://a", "uri": null, "c": "website"}]);
        assert_eq!(
            lint(doc),
            vec!["uris/us: should be an array of objects each with uri/u, category/c, and title/t properties."]
        );
    }

    #[test]
    fn too_many_fields() {
        let mut doc = conforming();
        for extra in ["x1", "x2", "x3", "x4"] {
            doc[extra] = json!(1);
        }
        let findings = lint(doc);
        assert_eq!(
            findings[0],
            "MPTokenMetadata must not contain more than 9 top-level fields (found 10)."
        );
    }

    #[test]
    fn report_collects_advisories() {
        let mut advisories = Vec::new();
        report_mpt_metadata("MPTokenIssuanceCreate", "zz", &mut advisories);
        assert_eq!(advisories, vec!["MPTokenMetadata must be in hex format."]);

        let mut clean = Vec::new();
        let hex = hex::encode_upper(conforming().to_string());
        report_mpt_metadata("MPTokenIssuanceCreate", &hex, &mut clean);
        assert!(clean.is_empty());
    }
}
