//! The XLS-89 field table.

/// A field known by two names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub long: &'static str,
    pub compact: &'static str,
}

impl FieldMapping {
    const fn new(long: &'static str, compact: &'static str) -> Self {
        Self { long, compact }
    }

    /// Returns `true` if `key` is either name of this field.
    pub fn matches(&self, key: &str) -> bool {
        self.long == key || self.compact == key
    }

    /// `"long/compact"`, the prefix of every lint message about the field.
    pub fn label(&self) -> String {
        format!("{}/{}", self.long, self.compact)
    }
}

/// The shape rule a top-level field is linted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaRule {
    /// 1 to 6 uppercase letters or digits.
    Ticker,
    /// A non-empty string; optional fields are only checked when present.
    NonEmptyString { required: bool },
    /// One of [`ASSET_CLASSES`].
    AssetClass,
    /// One of [`ASSET_SUBCLASSES`], required for real-world assets.
    AssetSubclass,
    /// A non-empty array of `{uri, category, title}` objects.
    Uris,
    /// A string or an object.
    AdditionalInfo,
}

/// A top-level metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetaField {
    pub names: FieldMapping,
    pub rule: MetaRule,
}

const fn field(long: &'static str, compact: &'static str, rule: MetaRule) -> MetaField {
    MetaField {
        names: FieldMapping::new(long, compact),
        rule,
    }
}

/// The top-level field holding the list of related links.
pub const URIS: FieldMapping = FieldMapping::new("uris", "us");

/// Every documented top-level field, in lint order.
pub const MPT_META_FIELDS: [MetaField; 9] = [
    field("ticker", "t", MetaRule::Ticker),
    field("name", "n", MetaRule::NonEmptyString { required: true }),
    field("icon", "i", MetaRule::NonEmptyString { required: true }),
    field("asset_class", "ac", MetaRule::AssetClass),
    field("issuer_name", "in", MetaRule::NonEmptyString { required: true }),
    field("desc", "d", MetaRule::NonEmptyString { required: false }),
    field("asset_subclass", "as", MetaRule::AssetSubclass),
    MetaField {
        names: URIS,
        rule: MetaRule::Uris,
    },
    field("additional_info", "ai", MetaRule::AdditionalInfo),
];

/// The fields of each `uris` entry.
pub const MPT_META_URI_FIELDS: [FieldMapping; 3] = [
    FieldMapping::new("uri", "u"),
    FieldMapping::new("category", "c"),
    FieldMapping::new("title", "t"),
];

pub const ASSET_CLASSES: [&str; 6] = ["rwa", "memes", "wrapped", "gaming", "defi", "other"];

pub const ASSET_SUBCLASSES: [&str; 7] = [
    "stablecoin",
    "commodity",
    "real_estate",
    "private_credit",
    "equity",
    "treasury",
    "other",
];

/// Asset class that makes `asset_subclass` mandatory.
pub const REAL_WORLD_ASSET: &str = "rwa";


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_per_level() {
        let mut seen = HashSet::new();
        for field in MPT_META_FIELDS {
            assert!(seen.insert(field.names.long));
            assert!(seen.insert(field.names.compact));
        }

        let mut uri_names = HashSet::new();
        for mapping in MPT_META_URI_FIELDS {
            assert!(uri_names.insert(mapping.long));
            assert!(uri_names.insert(mapping.compact));
        }
    }

    #[test]
    fn uris_field_is_in_the_table() {
        assert!(MPT_META_FIELDS.iter().any(|field| field.names == URIS));
    }

    #[test]
    fn label_joins_both_names() {
        assert_eq!(MPT_META_FIELDS[3].names.label(), "asset_class/ac");
    }
}
