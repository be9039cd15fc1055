//! # Amount Model
//!
//! A ledger amount arrives in one of three mutually exclusive shapes:
//!
//! ```text
//! "1000000"                                               native drops
//! {"currency":"USD","issuer":"r...","value":"1.5"}        issued currency
//! {"mpt_issuance_id":"0000...","value":"100"}             multi-purpose token
//! ```
//!
//! The shapes are never coerced into one another. `"100"` drops and an
//! issued `"100"` compare unequal no matter what the numbers say.
//!
//! Issued and MPT values are decimal strings that can span exponents from
//! roughly 1e-81 to 1e80. Floats lose that, so equality goes through
//! [`DecimalValue`], an exact mantissa/exponent pair over `num-bigint`.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// DecimalValue
// ---------------------------------------------------------------------------

/// An exact decimal number, normalized so that equal values compare equal.
///
/// The value is `mantissa * 10^exponent`. The mantissa never carries trailing
/// zeros and zero is always stored as `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalValue {
    mantissa: BigInt,
    exponent: i64,
}

impl DecimalValue {
    /// Parses the ledger's number grammar:
    /// `[-+]?(digits[.digits*] | .digits)([eE][-+]?digits)?`, after trimming
    /// surrounding whitespace. Returns `None` for anything else.
    pub fn parse(input: &str) -> Option<Self> {
        let text = input.trim();
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (number, exponent_text) = match body.find(|c| c == 'e' || c == 'E') {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };

        let (int_part, frac_part) = match number.find('.') {
            Some(idx) => (&number[..idx], &number[idx + 1..]),
            None => (number, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return None;
        }

        let mut exponent = match exponent_text {
            Some(raw) => parse_exponent(raw)?,
            None => 0,
        };
        exponent = exponent.checked_sub(i64::try_from(frac_part.len()).ok()?)?;

        let digits = format!("{}{}", int_part, frac_part);
        let significant = digits.trim_end_matches('0');
        if significant.trim_start_matches('0').is_empty() {
            return Some(Self::zero());
        }
        let stripped = digits.len() - significant.len();
        exponent = exponent.checked_add(i64::try_from(stripped).ok()?)?;

        let mut mantissa = BigInt::parse_bytes(significant.as_bytes(), 10)?;
        if negative {
            mantissa = -mantissa;
        }

        Some(Self { mantissa, exponent })
    }

    /// The canonical zero.
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// Returns `true` if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns `true` if the value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns `true` if the value is strictly above zero.
    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 0 {
            write!(f, "{}", self.mantissa)
        } else {
            write!(f, "{}e{}", self.mantissa, self.exponent)
        }
    }
}

fn all_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !all_digits(digits) {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// Returns `true` if `value` is a string in the ledger's number grammar.
pub fn is_xrpl_number(value: &Value) -> bool {
    value
        .as_str()
        .map_or(false, |text| DecimalValue::parse(text).is_some())
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// Number of keys in an issued-currency amount object.
const ISSUED_CURRENCY_AMOUNT_SIZE: usize = 3;

/// Number of keys in an MPT amount object.
const MPT_AMOUNT_SIZE: usize = 2;

/// One of the three amount representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount<'a> {
    /// Native currency, in drops.
    Drops(&'a str),
    /// A non-native currency identified by code and issuing account.
    Issued {
        /// Currency code (three-letter or 40-hex).
        currency: &'a str,
        /// Issuing account.
        issuer: &'a str,
        /// Decimal value.
        value: &'a str,
    },
    /// A multi-purpose token identified by its issuance id.
    Mpt {
        /// Issuance id.
        mpt_issuance_id: &'a str,
        /// Decimal value.
        value: &'a str,
    },
}

impl<'a> Amount<'a> {
    /// Classifies a JSON value, or returns `None` if it is no amount at all.
    ///
    /// Object forms must carry exactly their own keys: an issued amount has
    /// `currency`, `issuer` and `value`; an MPT amount has `mpt_issuance_id`
    /// and `value`. Any string is treated as drops here; numeric validity of
    /// drops is the ledger's business.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(drops) => Some(Amount::Drops(drops)),
            Value::Object(map) => Self::from_object(map),
            _ => None,
        }
    }

    fn from_object(map: &'a Map<String, Value>) -> Option<Self> {
        let text = |key: &str| map.get(key).and_then(Value::as_str);

        if map.len() == ISSUED_CURRENCY_AMOUNT_SIZE {
            if let (Some(currency), Some(issuer), Some(value)) =
                (text("currency"), text("issuer"), text("value"))
            {
                return Some(Amount::Issued {
                    currency,
                    issuer,
                    value,
                });
            }
        }

        if map.len() == MPT_AMOUNT_SIZE {
            if let (Some(mpt_issuance_id), Some(value)) = (text("mpt_issuance_id"), text("value")) {
                return Some(Amount::Mpt {
                    mpt_issuance_id,
                    value,
                });
            }
        }

        None
    }

    /// The textual value of the amount (drops string or `value` field).
    pub fn value_str(&self) -> &'a str {
        match self {
            Amount::Drops(drops) => drops,
            Amount::Issued { value, .. } | Amount::Mpt { value, .. } => value,
        }
    }

    /// Exact decimal form of the value, if it parses.
    pub fn decimal(&self) -> Option<DecimalValue> {
        DecimalValue::parse(self.value_str())
    }

    /// Compares two amounts.
    ///
    /// Different variants are never equal. Drops compare as strings. Issued
    /// amounts must agree on currency, issuer and numeric value; MPT amounts
    /// on issuance id and numeric value. An unparseable value equals nothing.
    pub fn equals(&self, other: &Amount<'_>) -> bool {
        match (self, other) {
            (Amount::Drops(a), Amount::Drops(b)) => a == b,
            (
                Amount::Issued {
                    currency: ca,
                    issuer: ia,
                    value: va,
                },
                Amount::Issued {
                    currency: cb,
                    issuer: ib,
                    value: vb,
                },
            ) => ca == cb && ia == ib && decimal_eq(va, vb),
            (
                Amount::Mpt {
                    mpt_issuance_id: ia,
                    value: va,
                },
                Amount::Mpt {
                    mpt_issuance_id: ib,
                    value: vb,
                },
            ) => ia == ib && decimal_eq(va, vb),
            _ => false,
        }
    }
}

fn decimal_eq(a: &str, b: &str) -> bool {
    match (DecimalValue::parse(a), DecimalValue::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns `true` if `value` is any of the three amount shapes.
pub fn is_amount(value: &Value) -> bool {
    Amount::from_value(value).is_some()
}

/// Returns `true` if `value` is an issued-currency amount object.
pub fn is_issued_currency_amount(value: &Value) -> bool {
    matches!(Amount::from_value(value), Some(Amount::Issued { .. }))
}

/// Returns `true` if `value` is an MPT amount object.
pub fn is_mpt_amount(value: &Value) -> bool {
    matches!(Amount::from_value(value), Some(Amount::Mpt { .. }))
}

/// Returns `true` for the token forms a clawback can target (issued or MPT).
pub fn is_clawback_amount(value: &Value) -> bool {
    matches!(
        Amount::from_value(value),
        Some(Amount::Issued { .. }) | Some(Amount::Mpt { .. })
    )
}

/// Compares two JSON amounts; see [`Amount::equals`].
pub fn amounts_equal(a: &Value, b: &Value) -> bool {
    match (Amount::from_value(a), Amount::from_value(b)) {
        (Some(a), Some(b)) => a.equals(&b),
        _ => false,
    }
}

/// Extracts a floating-point magnitude for range-style checks.
///
/// Returns `NaN` instead of failing when the value is not an amount or its
/// numeric text is not a finite XRPL number. Spellings `f64` would accept on
/// its own, such as `inf` or `NaN`, count as unparseable.
pub fn parse_amount_value(value: &Value) -> f64 {
    Amount::from_value(value)
        .map(|amount| amount.value_str().trim())
        .filter(|text| DecimalValue::parse(text).is_some())
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|magnitude| magnitude.is_finite())
        .unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

/// An asset identifier without a value: the `Asset` fields of AMM, vault and
/// bridge transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Issue<'a> {
    /// The native asset, spelled `{"currency": "XRP"}`.
    Xrp,
    /// An issued currency, spelled `{"currency": ..., "issuer": ...}`.
    Issued {
        /// Currency code.
        currency: &'a str,
        /// Issuing account.
        issuer: &'a str,
    },
    /// A multi-purpose token, spelled `{"mpt_issuance_id": ...}`.
    Mpt {
        /// Issuance id.
        mpt_issuance_id: &'a str,
    },
}

impl<'a> Issue<'a> {
    /// Classifies a JSON value as an issue, or returns `None`.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let map = value.as_object()?;
        let text = |key: &str| map.get(key).and_then(Value::as_str);

        match map.len() {
            2 => match (text("currency"), text("issuer")) {
                (Some(currency), Some(issuer)) => Some(Issue::Issued { currency, issuer }),
                _ => None,
            },
            1 => {
                if text("currency") == Some(crate::config::NATIVE_CURRENCY) {
                    Some(Issue::Xrp)
                } else {
                    text("mpt_issuance_id").map(|mpt_issuance_id| Issue::Mpt { mpt_issuance_id })
                }
            }
            _ => None,
        }
    }
}

/// Returns `true` for any issue shape (native, issued or MPT).
pub fn is_currency(value: &Value) -> bool {
    Issue::from_value(value).is_some()
}

/// Returns `true` for the non-MPT issue shapes (native or issued).
pub fn is_issued_currency(value: &Value) -> bool {
    matches!(
        Issue::from_value(value),
        Some(Issue::Xrp) | Some(Issue::Issued { .. })
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const MPT_ID: &str = "000004C463C52827307480341125DA0577DEFC38405B0E3E";

    fn dec(text: &str) -> DecimalValue {
        match DecimalValue::parse(text) {
            Some(value) => value,
            None => panic!("expected {:?} to parse", text),
        }
    }

    #[test]
    fn decimal_grammar_accepts_ledger_numbers() {
        for ok in ["0", "-1", "+1", "1.", ".5", "1.5e10", "1E-81", " 42 ", "9999999999999999e80"] {
            assert!(DecimalValue::parse(ok).is_some(), "{} should parse", ok);
        }
    }

    #[test]
    fn decimal_grammar_rejects_garbage() {
        for bad in ["", ".", "-", "e5", "1e", "1e+", "abc", "1.2.3", "0x10", "1 000", "NaN"] {
            assert!(DecimalValue::parse(bad).is_none(), "{} should not parse", bad);
        }
    }

    #[test]
    fn decimal_equality_ignores_spelling() {
        assert_eq!(dec("1"), dec("1.000"));
        assert_eq!(dec("100"), dec("1e2"));
        assert_eq!(dec("0.001"), dec("1e-3"));
        assert_eq!(dec("0"), dec("-0.00"));
        assert_ne!(dec("1"), dec("1.0000000000000000000000000001"));
    }

    #[test]
    fn decimal_handles_extreme_exponents() {
        assert_eq!(dec("1e80"), dec("10e79"));
        assert_eq!(dec("1e-81"), dec("0.1e-80"));
        assert!(dec("-5e-81").is_negative());
    }

    #[test]
    fn classifies_three_amount_shapes() {
        let drops = json!("1000");
        let issued = json!({"currency": "USD", "issuer": ISSUER, "value": "1"});
        let mpt = json!({"mpt_issuance_id": MPT_ID, "value": "1"});

        assert!(matches!(Amount::from_value(&drops), Some(Amount::Drops("1000"))));
        assert!(is_issued_currency_amount(&issued));
        assert!(is_mpt_amount(&mpt));
        assert!(is_clawback_amount(&issued) && is_clawback_amount(&mpt));
        assert!(!is_clawback_amount(&drops));
    }

    #[test]
    fn rejects_objects_with_extra_or_missing_keys() {
        let extra = json!({"currency": "USD", "issuer": ISSUER, "value": "1", "x": 1});
        let missing = json!({"currency": "USD", "value": "1"});
        let numeric_value = json!({"mpt_issuance_id": MPT_ID, "value": 1});

        assert!(!is_amount(&extra));
        assert!(!is_amount(&missing));
        assert!(!is_amount(&numeric_value));
        assert!(!is_amount(&json!(100)));
    }

    #[test]
    fn equality_never_crosses_variants() {
        let drops = json!("100");
        let issued = json!({"currency": "USD", "issuer": ISSUER, "value": "100"});
        assert!(!amounts_equal(&drops, &issued));
        assert!(!amounts_equal(&issued, &drops));
    }

    #[test]
    fn issued_equality_compares_exactly() {
        let a = json!({"currency": "USD", "issuer": ISSUER, "value": "1.50"});
        let b = json!({"currency": "USD", "issuer": ISSUER, "value": "1.5"});
        let other_issuer =
            json!({"currency": "USD", "issuer": "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8", "value": "1.5"});
        assert!(amounts_equal(&a, &b));
        assert!(!amounts_equal(&a, &other_issuer));
    }

    #[test]
    fn mpt_equality_requires_same_issuance() {
        let a = json!({"mpt_issuance_id": MPT_ID, "value": "10"});
        let b = json!({"mpt_issuance_id": MPT_ID, "value": "1e1"});
        let c = json!({"mpt_issuance_id": "00", "value": "10"});
        assert!(amounts_equal(&a, &b));
        assert!(!amounts_equal(&a, &c));
    }

    #[test]
    fn drops_compare_as_strings() {
        assert!(amounts_equal(&json!("100"), &json!("100")));
        assert!(!amounts_equal(&json!("100"), &json!("0100")));
    }

    #[test]
    fn parse_amount_value_returns_nan_for_non_amounts() {
        assert_eq!(parse_amount_value(&json!("25")), 25.0);
        assert_eq!(
            parse_amount_value(&json!({"currency": "USD", "issuer": ISSUER, "value": "-2.5"})),
            -2.5
        );
        assert!(parse_amount_value(&json!(5)).is_nan());
        assert!(parse_amount_value(&json!("five")).is_nan());
    }

    #[test]
    fn parse_amount_value_rejects_non_finite_spellings() {
        for text in ["inf", "-inf", "NaN", "infinity", "1e400"] {
            assert!(parse_amount_value(&json!(text)).is_nan(), "{}", text);
            let issued = json!({"currency": "USD", "issuer": ISSUER, "value": text});
            assert!(parse_amount_value(&issued).is_nan(), "{}", text);
        }
        assert_eq!(parse_amount_value(&json!("1e3")), 1000.0);
    }

    #[test]
    fn issue_shapes() {
        assert_eq!(Issue::from_value(&json!({"currency": "XRP"})), Some(Issue::Xrp));
        assert!(is_currency(&json!({"mpt_issuance_id": MPT_ID})));
        assert!(!is_issued_currency(&json!({"mpt_issuance_id": MPT_ID})));
        assert!(is_issued_currency(&json!({"currency": "USD", "issuer": ISSUER})));
        assert!(!is_currency(&json!({"currency": "USD"})));
        assert!(!is_currency(&json!({"currency": "USD", "issuer": ISSUER, "value": "1"})));
    }

    #[test]
    fn xrpl_number_predicate() {
        assert!(is_xrpl_number(&json!("1.5e3")));
        assert!(!is_xrpl_number(&json!(15)));
        assert!(!is_xrpl_number(&json!("1,5")));
    }
}
