//! Semantic scalar codecs.
//!
//! The broker transmits most scalars as JSON strings: transaction ids as
//! digit strings, prices and units as numeric strings, enums as member
//! names. Each semantic scalar type gets a paired `parse`/`unparse`
//! strategy; [`ScalarKind`] is the dispatch enum a field descriptor binds
//! to. Codecs are stateless: `unparse(parse(x))` round-trips to an
//! equivalent wire value (decimals normalize to their shortest form).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;
use tradewire_json::WireValue;

use crate::error::ScalarError;
use crate::instance::FieldValue;

fn expect_str(wire: &WireValue) -> Result<&str, ScalarError> {
    wire.as_str().ok_or(ScalarError::TypeMismatch {
        expected: "string",
        got: wire.kind(),
    })
}

// -------------------------------------------------------------------------
// IntString

/// Wire: decimal-digit JSON string (optional leading `-`) ⇄ native `i64`.
///
/// Used for transaction ids, trade ids, order ids.
pub struct IntString;

impl IntString {
    pub fn parse(wire: &WireValue) -> Result<i64, ScalarError> {
        let s = expect_str(wire)?;
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ScalarError::FormatInvalid {
                expected: "integer string",
                raw: s.to_owned(),
            });
        }
        s.parse::<i64>().map_err(|_| ScalarError::FormatInvalid {
            expected: "integer string",
            raw: s.to_owned(),
        })
    }

    pub fn unparse(value: i64) -> WireValue {
        WireValue::Str(value.to_string())
    }
}

// -------------------------------------------------------------------------
// DecimalString

/// Wire: numeric JSON string ⇄ native `f64`.
///
/// Precision is bounded by IEEE-754 double rounding; the upstream API sends
/// at most a handful of fractional digits, well inside that bound. Unparse
/// normalizes to the shortest representation that round-trips, so
/// `"100.50"` re-encodes as `"100.5"`.
pub struct DecimalString;

impl DecimalString {
    pub fn parse(wire: &WireValue) -> Result<f64, ScalarError> {
        let s = expect_str(wire)?;
        if !is_plain_decimal(s) {
            return Err(ScalarError::FormatInvalid {
                expected: "decimal string",
                raw: s.to_owned(),
            });
        }
        s.parse::<f64>().map_err(|_| ScalarError::FormatInvalid {
            expected: "decimal string",
            raw: s.to_owned(),
        })
    }

    pub fn unparse(value: f64) -> WireValue {
        WireValue::Str(format!("{value}"))
    }
}

/// Optional `-`, digits, optional `.` with at least one fractional digit.
/// Exponent forms, `inf`, and `nan` are not part of the wire format.
fn is_plain_decimal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match frac_part {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

// -------------------------------------------------------------------------
// PlainString

/// Identity codec for semantically-tagged strings: instrument names,
/// account identifiers, currency codes.
pub struct PlainString;

impl PlainString {
    pub fn parse(wire: &WireValue) -> Result<String, ScalarError> {
        expect_str(wire).map(str::to_owned)
    }

    pub fn unparse(value: &str) -> WireValue {
        WireValue::Str(value.to_owned())
    }
}

// -------------------------------------------------------------------------
// EnumDef / EnumName

/// A registered enumeration: named, ordered set of canonical member names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    members: IndexSet<String>,
}

impl EnumDef {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }
}

/// Wire: the member's canonical name ⇄ native enum member.
///
/// An unrecognized name is [`ScalarError::UnknownEnumValue`]: fatal for an
/// ordinary field, but recoverable in discriminator position, where the
/// marshaller degrades to a passthrough record instead.
pub struct EnumName;

impl EnumName {
    pub fn parse(def: &EnumDef, wire: &WireValue) -> Result<String, ScalarError> {
        let s = expect_str(wire)?;
        if def.has(s) {
            Ok(s.to_owned())
        } else {
            Err(ScalarError::UnknownEnumValue {
                enum_name: def.name().to_owned(),
                value: s.to_owned(),
            })
        }
    }

    pub fn unparse(def: &EnumDef, value: &str) -> Result<WireValue, ScalarError> {
        if def.has(value) {
            Ok(WireValue::Str(value.to_owned()))
        } else {
            Err(ScalarError::ValueShape {
                detail: format!("`{value}` is not a member of enum {}", def.name()),
            })
        }
    }
}

// -------------------------------------------------------------------------
// Secret / SecretString

/// A credential-bearing string whose `Debug` and `Display` never reveal the
/// contents. Only [`Secret::expose`] returns the inner value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(****)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// Wire: plain string ⇄ [`Secret`].
pub struct SecretString;

impl SecretString {
    pub fn parse(wire: &WireValue) -> Result<Secret, ScalarError> {
        expect_str(wire).map(Secret::new)
    }

    pub fn unparse(value: &Secret) -> WireValue {
        WireValue::Str(value.expose().to_owned())
    }
}

// -------------------------------------------------------------------------
// BoolFlag

/// Wire: JSON boolean ⇄ native `bool`. The payloads carry a handful of real
/// booleans next to the stringified scalars; the codec keeps shape checking
/// uniform.
pub struct BoolFlag;

impl BoolFlag {
    pub fn parse(wire: &WireValue) -> Result<bool, ScalarError> {
        match wire {
            WireValue::Bool(b) => Ok(*b),
            other => Err(ScalarError::TypeMismatch {
                expected: "boolean",
                got: other.kind(),
            }),
        }
    }

    pub fn unparse(value: bool) -> WireValue {
        WireValue::Bool(value)
    }
}

// -------------------------------------------------------------------------
// ScalarKind

/// The semantic scalar type a field descriptor binds to.
#[derive(Debug, Clone)]
pub enum ScalarKind {
    /// String-encoded integer ([`IntString`]).
    Int,
    /// String-encoded decimal ([`DecimalString`]).
    Decimal,
    /// Plain tagged string ([`PlainString`]).
    Text,
    /// Enum member by canonical name ([`EnumName`]).
    Enum(Arc<EnumDef>),
    /// Credential-masked string ([`SecretString`]).
    Secret,
    /// JSON boolean ([`BoolFlag`]).
    Flag,
}

impl ScalarKind {
    /// Semantic name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int => "integer string",
            Self::Decimal => "decimal string",
            Self::Text => "string",
            Self::Enum(_) => "enum name",
            Self::Secret => "secret string",
            Self::Flag => "boolean",
        }
    }

    pub fn parse(&self, wire: &WireValue) -> Result<FieldValue, ScalarError> {
        match self {
            Self::Int => IntString::parse(wire).map(FieldValue::Int),
            Self::Decimal => DecimalString::parse(wire).map(FieldValue::Decimal),
            Self::Text => PlainString::parse(wire).map(FieldValue::Text),
            Self::Enum(def) => EnumName::parse(def, wire).map(FieldValue::Enum),
            Self::Secret => SecretString::parse(wire).map(FieldValue::Secret),
            Self::Flag => BoolFlag::parse(wire).map(FieldValue::Bool),
        }
    }

    /// Total on values produced by `parse`; a native value of the wrong
    /// shape (a `Text` where the field's codec is `Int`) is a
    /// [`ScalarError::ValueShape`], an encode-time programming error in the
    /// caller, reported rather than panicking.
    pub fn unparse(&self, value: &FieldValue) -> Result<WireValue, ScalarError> {
        match (self, value) {
            (Self::Int, FieldValue::Int(i)) => Ok(IntString::unparse(*i)),
            (Self::Decimal, FieldValue::Decimal(d)) => Ok(DecimalString::unparse(*d)),
            // integral decimals are commonly constructed as native ints
            (Self::Decimal, FieldValue::Int(i)) => Ok(WireValue::Str(i.to_string())),
            (Self::Text, FieldValue::Text(s)) => Ok(PlainString::unparse(s)),
            (Self::Enum(def), FieldValue::Enum(s)) => EnumName::unparse(def, s),
            (Self::Secret, FieldValue::Secret(s)) => Ok(SecretString::unparse(s)),
            (Self::Flag, FieldValue::Bool(b)) => Ok(BoolFlag::unparse(*b)),
            (kind, other) => Err(ScalarError::ValueShape {
                detail: format!("field holds {}, codec expects {}", other.kind(), kind.name()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> WireValue {
        WireValue::Str(text.to_owned())
    }

    // -- IntString --

    #[test]
    fn int_string_parses_digits() {
        assert_eq!(IntString::parse(&s("12345")).unwrap(), 12345);
        assert_eq!(IntString::parse(&s("-7")).unwrap(), -7);
        assert_eq!(IntString::parse(&s("0")).unwrap(), 0);
    }

    #[test]
    fn int_string_rejects_non_digits() {
        for bad in ["", "-", "+5", "12a", "1.0", " 1"] {
            assert!(
                matches!(IntString::parse(&s(bad)), Err(ScalarError::FormatInvalid { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn int_string_rejects_overflow() {
        assert!(IntString::parse(&s("99999999999999999999")).is_err());
    }

    #[test]
    fn int_string_rejects_bare_number() {
        assert!(matches!(
            IntString::parse(&WireValue::Int(5)),
            Err(ScalarError::TypeMismatch { got: "number", .. })
        ));
    }

    #[test]
    fn int_string_roundtrip() {
        for v in [0i64, 1, -1, i64::MAX, i64::MIN] {
            assert_eq!(IntString::parse(&IntString::unparse(v)).unwrap(), v);
        }
    }

    // -- DecimalString --

    #[test]
    fn decimal_string_parses_plain_forms() {
        assert_eq!(DecimalString::parse(&s("100.5")).unwrap(), 100.5);
        assert_eq!(DecimalString::parse(&s("-0.0075")).unwrap(), -0.0075);
        assert_eq!(DecimalString::parse(&s("100")).unwrap(), 100.0);
    }

    #[test]
    fn decimal_string_rejects_exponent_and_words() {
        for bad in ["1e5", "inf", "NaN", "1.", ".5", "", "-"] {
            assert!(DecimalString::parse(&s(bad)).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn decimal_string_normalizes_trailing_zeros() {
        let v = DecimalString::parse(&s("100.50")).unwrap();
        assert_eq!(DecimalString::unparse(v), s("100.5"));
    }

    // -- PlainString --

    #[test]
    fn plain_string_is_identity() {
        assert_eq!(PlainString::parse(&s("EUR_USD")).unwrap(), "EUR_USD");
        assert_eq!(PlainString::unparse("EUR_USD"), s("EUR_USD"));
    }

    // -- EnumName --

    #[test]
    fn enum_name_accepts_members_only() {
        let def = EnumDef::new("OrderType", ["MARKET", "LIMIT"]);
        assert_eq!(EnumName::parse(&def, &s("LIMIT")).unwrap(), "LIMIT");
        assert!(matches!(
            EnumName::parse(&def, &s("TRAILING")),
            Err(ScalarError::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn enum_name_unparse_rejects_non_members() {
        let def = EnumDef::new("OrderType", ["MARKET"]);
        assert!(EnumName::unparse(&def, "MARKET").is_ok());
        assert!(matches!(
            EnumName::unparse(&def, "LIMIT"),
            Err(ScalarError::ValueShape { .. })
        ));
    }

    // -- Secret --

    #[test]
    fn secret_debug_and_display_are_masked() {
        let token = Secret::new("v3ry-s3cret-token");
        assert!(!format!("{token:?}").contains("s3cret"));
        assert!(!format!("{token}").contains("s3cret"));
        assert_eq!(token.expose(), "v3ry-s3cret-token");
    }

    // -- ScalarKind dispatch --

    #[test]
    fn kind_parse_produces_matching_variants() {
        assert_eq!(ScalarKind::Int.parse(&s("3")).unwrap(), FieldValue::Int(3));
        assert_eq!(
            ScalarKind::Decimal.parse(&s("1.25")).unwrap(),
            FieldValue::Decimal(1.25)
        );
        assert_eq!(
            ScalarKind::Flag.parse(&WireValue::Bool(true)).unwrap(),
            FieldValue::Bool(true)
        );
    }

    #[test]
    fn kind_unparse_rejects_shape_mismatch() {
        let err = ScalarKind::Int.unparse(&FieldValue::Text("x".into()));
        assert!(matches!(err, Err(ScalarError::ValueShape { .. })));
    }

    #[test]
    fn kind_unparse_accepts_int_for_decimal() {
        assert_eq!(
            ScalarKind::Decimal.unparse(&FieldValue::Int(100)).unwrap(),
            s("100")
        );
    }
}
