//! Response Normalizer — parses raw model output and reconciles key-naming
//! drift into canonical response shapes.
//!
//! Models answer the same prompt with `jd_match` one day and `JD Match` the
//! next. For endpoints with a fixed response shape we reconcile an ordered
//! alias list per canonical field and substitute documented defaults for
//! absent fields. All other endpoints pass the parsed JSON through unchanged.

use serde_json::{json, Map, Value};

use crate::errors::AppError;

/// Default substituted when no alias of a canonical field is present.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    /// Score/percentage fields default to `"0%"`.
    Percent,
    /// Free-text fields default to `""`.
    Text,
    /// List fields default to `[]`.
    List,
}

impl FieldDefault {
    fn value(self) -> Value {
        match self {
            FieldDefault::Percent => json!("0%"),
            FieldDefault::Text => json!(""),
            FieldDefault::List => json!([]),
        }
    }
}

/// One canonical output field and the ordered key aliases accepted for it.
/// The first alias found in the model reply wins.
pub struct FieldSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub default: FieldDefault,
}

/// Canonical shape for `POST /analyze`.
pub const ATS_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        canonical: "jd_match",
        aliases: &["jd_match", "JD Match"],
        default: FieldDefault::Percent,
    },
    FieldSpec {
        canonical: "missing_keywords",
        aliases: &["missing_keywords", "MissingKeywords"],
        default: FieldDefault::List,
    },
    FieldSpec {
        canonical: "profile_summary",
        aliases: &["profile_summary", "Profile Summary"],
        default: FieldDefault::Text,
    },
];

/// Canonical shape for `POST /resume/rewrite`.
pub const REWRITE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        canonical: "rewritten_resume",
        aliases: &["rewritten_resume", "RewrittenResume"],
        default: FieldDefault::Text,
    },
    FieldSpec {
        canonical: "key_adjustments",
        aliases: &["key_adjustments", "KeyAdjustments"],
        default: FieldDefault::List,
    },
    FieldSpec {
        canonical: "keyword_alignment_score",
        aliases: &["keyword_alignment_score", "KeywordAlignmentScore"],
        default: FieldDefault::Percent,
    },
];

/// Strictly parses a raw model reply as JSON.
///
/// There is no fallback rendering: an unparseable reply surfaces as a
/// user-visible 500, never a partially-filled success body.
pub fn parse_model_json(raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw).map_err(|_| AppError::ModelResponseParse)
}

/// Returns the value of the first alias present in the payload, if any.
pub fn coalesce<'a>(payload: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let object = payload.as_object()?;
    aliases.iter().find_map(|key| object.get(*key))
}

/// Reshapes a parsed reply into the canonical key set for a fixed-shape
/// endpoint. Absent fields take their documented defaults; a non-object
/// payload normalizes to all defaults.
pub fn normalize_fixed(payload: &Value, fields: &[FieldSpec]) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for field in fields {
        let value = coalesce(payload, field.aliases)
            .cloned()
            .unwrap_or_else(|| field.default.value());
        out.insert(field.canonical.to_string(), value);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_json_accepts_object() {
        let parsed = parse_model_json(r#"{"jd_match": "85%"}"#).unwrap();
        assert_eq!(parsed["jd_match"], "85%");
    }

    #[test]
    fn test_parse_model_json_accepts_array() {
        let parsed = parse_model_json(r#"[1, 2, 3]"#).unwrap();
        assert!(parsed.is_array());
    }

    #[test]
    fn test_parse_model_json_rejects_non_json() {
        let err = parse_model_json("I'm sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, AppError::ModelResponseParse));
    }

    #[test]
    fn test_coalesce_prefers_first_alias() {
        let payload = json!({"jd_match": "85%", "JD Match": "12%"});
        let value = coalesce(&payload, &["jd_match", "JD Match"]).unwrap();
        assert_eq!(value, "85%");
    }

    #[test]
    fn test_coalesce_falls_back_to_later_alias() {
        let payload = json!({"JD Match": "85%"});
        let value = coalesce(&payload, &["jd_match", "JD Match"]).unwrap();
        assert_eq!(value, "85%");
    }

    #[test]
    fn test_coalesce_on_non_object_is_none() {
        assert!(coalesce(&json!([1, 2]), &["jd_match"]).is_none());
    }

    #[test]
    fn test_ats_snake_case_reply_normalizes_unchanged() {
        let payload = json!({
            "jd_match": "85%",
            "missing_keywords": ["python"],
            "profile_summary": "Good candidate"
        });
        assert_eq!(normalize_fixed(&payload, ATS_FIELDS), payload);
    }

    #[test]
    fn test_ats_title_case_reply_normalizes_to_snake_case() {
        let payload = json!({
            "JD Match": "85%",
            "MissingKeywords": ["python"],
            "Profile Summary": "Good candidate"
        });
        let normalized = normalize_fixed(&payload, ATS_FIELDS);
        assert_eq!(
            normalized,
            json!({
                "jd_match": "85%",
                "missing_keywords": ["python"],
                "profile_summary": "Good candidate"
            })
        );
    }

    #[test]
    fn test_ats_missing_keys_take_documented_defaults() {
        let normalized = normalize_fixed(&json!({}), ATS_FIELDS);
        assert_eq!(
            normalized,
            json!({
                "jd_match": "0%",
                "missing_keywords": [],
                "profile_summary": ""
            })
        );
    }

    #[test]
    fn test_non_object_payload_normalizes_to_all_defaults() {
        let normalized = normalize_fixed(&json!("85%"), ATS_FIELDS);
        assert_eq!(normalized["jd_match"], "0%");
        assert_eq!(normalized["missing_keywords"], json!([]));
        assert_eq!(normalized["profile_summary"], "");
    }

    #[test]
    fn test_rewrite_mixed_conventions_normalize() {
        let payload = json!({
            "RewrittenResume": "Updated resume",
            "key_adjustments": ["Added metrics"]
        });
        let normalized = normalize_fixed(&payload, REWRITE_FIELDS);
        assert_eq!(
            normalized,
            json!({
                "rewritten_resume": "Updated resume",
                "key_adjustments": ["Added metrics"],
                "keyword_alignment_score": "0%"
            })
        );
    }

    #[test]
    fn test_extra_keys_in_reply_are_dropped_from_fixed_shape() {
        let payload = json!({
            "jd_match": "70%",
            "missing_keywords": [],
            "profile_summary": "ok",
            "unexpected": "field"
        });
        let normalized = normalize_fixed(&payload, ATS_FIELDS);
        assert!(normalized.get("unexpected").is_none());
    }
}
