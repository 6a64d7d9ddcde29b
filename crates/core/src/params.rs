//! Typed lookups into a JSON params object, plus object layering.
//!
//! Lookups never fail: a missing key or a value of the wrong JSON type yields
//! the supplied default. Domain validation (e.g. a zero stride) is the job of
//! the params type that calls these helpers.

use serde_json::{Map, Value};

/// `params[name]` as `f64`, accepting integers too.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    param_opt_f64(params, name).unwrap_or(default)
}

/// `params[name]` as `f64` if present and numeric.
pub fn param_opt_f64(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// `params[name]` as a string slice if present and a string.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

/// Shallow-merges `overrides` on top of `base`.
///
/// Keys in `overrides` win. A non-object on either side is treated as an
/// empty object, so the result is always a JSON object.
pub fn merge_params(base: &Value, overrides: &Value) -> Value {
    let mut merged: Map<String, Value> = base.as_object().cloned().unwrap_or_default();
    if let Some(over) = overrides.as_object() {
        for (k, v) in over {
            merged.insert(k.clone(), v.clone());
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_floats_and_integers() {
        let params = json!({"ease": 0.25, "radius": 10000});
        assert!((param_f64(&params, "ease", 0.0) - 0.25).abs() < f64::EPSILON);
        assert!((param_f64(&params, "radius", 0.0) - 10000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_wrong_type() {
        let params = json!({"ease": "fast"});
        assert!((param_f64(&params, "ease", 0.5) - 0.5).abs() < f64::EPSILON);
        assert!((param_f64(&params, "friction", 0.8) - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn param_opt_f64_distinguishes_absent_keys() {
        let params = json!({"offset_x": 12});
        assert_eq!(param_opt_f64(&params, "offset_x"), Some(12.0));
        assert_eq!(param_opt_f64(&params, "offset_y"), None);
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        assert_eq!(param_usize(&json!({"stride": 3}), "stride", 2), 3);
        assert_eq!(param_usize(&json!({"stride": 2.5}), "stride", 2), 2);
        assert_eq!(param_usize(&json!({"stride": -1}), "stride", 2), 2);
    }

    #[test]
    fn param_bool_reads_only_booleans() {
        assert!(param_bool(&json!({"on": true}), "on", false));
        assert!(!param_bool(&json!({"on": 1}), "on", false));
    }

    #[test]
    fn param_str_returns_borrowed_string() {
        let params = json!({"tint": "#191924"});
        assert_eq!(param_str(&params, "tint"), Some("#191924"));
        assert_eq!(param_str(&json!({"tint": 5}), "tint"), None);
    }

    #[test]
    fn lookups_on_non_object_use_defaults() {
        let params = json!("not an object");
        assert_eq!(param_usize(&params, "stride", 4), 4);
        assert_eq!(param_str(&params, "tint"), None);
    }

    #[test]
    fn merge_params_overrides_win() {
        let base = json!({"stride": 2, "ease": 0.25});
        let over = json!({"stride": 4});
        let merged = merge_params(&base, &over);
        assert_eq!(merged, json!({"stride": 4, "ease": 0.25}));
    }

    #[test]
    fn merge_params_tolerates_non_objects() {
        assert_eq!(merge_params(&json!(null), &json!([1, 2])), json!({}));
        assert_eq!(
            merge_params(&json!(null), &json!({"a": 1})),
            json!({"a": 1})
        );
    }
}
