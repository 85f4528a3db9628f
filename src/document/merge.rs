//! Recursive document merge.

use serde_json::Value;

/// Fold `source` into `target`.
///
/// Does nothing unless both are objects. For each key of `source`, an
/// object already present in `target` is merged recursively; anything else
/// (missing key, scalar, array, or an object replaced by a scalar) is
/// overwritten by a copy of the incoming value.
pub fn merge(target: &mut Value, source: &Value) {
    let (Value::Object(target), Value::Object(source)) = (target, source) else {
        return;
    };
    for (key, incoming) in source {
        match target.get_mut(key) {
            Some(existing) if existing.is_object() => merge(existing, incoming),
            Some(existing) => *existing = incoming.clone(),
            None => {
                target.insert(key.clone(), incoming.clone());
            }
        }
    }
}

/// Merge `overlay` over a copy of `base`.
pub fn merged(base: &Value, overlay: &Value) -> Value {
    let mut out = base.clone();
    merge(&mut out, overlay);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recursive_union() {
        let mut target = json!({"a": {"x": 0, "z": 3}});
        merge(&mut target, &json!({"a": {"x": 1, "y": 2}}));
        assert_eq!(target, json!({"a": {"x": 1, "y": 2, "z": 3}}));
    }

    #[test]
    fn test_scalar_replaces_object() {
        let mut target = json!({"a": {"x": 0}});
        merge(&mut target, &json!({"a": 5}));
        assert_eq!(target, json!({"a": 5}));
    }

    #[test]
    fn test_object_replaces_scalar() {
        let mut target = json!({"a": 5});
        merge(&mut target, &json!({"a": {"x": 1}}));
        assert_eq!(target, json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_arrays_replaced_not_concatenated() {
        let mut target = json!({"list": [1, 2, 3]});
        merge(&mut target, &json!({"list": [9]}));
        assert_eq!(target, json!({"list": [9]}));
    }

    #[test]
    fn test_non_object_is_noop() {
        let mut target = json!([1, 2]);
        merge(&mut target, &json!({"a": 1}));
        assert_eq!(target, json!([1, 2]));

        let mut target = json!({"a": 1});
        merge(&mut target, &json!(7));
        assert_eq!(target, json!({"a": 1}));
    }

    #[test]
    fn test_deep_nesting() {
        let base = json!({"cam": {"intrinsics": {"fx": 500, "fy": 500}, "name": "left"}});
        let over = json!({"cam": {"intrinsics": {"fx": 520}}, "rate": 30});
        assert_eq!(
            merged(&base, &over),
            json!({"cam": {"intrinsics": {"fx": 520, "fy": 500}, "name": "left"}, "rate": 30})
        );
    }
}
