//! Reconciliation of a loaded document against the compiled-in defaults.

use serde_json::Value;

use crate::types::{MAX_DISPLAY_TIME_MS, MIN_DISPLAY_TIME_MS, MIN_HEIGHT, MIN_WIDTH};

/// Whether two values are of the same JSON shape. A structured value never
/// matches a scalar, and scalars must agree on their primitive type.
fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Null, Value::Null)
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    )
}

/// Recursively walk `defaults`, repairing `loaded` in place:
///
/// - keys missing from `loaded` are copied from the defaults;
/// - keys whose shape disagrees with the default are overwritten with it;
/// - matching structured values are recursed into;
/// - keys not present in the defaults are left untouched.
///
/// Returns true when `loaded` was modified.
pub(crate) fn reconcile(defaults: &Value, loaded: &mut Value) -> bool {
    if !same_kind(defaults, loaded) {
        *loaded = defaults.clone();
        return true;
    }
    let (Some(dmap), Some(lmap)) = (defaults.as_object(), loaded.as_object_mut()) else {
        return false;
    };
    let mut changed = false;
    for (key, dv) in dmap {
        match lmap.get_mut(key) {
            None => {
                lmap.insert(key.clone(), dv.clone());
                changed = true;
            }
            Some(lv) if !same_kind(dv, lv) => {
                *lv = dv.clone();
                changed = true;
            }
            Some(lv) if dv.is_object() => {
                changed |= reconcile(dv, lv);
            }
            Some(_) => {}
        }
    }
    changed
}

/// Clamp an integer value in place, reporting whether it moved.
fn clamp_int(slot: &mut Value, min: i64, max: i64) -> bool {
    if let Some(n) = slot.as_i64() {
        let clamped = n.clamp(min, max);
        if clamped != n {
            *slot = Value::from(clamped);
            return true;
        }
    }
    false
}

/// Enforce numeric bounds the preferences form would normally guarantee.
/// Runs after [`reconcile`], so the paths below are known to exist with the
/// right shape.
pub(crate) fn validate(root: &mut Value) -> bool {
    let mut changed = false;
    if let Some(slot) = root.pointer_mut("/notifications/displayTime") {
        changed |= clamp_int(slot, MIN_DISPLAY_TIME_MS as i64, MAX_DISPLAY_TIME_MS as i64);
    }
    if let Some(slot) = root.pointer_mut("/window/width") {
        changed |= clamp_int(slot, MIN_WIDTH as i64, i64::MAX);
    }
    if let Some(slot) = root.pointer_mut("/window/height") {
        changed |= clamp_int(slot, MIN_HEIGHT as i64, i64::MAX);
    }
    changed
}
