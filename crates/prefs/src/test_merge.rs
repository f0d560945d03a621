#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{
        Settings, defaults,
        merge::{reconcile, validate},
    };

    #[test]
    fn first_run_yields_exact_defaults() {
        let mut loaded = Value::Null;
        assert!(reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded, defaults::tree());

        let typed: Settings = serde_json::from_value(loaded).unwrap();
        assert_eq!(typed.window.width, 800);
        assert_eq!(typed.notifications.display_time, 4000);
    }

    #[test]
    fn defaults_tree_matches_typed_default() {
        let typed = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(typed, defaults::tree());
    }

    #[test]
    fn missing_keys_are_copied_without_clobbering() {
        let mut loaded = json!({ "notifications": { "enable": false } });
        assert!(reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded["notifications"]["enable"], json!(false));
        assert_eq!(loaded["notifications"]["showPreviews"], json!(true));
        assert_eq!(loaded["keyboard"]["play"], json!("MediaPlayPause"));
    }

    #[test]
    fn corrupted_scalar_type_is_overwritten() {
        let mut loaded = json!({ "notifications": { "displayTime": "oops" } });
        assert!(reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded["notifications"]["displayTime"], json!(4000));
    }

    #[test]
    fn structural_mismatch_is_overwritten() {
        // A whole domain collapsed to a scalar comes back as the default.
        let mut loaded = json!({ "window": 3 });
        assert!(reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded["window"], defaults::tree()["window"]);

        // And the other direction: a scalar turned into an object.
        let mut loaded = json!({ "window": { "theme": { "dark": true } } });
        assert!(reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded["window"]["theme"], json!(false));
    }

    #[test]
    fn unknown_keys_survive() {
        let mut loaded = json!({
            "experimental": { "flag": 1 },
            "window": { "zOrder": "top" },
        });
        reconcile(&defaults::tree(), &mut loaded);
        assert_eq!(loaded["experimental"]["flag"], json!(1));
        assert_eq!(loaded["window"]["zOrder"], json!("top"));
        // The repaired domain is still complete.
        assert_eq!(loaded["window"]["width"], json!(800));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut loaded = json!({ "keyboard": { "play": "Control+Shift+P" } });
        reconcile(&defaults::tree(), &mut loaded);
        let first = loaded.clone();
        assert!(!reconcile(&defaults::tree(), &mut loaded));
        assert_eq!(loaded, first);
    }

    #[test]
    fn validate_clamps_bounds() {
        let mut root = defaults::tree();
        root["notifications"]["displayTime"] = json!(100);
        root["window"]["width"] = json!(20);
        root["window"]["height"] = json!(0);
        assert!(validate(&mut root));
        assert_eq!(root["notifications"]["displayTime"], json!(500));
        assert_eq!(root["window"]["width"], json!(800));
        assert_eq!(root["window"]["height"], json!(700));

        root["notifications"]["displayTime"] = json!(99_999);
        assert!(validate(&mut root));
        assert_eq!(root["notifications"]["displayTime"], json!(15_000));

        // In-range values are left alone.
        assert!(!validate(&mut root));
    }
}
