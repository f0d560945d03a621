#[cfg(test)]
mod tests {
    use std::{
        fs,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::{Geometry, PrefStore, Settings};

    fn store_in(dir: &TempDir) -> Arc<PrefStore> {
        Arc::new(PrefStore::load(dir.path().join("preferences.json")))
    }

    #[test]
    fn first_run_creates_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.path().exists());
        let settings = store.snapshot();
        assert_eq!(settings.window.width, 800);
        assert_eq!(settings.notifications.display_time, 4000);
        assert_eq!(settings.keyboard.play, "MediaPlayPause");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();
        let store = PrefStore::load(path.clone());
        assert_eq!(store.snapshot(), Settings::default());
        // The repaired document was written back.
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["window"]["height"], json!(700));
    }

    #[test]
    fn dotted_get_and_set_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.set("keyboard.play", json!("Control+Shift+P")).unwrap();
        assert_eq!(store.get("keyboard.play"), Some(json!("Control+Shift+P")));
        assert_eq!(store.keyboard().play, "Control+Shift+P");
        assert_eq!(store.get("keyboard.missing.deep"), None);
    }

    #[test]
    fn set_persists_before_subscribers_run() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = store.path().clone();
        let observed = Arc::new(Mutex::new(Vec::<Value>::new()));
        let sink = observed.clone();
        store.subscribe(move |_| {
            let on_disk: Value =
                serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
            sink.lock().push(on_disk["notifications"]["enable"].clone());
        });
        store.set("notifications.enable", json!(false)).unwrap();
        assert_eq!(observed.lock().as_slice(), &[json!(false)]);
    }

    #[test]
    fn setting_the_same_value_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        store.set("keyboard.mute", json!("")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        store.set("keyboard.mute", json!("Super+M")).unwrap();
        store.set("keyboard.mute", json!("Super+M")).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reentrant_set_from_save_handler_terminates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let events = Arc::new(Mutex::new(Vec::<String>::new()));

        // Mimic the shortcut rollback: the first save rewrites the binding
        // back to a previous value from inside the handler.
        let inner = store.clone();
        let log = events.clone();
        store.subscribe(move |settings| {
            log.lock().push(settings.keyboard.play.clone());
            if settings.keyboard.play == "Bad+Combo" {
                inner.set("keyboard.play", json!("MediaPlayPause")).unwrap();
            }
        });

        store.set("keyboard.play", json!("Bad+Combo")).unwrap();

        // Both events delivered, in order, and the nested one did not re-enter.
        assert_eq!(events.lock().as_slice(), &["Bad+Combo", "MediaPlayPause"]);
        assert_eq!(store.keyboard().play, "MediaPlayPause");
    }

    #[test]
    fn geometry_is_clamped_and_written_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        store
            .set_geometry(Geometry {
                x: 12,
                y: 34,
                width: 400,
                height: 200,
            })
            .unwrap();
        let window = store.window();
        assert_eq!((window.x, window.y), (12, 34));
        assert_eq!((window.width, window.height), (800, 700));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hand_edited_unknown_keys_survive_a_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "custom": { "answer": 42 } }"#).unwrap();
        let store = PrefStore::load(path.clone());
        store.set("window.theme", json!(true)).unwrap();
        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["custom"]["answer"], json!(42));
        assert_eq!(on_disk["window"]["theme"], json!(true));
    }
}
