//! The preference store: load, dotted-path access, save notifications.

use std::{collections::VecDeque, fs, io, path::PathBuf, sync::Arc};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    Result, defaults, merge,
    types::{Geometry, KeyboardBindings, NotificationPrefs, Settings, WindowPrefs},
};

/// A save subscriber. Receives a typed snapshot of the document after every
/// successful mutation.
type SaveHandler = Arc<dyn Fn(&Settings)>;

/// Queue of pending save notifications; nested `set` calls issued from inside
/// a subscriber enqueue here instead of recursing.
#[derive(Default)]
struct DispatchQueue {
    running: bool,
    pending: VecDeque<Settings>,
}

/// Owned, injectable preference store.
///
/// Mutations persist to disk synchronously before any subscriber observes
/// them, so subscribers always see durable state. A `set` that stores the
/// value already present is a no-op: no disk write, no save event. Together
/// with the dispatch queue this makes re-entrant mutation from a save
/// handler (the shortcut rollback path) terminate instead of recursing.
pub struct PrefStore {
    path: PathBuf,
    data: Mutex<Value>,
    subscribers: Mutex<Vec<SaveHandler>>,
    dispatch: Mutex<DispatchQueue>,
}

impl PrefStore {
    /// Load preferences from `path`, reconciling against the compiled-in
    /// defaults. Never fails: unreadable or malformed documents fall back to
    /// the defaults, and any repair is written back immediately.
    pub fn load(path: PathBuf) -> Self {
        let defaults = defaults::tree();
        let (mut value, had_file) = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(v) => (v, true),
                Err(e) => {
                    warn!("malformed preferences at {}: {}", path.display(), e);
                    (Value::Null, false)
                }
            },
            Err(e) => {
                if e.kind() == io::ErrorKind::NotFound {
                    debug!("no preferences at {}, starting from defaults", path.display());
                } else {
                    warn!("cannot read preferences at {}: {}", path.display(), e);
                }
                (Value::Null, false)
            }
        };

        let mut changed = merge::reconcile(&defaults, &mut value);
        changed |= merge::validate(&mut value);

        let store = Self {
            path,
            data: Mutex::new(value),
            subscribers: Mutex::new(Vec::new()),
            dispatch: Mutex::new(DispatchQueue::default()),
        };
        if changed || !had_file {
            if let Err(e) = store.persist() {
                warn!("cannot persist reconciled preferences: {}", e);
            }
        }
        store
    }

    /// The path this store persists to.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the value at a dotted path, e.g. `"keyboard.play"`.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.data.lock().pointer(&to_pointer(path)).cloned()
    }

    /// Write `value` at a dotted path, persist, and notify subscribers.
    ///
    /// Storing the value already present returns without touching disk or
    /// firing the save event.
    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        let snapshot = {
            let mut data = self.data.lock();
            let slot = ensure_path(&mut data, path);
            if *slot == value {
                return Ok(());
            }
            *slot = value;
            self.write_locked(&data)?;
            typed_snapshot(&data)
        };
        self.dispatch_save(snapshot);
        Ok(())
    }

    /// Persist window geometry in a single write. Width and height are
    /// clamped to the enforced minimums first.
    pub fn set_geometry(&self, geometry: Geometry) -> Result<()> {
        let geometry = geometry.clamped();
        let snapshot = {
            let mut data = self.data.lock();
            let window = ensure_path(&mut data, "window");
            let Value::Object(map) = window else {
                return Ok(());
            };
            let mut changed = false;
            let fields = [
                ("x", Value::from(geometry.x)),
                ("y", Value::from(geometry.y)),
                ("width", Value::from(geometry.width)),
                ("height", Value::from(geometry.height)),
            ];
            for (key, value) in fields {
                if map.get(key) != Some(&value) {
                    map.insert(key.to_string(), value);
                    changed = true;
                }
            }
            if !changed {
                return Ok(());
            }
            self.write_locked(&data)?;
            typed_snapshot(&data)
        };
        self.dispatch_save(snapshot);
        Ok(())
    }

    /// Register a save subscriber.
    pub fn subscribe(&self, handler: impl Fn(&Settings) + 'static) {
        self.subscribers.lock().push(Arc::new(handler));
    }

    /// A typed snapshot of the current document.
    pub fn snapshot(&self) -> Settings {
        typed_snapshot(&self.data.lock())
    }

    /// Typed view of the `window` domain.
    pub fn window(&self) -> WindowPrefs {
        self.snapshot().window
    }

    /// Typed view of the `notifications` domain.
    pub fn notifications(&self) -> NotificationPrefs {
        self.snapshot().notifications
    }

    /// Typed view of the `keyboard` domain.
    pub fn keyboard(&self) -> KeyboardBindings {
        self.snapshot().keyboard
    }

    /// Write the whole document to disk.
    fn persist(&self) -> Result<()> {
        let data = self.data.lock();
        self.write_locked(&data)
    }

    /// Serialize and write `data`; the caller holds the data lock.
    fn write_locked(&self, data: &Value) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Deliver a save snapshot. The outermost call drains the queue so that
    /// a subscriber mutating the store does not re-enter subscriber code
    /// while it is already running.
    fn dispatch_save(&self, snapshot: Settings) {
        {
            let mut queue = self.dispatch.lock();
            queue.pending.push_back(snapshot);
            if queue.running {
                return;
            }
            queue.running = true;
        }
        loop {
            let next = {
                let mut queue = self.dispatch.lock();
                match queue.pending.pop_front() {
                    Some(s) => s,
                    None => {
                        queue.running = false;
                        return;
                    }
                }
            };
            let subscribers: Vec<SaveHandler> = self.subscribers.lock().clone();
            for subscriber in &subscribers {
                subscriber(&next);
            }
        }
    }
}

/// Convert a dotted path into a JSON pointer, e.g. `a.b` → `/a/b`.
fn to_pointer(dotted: &str) -> String {
    format!("/{}", dotted.replace('.', "/"))
}

/// Walk a dotted path, creating intermediate objects, and return the slot.
fn ensure_path<'a>(root: &'a mut Value, dotted: &str) -> &'a mut Value {
    let mut node = root;
    for segment in dotted.split('.') {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = match node {
            Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
            _ => unreachable!("node coerced to an object above"),
        };
    }
    node
}

/// Deserialize the typed view. After load-time reconciliation the document
/// always matches the default shape, so failure here indicates a bug; we
/// still serve the defaults rather than panic.
fn typed_snapshot(data: &Value) -> Settings {
    serde_json::from_value(data.clone()).unwrap_or_else(|e| {
        warn!("preferences lost their shape ({}), serving defaults", e);
        Settings::default()
    })
}
