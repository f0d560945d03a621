//! Per-action binding reconciliation with rollback.

use std::{collections::BTreeMap, sync::Arc};

use prefs::{KeyboardBindings, PrefStore};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Action, HotkeyApi};

/// What the manager believes is registered for one action. An empty combo
/// means unbound; `id` is present exactly when the OS holds a registration.
#[derive(Debug, Clone, Default)]
struct Bound {
    combo: String,
    id: Option<u32>,
}

/// Keeps the OS-registered hotkeys in agreement with the `keyboard`
/// preferences domain.
///
/// The `current` cache is the sole authority on what is registered with the
/// OS. Reconciliation handles each action independently, so one rejected
/// combo never aborts the rest of the pass, and a failed registration rolls
/// the persisted settings back to the combo that is actually held.
pub struct BindingManager {
    api: Arc<dyn HotkeyApi>,
    store: Arc<PrefStore>,
    current: BTreeMap<Action, Bound>,
}

impl BindingManager {
    /// Create a manager with every action unbound.
    pub fn new(api: Arc<dyn HotkeyApi>, store: Arc<PrefStore>) -> Self {
        let current = Action::ALL
            .iter()
            .map(|action| (*action, Bound::default()))
            .collect();
        Self {
            api,
            store,
            current,
        }
    }

    /// Bind everything the store currently asks for. This is the same
    /// diff-and-rollback path as [`reconcile`](Self::reconcile), starting
    /// from an all-unbound cache, so a combo another application claimed
    /// before startup is cleared from the persisted settings too.
    pub fn bind_initial(&mut self) {
        let bindings = self.store.keyboard();
        self.reconcile(&bindings);
    }

    /// Bring the OS registrations in line with `proposed`, one action at a
    /// time in [`Action::ALL`] order.
    pub fn reconcile(&mut self, proposed: &KeyboardBindings) {
        for action in Action::ALL {
            let want = action.combo_in(proposed).to_string();
            self.reconcile_one(action, &want);
        }
    }

    fn reconcile_one(&mut self, action: Action, want: &str) {
        let old = self.current.get(&action).cloned().unwrap_or_default();
        if old.combo == want {
            return;
        }

        if let Some(id) = old.id {
            if let Err(e) = self.api.unregister(id) {
                warn!("unregister {} (`{}`): {}", action, old.combo, e);
            }
        }

        if want.is_empty() {
            self.current.insert(action, Bound::default());
            debug!("{} unbound", action);
            return;
        }

        match self.api.register(want) {
            Ok(id) => {
                self.current.insert(
                    action,
                    Bound {
                        combo: want.to_string(),
                        id: Some(id),
                    },
                );
                debug!("{} bound to `{}`", action, want);
            }
            Err(e) => {
                warn!("cannot bind {} to `{}`: {}", action, want, e);
                self.roll_back(action, old);
            }
        }
    }

    /// Restore `old` after a failed registration. The persisted settings are
    /// rewritten to the combo that is actually held, so they never claim a
    /// binding the OS does not have. If re-registering the old combo fails
    /// as well, the action is left unbound and the empty string is persisted.
    fn roll_back(&mut self, action: Action, old: Bound) {
        let mut restored = Bound {
            combo: old.combo.clone(),
            id: None,
        };
        if !old.combo.is_empty() {
            match self.api.register(&old.combo) {
                Ok(id) => restored.id = Some(id),
                Err(e) => {
                    warn!(
                        "cannot restore {} to `{}`, leaving unbound: {}",
                        action, old.combo, e
                    );
                    restored = Bound::default();
                }
            }
        }
        let combo = restored.combo.clone();
        self.current.insert(action, restored);
        if let Err(e) = self.store.set(&action.pref_path(), Value::String(combo)) {
            warn!("cannot persist rollback for {}: {}", action, e);
        }
    }

    /// Resolve a registration id back to its action.
    pub fn resolve(&self, id: u32) -> Option<Action> {
        self.current
            .iter()
            .find_map(|(action, bound)| (bound.id == Some(id)).then_some(*action))
    }

    /// Snapshot of currently bound actions as (action, combo) pairs, in
    /// [`Action::ALL`] order. Unbound actions are omitted.
    pub fn bindings_snapshot(&self) -> Vec<(Action, String)> {
        self.current
            .iter()
            .filter(|(_, bound)| bound.id.is_some())
            .map(|(action, bound)| (*action, bound.combo.clone()))
            .collect()
    }

    /// Unregister every currently bound action. Safe to call more than once;
    /// each registration is released exactly once.
    pub fn unbind_all(&mut self) {
        for action in Action::ALL {
            if let Some(bound) = self.current.get_mut(&action) {
                if let Some(id) = bound.id.take() {
                    if let Err(e) = self.api.unregister(id) {
                        warn!("unregister {} on teardown: {}", action, e);
                    }
                }
                bound.combo.clear();
            }
        }
    }
}
