//! Native notifications: a capability trait over the OS surface plus a
//! dispatcher that applies the `notifications` preference domain.

#[cfg(all(unix, not(target_os = "macos")))]
use std::path::Path;
use std::{sync::Arc, time::Duration};

use prefs::PrefStore;
use tracing::{debug, info, warn};
use wavetray_protocol::TrackInfo;

/// Display time for the clipboard confirmation toast.
const CONFIRM_DISPLAY_TIME: Duration = Duration::from_millis(1500);

/// One notification request, fully resolved.
pub struct NotificationSpec {
    /// Summary line.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Optional path to a preview image on local disk.
    pub image: Option<String>,
    /// How long the notification stays on screen.
    pub display_time: Duration,
    /// Invoked when the user activates the notification, where the platform
    /// supports actions.
    pub on_action: Option<Box<dyn FnOnce() + Send>>,
}

/// Capability trait over the OS notification surface, so the dispatcher can
/// be exercised against a recording fake.
pub trait NotificationSink: Send + Sync {
    /// Show one notification. Failures are the sink's problem to log.
    fn show(&self, spec: NotificationSpec);
}

/// Real sink backed by `notify-rust`.
pub struct DesktopSink;

impl NotificationSink for DesktopSink {
    fn show(&self, spec: NotificationSpec) {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname("wavetray")
            .summary(&spec.title)
            .body(&spec.text)
            .timeout(notify_rust::Timeout::Milliseconds(
                u32::try_from(spec.display_time.as_millis()).unwrap_or(u32::MAX),
            ));

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            if let Some(image) = &spec.image {
                if Path::new(image).exists() {
                    notification.image_path(image);
                } else {
                    debug!("preview `{}` is not a local file, skipping", image);
                }
            }
            if spec.on_action.is_some() {
                notification.action("default", "Open");
            }
            match notification.show() {
                Ok(handle) => {
                    if let Some(on_action) = spec.on_action {
                        // wait_for_action blocks until the notification is
                        // closed, so it gets its own thread.
                        std::thread::spawn(move || {
                            handle.wait_for_action(|action| {
                                if action == "default" {
                                    on_action();
                                }
                            });
                        });
                    }
                }
                Err(e) => warn!("cannot show notification: {}", e),
            }
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        {
            // No action support on this platform; the callback is dropped.
            if let Err(e) = notification.show() {
                warn!("cannot show notification: {}", e);
            }
        }
    }
}

/// Applies the `notifications` preferences to every request: suppression
/// when disabled, preview stripping, and the configured display time.
pub struct Dispatcher {
    store: Arc<PrefStore>,
    sink: Arc<dyn NotificationSink>,
}

impl Dispatcher {
    /// Create a dispatcher over `sink` driven by `store`.
    pub fn new(store: Arc<PrefStore>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { store, sink }
    }

    /// Fire-and-forget. Preferences are consulted at call time, so a toggle
    /// takes effect for the very next notification.
    pub fn notify(&self, mut spec: NotificationSpec) {
        let prefs = self.store.notifications();
        if !prefs.enable {
            debug!("notifications disabled, dropping `{}`", spec.title);
            return;
        }
        if !prefs.show_previews {
            spec.image = None;
        }
        info!("notification: {}", spec.title);
        self.sink.show(spec);
    }

    /// Announce a track change. Activating the notification copies the
    /// track line to the clipboard and confirms the copy.
    pub fn track_changed(&self, track: &TrackInfo) {
        let line = track.line();
        let sink = self.sink.clone();
        let on_action = Box::new(move || {
            copy_to_clipboard(&line);
            sink.show(confirmation(&line));
        });
        self.notify(NotificationSpec {
            title: track.author.clone(),
            text: track.title.clone(),
            image: track.preview.clone(),
            display_time: Duration::from_millis(self.store.notifications().display_time),
            on_action: Some(on_action),
        });
    }

    /// Confirm a clipboard copy initiated from the tray.
    pub fn copied(&self, line: &str) {
        self.notify(confirmation(line));
    }
}

fn confirmation(line: &str) -> NotificationSpec {
    NotificationSpec {
        title: "Copied to clipboard".to_string(),
        text: line.to_string(),
        image: None,
        display_time: CONFIRM_DISPLAY_TIME,
        on_action: None,
    }
}

/// Put `text` on the system clipboard. Returns false (after logging) when
/// the clipboard is unavailable, e.g. in a headless session.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => true,
        Err(e) => {
            warn!("clipboard write failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;

    /// Records every spec instead of showing it.
    #[derive(Default)]
    struct FakeSink {
        shown: Mutex<Vec<NotificationSpec>>,
    }

    impl NotificationSink for FakeSink {
        fn show(&self, spec: NotificationSpec) {
            self.shown.lock().unwrap().push(spec);
        }
    }

    impl FakeSink {
        fn take(&self) -> Vec<NotificationSpec> {
            std::mem::take(&mut self.shown.lock().unwrap())
        }
    }

    struct Fixture {
        store: Arc<PrefStore>,
        sink: Arc<FakeSink>,
        dispatcher: Dispatcher,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(PrefStore::load(dir.path().join("preferences.json")));
        let sink = Arc::new(FakeSink::default());
        let dispatcher = Dispatcher::new(store.clone(), sink.clone());
        Fixture {
            store,
            sink,
            dispatcher,
            _dir: dir,
        }
    }

    fn track() -> TrackInfo {
        TrackInfo {
            author: "Boards of Canada".to_string(),
            title: "Roygbiv".to_string(),
            preview: Some("/tmp/preview.png".to_string()),
        }
    }

    #[test]
    fn track_change_shows_author_and_title() {
        let fx = fixture();
        fx.dispatcher.track_changed(&track());
        let shown = fx.sink.take();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Boards of Canada");
        assert_eq!(shown[0].text, "Roygbiv");
        assert!(shown[0].on_action.is_some());
    }

    #[test]
    fn disabled_notifications_are_dropped() {
        let fx = fixture();
        fx.store
            .set("notifications.enable", serde_json::json!(false))
            .unwrap();
        fx.dispatcher.track_changed(&track());
        assert!(fx.sink.take().is_empty());
    }

    #[test]
    fn previews_are_stripped_when_disabled() {
        let fx = fixture();
        fx.store
            .set("notifications.showPreviews", serde_json::json!(false))
            .unwrap();
        fx.dispatcher.track_changed(&track());
        let shown = fx.sink.take();
        assert_eq!(shown[0].image, None);
    }

    #[test]
    fn display_time_comes_from_preferences() {
        let fx = fixture();
        fx.store
            .set("notifications.displayTime", serde_json::json!(1200))
            .unwrap();
        fx.dispatcher.track_changed(&track());
        let shown = fx.sink.take();
        assert_eq!(shown[0].display_time, Duration::from_millis(1200));
    }

    #[test]
    fn activating_a_track_notification_confirms_the_copy() {
        let fx = fixture();
        fx.dispatcher.track_changed(&track());
        let mut shown = fx.sink.take();
        let on_action = shown.remove(0).on_action.unwrap();

        // The clipboard may be unavailable under test; the confirmation is
        // shown regardless.
        on_action();
        let shown = fx.sink.take();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Copied to clipboard");
        assert_eq!(shown[0].text, "Roygbiv by Boards of Canada");
        assert_eq!(shown[0].display_time, CONFIRM_DISPLAY_TIME);
    }

    #[test]
    fn tray_copy_confirmation_uses_fixed_display_time() {
        let fx = fixture();
        fx.dispatcher.copied("Roygbiv by Boards of Canada");
        let shown = fx.sink.take();
        assert_eq!(shown[0].title, "Copied to clipboard");
        assert_eq!(shown[0].display_time, CONFIRM_DISPLAY_TIME);
    }
}
