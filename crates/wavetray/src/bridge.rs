//! The script bridge into the player page: command dispatch, stylesheet
//! injection, and parsing of events posted back over the IPC channel.

use std::collections::BTreeMap;

use tracing::debug;
use wavetray_protocol::{Command, PlayerEvent};
use wry::WebView;

/// Player start page.
pub const RADIO_URL: &str = "https://radio.yandex.ru/";

const BRIDGE_JS: &str = include_str!("../assets/bridge.js");

/// A message posted by the injected script.
#[derive(Debug)]
pub enum BridgeEvent {
    /// The page finished loading and the bridge is installed.
    Ready,
    /// A player event scraped from the page.
    Player(PlayerEvent),
}

/// Build the initialization script: the bridge template with the element
/// selector table baked in.
pub fn init_script(selectors: &BTreeMap<String, String>) -> String {
    let table = serde_json::to_string(selectors).unwrap_or_else(|_| "{}".to_string());
    BRIDGE_JS.replace("__SELECTORS__", &table)
}

/// Parse an IPC message body. Unrecognized messages are logged and dropped;
/// a hostile or updated page must never crash the shell.
pub fn parse_event(body: &str) -> Option<BridgeEvent> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!("undecodable page message: {}", e);
            return None;
        }
    };
    if value.get("event").and_then(serde_json::Value::as_str) == Some("ready") {
        return Some(BridgeEvent::Ready);
    }
    match serde_json::from_value::<PlayerEvent>(value) {
        Ok(event) => Some(BridgeEvent::Player(event)),
        Err(e) => {
            debug!("unrecognized page message: {}", e);
            None
        }
    }
}

/// Handle for pushing commands and stylesheets into the page.
pub struct PageBridge {
    webview: WebView,
}

impl PageBridge {
    /// Wrap a built webview.
    pub fn new(webview: WebView) -> Self {
        Self { webview }
    }

    /// Fire-and-forget command dispatch. Before the page is ready the
    /// bridge global is absent and the script is a no-op; script errors are
    /// logged and dropped.
    pub fn send(&self, command: Command) {
        let script = format!(
            "window.__wavetray && window.__wavetray.dispatch({:?})",
            command.wire_name()
        );
        if let Err(e) = self.webview.evaluate_script(&script) {
            debug!("dropping {:?}: {}", command, e);
        }
    }

    /// Install `css` as the active theme stylesheet.
    pub fn inject_css(&self, css: &str) {
        let quoted = match serde_json::to_string(css) {
            Ok(quoted) => quoted,
            Err(e) => {
                debug!("cannot encode stylesheet: {}", e);
                return;
            }
        };
        let script = format!("window.__wavetray && window.__wavetray.applyTheme({})", quoted);
        if let Err(e) = self.webview.evaluate_script(&script) {
            debug!("cannot inject stylesheet: {}", e);
        }
    }

    /// Reload the page, e.g. after a theme change.
    pub fn reload(&self) {
        if let Err(e) = self.webview.evaluate_script("window.location.reload()") {
            debug!("cannot reload page: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use wavetray_protocol::TrackInfo;

    use super::*;

    #[test]
    fn init_script_embeds_selector_table() {
        let mut selectors = BTreeMap::new();
        selectors.insert("play".to_string(), "a.player-controls__play".to_string());
        let script = init_script(&selectors);
        assert!(script.contains(r#""play":"a.player-controls__play""#));
        assert!(!script.contains("__SELECTORS__"));
    }

    #[test]
    fn ready_message_parses() {
        assert!(matches!(
            parse_event(r#"{"event":"ready"}"#),
            Some(BridgeEvent::Ready)
        ));
    }

    #[test]
    fn track_changed_message_parses() {
        let body = r#"{"event":"trackChanged","payload":{"author":"Plaid","title":"Eyen","preview":null}}"#;
        match parse_event(body) {
            Some(BridgeEvent::Player(PlayerEvent::TrackChanged(track))) => {
                assert_eq!(
                    track,
                    TrackInfo {
                        author: "Plaid".to_string(),
                        title: "Eyen".to_string(),
                        preview: None,
                    }
                );
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn garbage_messages_are_dropped() {
        assert!(parse_event("not json").is_none());
        assert!(parse_event(r#"{"event":"selfDestruct"}"#).is_none());
        assert!(parse_event(r#"{"event":"trackChanged","payload":{"bogus":1}}"#).is_none());
    }
}
