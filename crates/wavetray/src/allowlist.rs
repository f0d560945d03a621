//! Navigation allow-list for the embedded player page.

use regex::Regex;
use tracing::info;

/// URL fragments the player page is allowed to navigate to: the player and
/// passport hosts, their static assets, and local files. Everything else
/// (ads, trackers, third-party widgets) is refused.
const ALLOW_PATTERN: &str = concat!(
    r"(?i)file:///",
    r"|devtools",
    r"|avatars\.yandex\.net",
    r"|yapic\.yandex\.ru",
    r"|avatars\.mds\.yandex\.net",
    r"|\.ttf",
    r"|\.woff",
    r"|registration-validations",
    r"|passport-frontend",
    r"|storage\.yandex\.net",
    r"|music\.yandex\.ru",
    r"|radio\.yandex\.ru",
    r"|jquery\.min\.js",
    r"|jquery-ui\.min\.js",
    r"|captcha\.yandex\.",
    r"|csp\.yandex\.",
    r"|passport\.yandex\.",
    r"|\.css",
    r"|passport-static",
    r"|passport-auth-customs",
    r"|/react/",
);

/// Decides which navigation targets the webview may load.
pub struct RequestAllowlist {
    pattern: Regex,
}

impl RequestAllowlist {
    /// Compile the allow-list pattern.
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(ALLOW_PATTERN)?,
        })
    }

    /// True when `url` matches the allow-list. Refusals are logged at info
    /// so a user can see what was blocked.
    pub fn allows(&self, url: &str) -> bool {
        if self.pattern.is_match(url) {
            true
        } else {
            info!("blocked navigation: {}", url);
            false
        }
    }
}
