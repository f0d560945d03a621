//! Theme resolution and stylesheet loading.

use std::{fs, path::Path};

use prefs::WindowPrefs;
use tracing::{debug, warn};

/// Built-in light stylesheet.
pub const WHITE_CSS: &str = include_str!("../assets/white.css");
/// Built-in dark stylesheet.
pub const DARK_CSS: &str = include_str!("../assets/dark.css");

/// Effective theme for the player page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Built-in light stylesheet.
    White,
    /// Built-in dark stylesheet.
    Dark,
    /// User-supplied stylesheets from the configured directory.
    Custom,
}

/// Resolve the effective theme from window preferences. A custom theme that
/// is enabled but unusable (missing directory, no `.css` files) falls back
/// to white, not dark: the dark flag only applies when the custom theme is
/// switched off.
pub fn resolve(window: &WindowPrefs) -> Theme {
    if window.use_custom {
        if has_stylesheets(Path::new(&window.custom_theme_path)) {
            Theme::Custom
        } else {
            Theme::White
        }
    } else if window.theme {
        Theme::Dark
    } else {
        Theme::White
    }
}

fn has_stylesheets(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().any(|entry| is_css(&entry.path())),
        Err(_) => false,
    }
}

fn is_css(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
}

/// The stylesheet text to inject for `theme`. A custom directory that has
/// become unreadable since resolution falls back to the white stylesheet.
pub fn stylesheet(theme: Theme, window: &WindowPrefs) -> String {
    match theme {
        Theme::White => WHITE_CSS.to_string(),
        Theme::Dark => DARK_CSS.to_string(),
        Theme::Custom => {
            let css = read_custom(Path::new(&window.custom_theme_path));
            if css.is_empty() {
                warn!(
                    "custom theme directory `{}` yielded no readable stylesheets",
                    window.custom_theme_path
                );
                WHITE_CSS.to_string()
            } else {
                css
            }
        }
    }
}

/// Concatenate every `.css` file in `dir`, in filename order so the result
/// is stable across runs.
fn read_custom(dir: &Path) -> String {
    let mut files: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_css(path))
            .collect(),
        Err(e) => {
            warn!("cannot read custom theme directory {}: {}", dir.display(), e);
            return String::new();
        }
    };
    files.sort();

    let mut css = String::new();
    for path in files {
        match fs::read_to_string(&path) {
            Ok(text) => {
                css.push_str(&text);
                css.push('\n');
            }
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }
    css
}

/// Tracks the active theme across preference saves so the page is only
/// reloaded when the theme actually changes.
pub struct ThemeController {
    current: Theme,
}

impl ThemeController {
    /// Resolve the starting theme.
    pub fn new(window: &WindowPrefs) -> Self {
        let current = resolve(window);
        debug!("theme resolved to {:?}", current);
        Self { current }
    }

    /// The theme currently applied to the page.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Re-resolve after a save; true when the theme changed and the page
    /// needs a reload to pick up the new stylesheet.
    pub fn refresh(&mut self, window: &WindowPrefs) -> bool {
        let next = resolve(window);
        if next == self.current {
            return false;
        }
        debug!("theme changed {:?} -> {:?}", self.current, next);
        self.current = next;
        true
    }
}
