//! Desktop tray shell around a web radio player.
//!
//! Hosts the player page in a webview and layers the native desktop
//! surfaces on top: a tray icon with a control menu, global media
//! shortcuts, track-change notifications, theming, and a preferences file
//! that drives all of it live.

use std::{error::Error, path::PathBuf, sync::Arc, time::Instant};

use clap::Parser;
use global_hotkey::{GlobalHotKeyEvent, HotKeyState};
use hotkeys::{BindingManager, GlobalHotkeyApi};
use prefs::PrefStore;
use single_instance::SingleInstance;
use tao::{
    dpi::{LogicalSize, PhysicalPosition, PhysicalSize},
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::WindowBuilder,
};
use tracing::{debug, info, warn};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent, menu::MenuEvent};
use wavetray_protocol::PlayerEvent;
use wry::WebViewBuilder;

mod allowlist;
mod bridge;
mod debounce;
mod notify;
mod theme;
mod tray;
mod window;

use crate::{
    allowlist::RequestAllowlist,
    bridge::{BridgeEvent, PageBridge, RADIO_URL},
    debounce::{Click, ClickDebouncer, DOUBLE_CLICK_WINDOW},
    notify::{DesktopSink, Dispatcher},
    theme::ThemeController,
    tray::{MenuAction, TrayController},
};

#[derive(Debug, Parser)]
#[command(name = "wavetray", about = "Tray shell for a web radio player", version)]
struct Cli {
    /// Start with the main window hidden in the tray
    #[arg(long)]
    minimize: bool,

    /// Directory holding preferences.json (defaults to the platform config dir)
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(flatten)]
    log: logging::LogArgs,
}

/// Everything funneled into the event loop from callbacks and subscribers.
enum AppEvent {
    /// Raw tray icon interaction.
    Tray(TrayIconEvent),
    /// A tray menu item was activated.
    Menu(MenuEvent),
    /// A registered global shortcut fired.
    Hotkey(GlobalHotKeyEvent),
    /// The preference store persisted a change.
    Saved(prefs::Settings),
    /// The page bridge posted a message.
    Page(BridgeEvent),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log);

    let instance = SingleInstance::new("wavetray")?;
    if !instance.is_single() {
        info!("another instance is already running, exiting");
        return Ok(());
    }

    let prefs_path = cli
        .config_dir
        .map(|dir| dir.join("preferences.json"))
        .unwrap_or_else(prefs::default_prefs_path);
    debug!("preferences at {}", prefs_path.display());
    let store = Arc::new(PrefStore::load(prefs_path));

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();

    // Funnel every callback-style source into the loop so all state lives
    // on one thread.
    let proxy = event_loop.create_proxy();
    TrayIconEvent::set_event_handler(Some(move |event| {
        proxy.send_event(AppEvent::Tray(event)).ok();
    }));
    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        proxy.send_event(AppEvent::Menu(event)).ok();
    }));
    let proxy = event_loop.create_proxy();
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if event.state() == HotKeyState::Pressed {
            proxy.send_event(AppEvent::Hotkey(event)).ok();
        }
    }));
    let proxy = event_loop.create_proxy();
    store.subscribe(move |settings| {
        proxy.send_event(AppEvent::Saved(settings.clone())).ok();
    });

    let win_prefs = store.window();
    let window = WindowBuilder::new()
        .with_title("wavetray")
        .with_position(PhysicalPosition::new(win_prefs.x, win_prefs.y))
        .with_inner_size(PhysicalSize::new(win_prefs.width, win_prefs.height))
        .with_min_inner_size(LogicalSize::new(prefs::MIN_WIDTH, prefs::MIN_HEIGHT))
        .with_visible(false)
        .build(&event_loop)?;

    let mut theme = ThemeController::new(&win_prefs);
    let allow = RequestAllowlist::new()?;
    let script = bridge::init_script(&store.snapshot().element);
    let proxy = event_loop.create_proxy();
    let builder = WebViewBuilder::new()
        .with_url(RADIO_URL)
        .with_initialization_script(&script)
        .with_navigation_handler(move |url| allow.allows(&url))
        .with_ipc_handler(move |request| {
            if let Some(event) = bridge::parse_event(request.body()) {
                proxy.send_event(AppEvent::Page(event)).ok();
            }
        });
    #[cfg(not(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    )))]
    let webview = builder.build(&window)?;
    #[cfg(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd"
    ))]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        match window.default_vbox() {
            Some(vbox) => builder.build_gtk(vbox)?,
            None => return Err("window has no gtk container for the webview".into()),
        }
    };
    let page = PageBridge::new(webview);

    let api = Arc::new(GlobalHotkeyApi::new()?);
    let mut binder = BindingManager::new(api, store.clone());
    binder.bind_initial();

    let mut tray = TrayController::new(store.notifications().enable);
    let notifier = Dispatcher::new(store.clone(), Arc::new(DesktopSink));
    let mut debouncer = ClickDebouncer::new(DOUBLE_CLICK_WINDOW);

    let start_minimized = cli.minimize;
    let mut shown = false;
    let mut quitting = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = if quitting {
            ControlFlow::Exit
        } else {
            match debouncer.deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            }
        };

        match event {
            Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                if debouncer.poll(Instant::now()) == Some(Click::Single) {
                    copy_track_line(tray.tooltip(), &notifier);
                }
            }

            Event::UserEvent(AppEvent::Tray(tray_event)) => match tray_event {
                TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } => {
                    if debouncer.click(Instant::now()) == Some(Click::Double) {
                        window::toggle(&window);
                    }
                }
                // Platforms that synthesize a distinct double-click event go
                // through the same debouncer, which also cancels the pending
                // single-click copy.
                TrayIconEvent::DoubleClick {
                    button: MouseButton::Left,
                    ..
                } => {
                    if debouncer.click(Instant::now()) == Some(Click::Double) {
                        window::toggle(&window);
                    }
                }
                _ => {}
            },

            Event::UserEvent(AppEvent::Menu(menu_event)) => {
                match tray.ids().action_for(menu_event.id()) {
                    Some(MenuAction::Player(command)) => page.send(command),
                    Some(MenuAction::ToggleNotifications) => {
                        // The menu already flipped the check mark; persist it.
                        let enabled = tray.notifications_checked();
                        if let Err(e) =
                            store.set("notifications.enable", serde_json::Value::Bool(enabled))
                        {
                            warn!("cannot persist notification toggle: {}", e);
                        }
                    }
                    Some(MenuAction::ShowWindow) => window::show(&window),
                    Some(MenuAction::Quit) => {
                        quitting = true;
                        *control_flow = ControlFlow::Exit;
                    }
                    None => {}
                }
            }

            Event::UserEvent(AppEvent::Hotkey(hotkey_event)) => {
                if let Some(action) = binder.resolve(hotkey_event.id()) {
                    debug!("shortcut fired for {}", action);
                    page.send(action.into());
                }
            }

            Event::UserEvent(AppEvent::Saved(settings)) => {
                binder.reconcile(&settings.keyboard);
                tray.set_notifications_checked(settings.notifications.enable);
                if theme.refresh(&settings.window) {
                    page.reload();
                }
            }

            Event::UserEvent(AppEvent::Page(BridgeEvent::Ready)) => {
                let css = theme::stylesheet(theme.current(), &store.window());
                page.inject_css(&css);
                if !shown {
                    shown = true;
                    if start_minimized {
                        debug!("starting minimized to tray");
                    } else {
                        window::show(&window);
                    }
                }
            }

            Event::UserEvent(AppEvent::Page(BridgeEvent::Player(player_event))) => {
                match player_event {
                    PlayerEvent::TrackChanged(track) => {
                        tray.set_tooltip(&track.line());
                        notifier.track_changed(&track);
                    }
                    PlayerEvent::StateChanged { playing } => tray.set_playing(playing),
                }
            }

            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if store.window().tray_on_close() {
                    window.set_visible(false);
                } else {
                    quitting = true;
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                if window.is_minimized() && store.window().tray_on_minimize() {
                    window.set_minimized(false);
                    window.set_visible(false);
                }
            }

            Event::LoopDestroyed => {
                binder.unbind_all();
                window::persist_geometry(&store, &window);
            }

            _ => {}
        }
    });
}

/// Tray single click: copy the current track line and confirm. A silent
/// no-op before the first track is announced.
fn copy_track_line(line: &str, notifier: &Dispatcher) {
    if line.is_empty() {
        return;
    }
    notify::copy_to_clipboard(line);
    notifier.copied(line);
}
