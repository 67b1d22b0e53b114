//! User-visible notifications.
//!
//! Every toast is echoed to stderr; success and failure toasts are also sent
//! to the desktop notification daemon when one is reachable.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use docsearch_logging::search_debug;
use notify_rust::{Notification, Timeout};

const APP_NAME: &str = "docsearch";
const ACTION_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// Work in progress; terminal only.
    Animated,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy)]
pub struct Toast<'a> {
    pub style: ToastStyle,
    pub title: &'a str,
    pub message: Option<&'a str>,
}

impl<'a> Toast<'a> {
    pub fn new(style: ToastStyle, title: &'a str) -> Self {
        Self {
            style,
            title,
            message: None,
        }
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }
}

pub fn show_toast(toast: &Toast<'_>) {
    echo(toast);
    if toast.style == ToastStyle::Animated {
        return;
    }
    if let Err(err) = desktop_notification(toast).show() {
        search_debug!("desktop notification unavailable: {}", err);
    }
}

/// Shows `toast` with a single action button and reports whether it was clicked.
///
/// Only freedesktop notification servers report clicks back; elsewhere this
/// behaves like [`show_toast`] and returns `false`. Waits at most
/// `ACTION_TIMEOUT_MS` for a click.
pub fn show_toast_with_action(toast: &Toast<'_>, action_label: &str) -> bool {
    echo(toast);
    action_notification(toast, action_label)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn action_notification(toast: &Toast<'_>, action_label: &str) -> bool {
    let mut notification = desktop_notification(toast);
    notification
        .action("default", action_label)
        .timeout(Timeout::Milliseconds(ACTION_TIMEOUT_MS));

    wait_bounded(Duration::from_millis(u64::from(ACTION_TIMEOUT_MS)), move || {
        let handle = match notification.show() {
            Ok(handle) => handle,
            Err(err) => {
                search_debug!("desktop notification unavailable: {}", err);
                return false;
            }
        };
        let mut clicked = false;
        handle.wait_for_action(|action| clicked = action == "default");
        clicked
    })
}

/// Runs `wait` on its own thread and gives up with `false` after `limit`.
///
/// Some servers never report a close for expired notifications, so a click
/// wait can otherwise block forever.
#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
fn wait_bounded<F>(limit: Duration, wait: F) -> bool
where
    F: FnOnce() -> bool + Send + 'static,
{
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = done_tx.send(wait());
    });

    match done_rx.recv_timeout(limit) {
        Ok(clicked) => clicked,
        Err(_) => {
            search_debug!("no notification action within {:?}", limit);
            false
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn action_notification(toast: &Toast<'_>, _action_label: &str) -> bool {
    if let Err(err) = desktop_notification(toast)
        .timeout(Timeout::Milliseconds(ACTION_TIMEOUT_MS))
        .show()
    {
        search_debug!("desktop notification unavailable: {}", err);
    }
    false
}

fn desktop_notification(toast: &Toast<'_>) -> Notification {
    let mut notification = Notification::new();
    notification.appname(APP_NAME).summary(toast.title);
    if let Some(message) = toast.message {
        notification.body(message);
    }
    notification
}

fn echo(toast: &Toast<'_>) {
    let marker = match toast.style {
        ToastStyle::Animated => "…",
        ToastStyle::Success => "✓",
        ToastStyle::Failure => "✗",
    };
    match toast.message {
        Some(message) => eprintln!("{marker} {}: {message}", toast.title),
        None => eprintln!("{marker} {}", toast.title),
    }
}
