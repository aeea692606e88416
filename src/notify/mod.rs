//! User-visible notifications
//!
//! Every fetch and submit reports its outcome as a [`Toast`]. Notifying never
//! blocks and never fails; how a toast is shown is up to the [`Notifier`].

use std::io::Write;

use crossterm::style::{Color, Stylize};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// An operation is in flight.
    Animated,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
}

impl Toast {
    pub fn animated(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Animated,
            title: title.into(),
            message: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Success,
            title: title.into(),
            message: None,
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: ToastStyle::Failure,
            title: title.into(),
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Sink for toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to stderr, coloured by style when stderr is a terminal.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    /// Also print in-flight toasts ("Creating session...").
    pub show_progress: bool,
    /// Emit ANSI styling.
    pub color: bool,
}

impl TerminalNotifier {
    pub fn new(show_progress: bool, color: bool) -> Self {
        Self {
            show_progress,
            color,
        }
    }

    /// Colour when stderr is a terminal and `NO_COLOR` is unset.
    pub fn detect(show_progress: bool) -> Self {
        use std::io::IsTerminal;
        let color = std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(show_progress, color)
    }

    fn format(toast: &Toast) -> String {
        match &toast.message {
            Some(message) if !message.is_empty() => format!("{}: {}", toast.title, message),
            _ => toast.title.clone(),
        }
    }

    /// The line written for `toast`, or `None` if it is not shown.
    fn render(&self, toast: &Toast) -> Option<String> {
        if toast.style == ToastStyle::Animated && !self.show_progress {
            return None;
        }
        let line = Self::format(toast);
        if !self.color {
            return Some(line);
        }
        let styled = match toast.style {
            ToastStyle::Animated => line.with(Color::DarkGrey),
            ToastStyle::Success => line.with(Color::Green),
            ToastStyle::Failure => line.with(Color::Red).bold(),
        };
        Some(styled.to_string())
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        match toast.style {
            ToastStyle::Animated => tracing::debug!(title = %toast.title, "toast"),
            ToastStyle::Success => tracing::info!(title = %toast.title, "toast"),
            ToastStyle::Failure => {
                tracing::warn!(title = %toast.title, message = ?toast.message, "toast")
            }
        }

        if let Some(line) = self.render(&toast) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
        }
    }
}

/// Keeps every toast in memory; used by tests to assert on what the user saw.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn failures(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .iter()
            .filter(|toast| toast.style == ToastStyle::Failure)
            .cloned()
            .collect()
    }

    /// Most recent toast, if any.
    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}
