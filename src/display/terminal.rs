//! Plain-text rendering of sources, sessions and activity feeds for the CLI.

use std::fmt::Write;

use crossterm::style::{Color, Stylize};

use crate::display::activity::activity_details;
use crate::display::state::state_color;
use crate::model::{Activity, Session, Source};

/// Renders model lists as terminal text, optionally with ANSI colours.
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    color: bool,
}

impl TerminalRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// One line per source; the selected one is marked with `*`.
    pub fn sources(&self, sources: &[Source], selected: Option<&str>) -> String {
        let mut out = String::new();
        for source in sources {
            let marker = if Some(source.name.as_str()) == selected {
                "*"
            } else {
                " "
            };
            let _ = writeln!(
                out,
                "{} {}  {}",
                marker,
                self.bold(&source.display_title()),
                self.paint(&source.name, Color::DarkGrey)
            );
        }
        out
    }

    pub fn branches(&self, source: &Source) -> String {
        let default = source.default_branch();
        let mut out = String::new();
        for branch in source.branch_names() {
            if Some(branch) == default {
                let _ = writeln!(out, "{} {}", branch, self.paint("(default)", Color::DarkGrey));
            } else {
                let _ = writeln!(out, "{}", branch);
            }
        }
        out
    }

    /// `[STATE] title  id  url`, state coloured by [`state_color`]. The url is
    /// left off when the server sent none.
    pub fn sessions(&self, sessions: &[Session]) -> String {
        let mut out = String::new();
        for session in sessions {
            let tag = format!("[{}]", session.state);
            let _ = write!(
                out,
                "{} {}  {}",
                self.paint(&tag, state_color(&session.state).terminal_color()),
                session.display_title(),
                self.paint(&session.id, Color::DarkGrey)
            );
            if !session.url.is_empty() {
                let _ = write!(out, "  {}", self.paint(&session.url, Color::Blue));
            }
            out.push('\n');
        }
        out
    }

    /// Feed heading followed by each activity's markdown, in the given order.
    pub fn feed(&self, session: &Session, activities: &[Activity]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.bold(&format!("Chat: {}", session.feed_title())));
        for activity in activities {
            out.push('\n');
            out.push_str(&self.activity(activity));
        }
        out
    }

    /// `── label · time` followed by the activity's markdown.
    pub fn activity(&self, activity: &Activity) -> String {
        let details = activity_details(activity);
        let mut out = format!(
            "── {} · {}\n",
            self.bold(details.label),
            self.paint(&activity.create_time, Color::DarkGrey)
        );
        if !details.markdown.is_empty() {
            out.push_str(&details.markdown);
            out.push('\n');
        }
        out
    }
}
