use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::core::services::{SourceRegistry, SourceService};
use crate::core::JulesCore;
use crate::display::{activity_details, TerminalRenderer};
use crate::model::Session;
use crate::notify::TerminalNotifier;
use crate::view::{ActivitiesView, FormError, NewSessionForm, SessionsView};

/// Prints either JSON or rendered text, depending on `--json`.
struct Output {
    json: bool,
    renderer: TerminalRenderer,
}

impl Output {
    fn print<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            print!("{}", text());
        }
        Ok(())
    }
}

/// Execute a parsed command line.
///
/// Failures have already been shown as notifications by the time an error
/// is returned here.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.api_key)?;
    let core = JulesCore::new(config, Arc::new(TerminalNotifier::detect(cli.verbose)));
    let out = Output {
        json: cli.json,
        renderer: TerminalRenderer::detect(),
    };

    match cli.command {
        Command::Sources => sources(&core, &out).await,
        Command::Branches { source } => branches(&core, &out, source).await,
        Command::Sessions { source } => sessions(&core, &out, source).await,
        Command::Activities { session_id, copy } => activities(&core, &out, session_id, copy).await,
        Command::New {
            prompt,
            source,
            branch,
        } => new_session(&core, &out, prompt, source, branch).await,
        Command::Send {
            session_id,
            message,
        } => send(&core, &out, session_id, message).await,
    }
}

async fn sources(core: &JulesCore, out: &Output) -> Result<()> {
    let mut registry = SourceRegistry::new();
    registry.set_sources(SourceService::list_sources(core).await?);
    out.print(registry.sources(), || {
        out.renderer.sources(registry.sources(), registry.selected())
    })
}

async fn branches(core: &JulesCore, out: &Output, source: Option<String>) -> Result<()> {
    let name = match source {
        Some(name) => name,
        None => SourceService::list_sources(core)
            .await?
            .into_iter()
            .next()
            .map(|source| source.name)
            .context("No sources available")?,
    };
    let details = SourceService::get_source(core, &name).await?;
    out.print(&details, || out.renderer.branches(&details))
}

async fn sessions(core: &JulesCore, out: &Output, source: Option<String>) -> Result<()> {
    let view = SessionsView::new(core.clone());
    view.load().await?;
    if let Some(source) = source {
        if !view.select_source(&source) {
            bail!("Unknown source: {}", source);
        }
    }
    let sessions = view.filtered_sessions();
    out.print(&sessions, || out.renderer.sessions(&sessions))
}

/// The CLI only knows the id; the feed heading falls back to it.
fn bare_session(id: String) -> Session {
    Session {
        id,
        ..Default::default()
    }
}

async fn activities(core: &JulesCore, out: &Output, session_id: String, copy: bool) -> Result<()> {
    let view = ActivitiesView::new(core.clone(), bare_session(session_id));
    view.refresh().await?;

    if copy {
        let text = view
            .latest()
            .map(|activity| activity_details(&activity).copy_text)
            .unwrap_or_default();
        return out.print(&text, || format!("{}\n", text));
    }

    let activities = view.activities();
    out.print(&activities, || out.renderer.feed(view.session(), &activities))
}

async fn new_session(
    core: &JulesCore,
    out: &Output,
    prompt: String,
    source: Option<String>,
    branch: Option<String>,
) -> Result<()> {
    let mut form = NewSessionForm::new(core.clone());
    form.load_sources().await?;

    // Without details the branch is --branch or omitted.
    let details = match source {
        Some(source) => form.select_source(&source).await,
        None => form.load_source_details().await.map_err(FormError::from),
    };
    match details {
        Err(FormError::Api(err)) => {
            tracing::warn!(error = %err, "Creating session without source details")
        }
        other => other?,
    }

    if let Some(branch) = branch {
        form.set_branch(branch);
    }
    form.set_prompt(prompt);

    let session = form.submit().await?;
    out.print(&session, || out.renderer.sessions(std::slice::from_ref(&session)))
}

async fn send(core: &JulesCore, out: &Output, session_id: String, message: String) -> Result<()> {
    let view = ActivitiesView::new(core.clone(), bare_session(session_id));
    // A failed fetch only drops the summary line.
    match view.refresh().await {
        Ok(()) => {
            if let (false, Some(summary)) = (out.json, view.last_activity_summary()) {
                println!("Last Activity: {}", summary);
            }
        }
        Err(err) => tracing::warn!(error = %err, "Sending without the last activity"),
    }

    view.send_message(&message).await?;

    match view.latest() {
        Some(latest) => out.print(&latest, || out.renderer.activity(&latest)),
        None => Ok(()),
    }
}
