use crate::api::ApiError;
use crate::core::JulesCore;
use crate::model::{CreateSessionRequest, Session};
use crate::notify::Toast;

/// Write operations: starting sessions and replying to them.
///
/// Each call reports progress and outcome as toasts. Nothing is staged
/// locally, so a failure leaves the caller exactly where it was.
pub struct CommandService;

impl CommandService {
    pub async fn create_session(
        core: &JulesCore,
        request: &CreateSessionRequest,
    ) -> Result<Session, ApiError> {
        core.notify(Toast::animated("Creating session..."));

        match core.api().create_session(request).await {
            Ok(session) => {
                tracing::info!(
                    name = %session.name,
                    source = %request.source_context.source,
                    "Session created"
                );
                core.notify(
                    Toast::success("Session created successfully")
                        .with_message(format!("Session {} created", session.name)),
                );
                Ok(session)
            }
            Err(err) => {
                core.notify(Toast::failure("Failed to create session", err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn send_message(
        core: &JulesCore,
        session_id: &str,
        prompt: &str,
    ) -> Result<(), ApiError> {
        core.notify(Toast::animated("Sending message..."));

        match core.api().send_message(session_id, prompt).await {
            Ok(()) => {
                tracing::info!(session_id, "Message sent");
                core.notify(Toast::success("Message sent"));
                Ok(())
            }
            Err(err) => {
                core.notify(Toast::failure("Failed to send message", err.to_string()));
                Err(err)
            }
        }
    }
}
