// Binds form actions to the prompt builder, the completion client and the
// draft store.

use tokio::sync::mpsc;

use crate::api::{ApiError, CompletionApi, CompletionRequest};
use crate::draft::DraftStore;
use crate::events::AppEvent;
use crate::models::{FormState, Notification};
use crate::prompt;

/// The single failure an action can end with. Each variant maps to exactly
/// one notification; precondition failures never reach the client.
#[derive(Debug)]
enum ActionError {
    MissingApiKey,
    MissingAdjustOption,
    NothingToAdjust,
    Provider(ApiError),
}

impl ActionError {
    fn into_notification(self) -> Notification {
        match self {
            Self::MissingApiKey => Notification::error("Please enter your OpenAI API key."),
            Self::MissingAdjustOption => {
                Notification::error("Please select an option to adjust the message.")
            }
            Self::NothingToAdjust => Notification::error("No message to adjust."),
            Self::Provider(err) => Notification::error(format!("Error: {err}")),
        }
    }
}

/// Drives the generate, adjust, reset and copy actions against a form
/// snapshot. Clones share the same draft store and event channel, so
/// overlapping actions race on the store and the last write wins.
#[derive(Debug, Clone)]
pub struct Controller<C> {
    client: C,
    draft: DraftStore,
    model: String,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl<C: CompletionApi> Controller<C> {
    pub const fn new(
        client: C,
        draft: DraftStore,
        model: String,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            client,
            draft,
            model,
            events,
        }
    }

    /// Clear the draft. The form fields are cleared by the caller, which owns
    /// them.
    pub fn reset(&self) {
        self.draft.clear();
    }

    pub async fn generate(&self, form: FormState) {
        let outcome = self.try_generate(form).await;
        self.finish(outcome, "Message generated successfully!");
    }

    pub async fn adjust(&self, form: FormState) {
        let outcome = self.try_adjust(form).await;
        self.finish(outcome, "Message adjusted successfully!");
    }

    /// Hand the draft to the clipboard bridge, or warn when there is nothing
    /// to copy.
    pub fn copy(&self) {
        if self.draft.is_empty() {
            self.notify(Notification::warning("No text to copy!"));
            return;
        }

        let _ = self.events.send(AppEvent::CopyToClipboard(self.draft.get()));
        self.notify(Notification::info("Text copied to clipboard!"));
    }

    async fn try_generate(&self, form: FormState) -> Result<(), ActionError> {
        if form.api_key.is_empty() {
            return Err(ActionError::MissingApiKey);
        }

        let user_prompt = prompt::build_generation_prompt(&form);
        let text = self.complete(form.api_key, user_prompt).await?;
        self.draft.set(text);
        Ok(())
    }

    // Precondition order matters: option, then draft, then key. The first
    // unmet one decides the notification.
    async fn try_adjust(&self, form: FormState) -> Result<(), ActionError> {
        let option = form.adjust_option.ok_or(ActionError::MissingAdjustOption)?;
        let current = self.draft.get();
        if current.is_empty() {
            return Err(ActionError::NothingToAdjust);
        }
        if form.api_key.is_empty() {
            return Err(ActionError::MissingApiKey);
        }

        let user_prompt = prompt::build_adjustment_prompt(&current, option);
        let text = self.complete(form.api_key, user_prompt).await?;
        self.draft.set(text);
        Ok(())
    }

    async fn complete(&self, api_key: String, user_prompt: String) -> Result<String, ActionError> {
        let request = CompletionRequest {
            api_key,
            model: self.model.clone(),
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            user_prompt,
        };

        self.client
            .complete(request)
            .await
            .map_err(ActionError::Provider)
    }

    fn finish(&self, outcome: Result<(), ActionError>, success_message: &str) {
        match outcome {
            Ok(()) => self.notify(Notification::info(success_message)),
            Err(err) => self.notify(err.into_notification()),
        }
        let _ = self.events.send(AppEvent::RequestFinished);
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(AppEvent::Notice(notification));
    }
}
