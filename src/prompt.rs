// Prompt construction for the drafting assistant

use crate::models::{AdjustOption, FormState};

/// Persona sent as the system message with every completion request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that helps draft emails and text messages.";

const PROMPT_TRAILER: &str = "Ensure you follow good spacing and formatting.\n\
    Only provide the message text, no need to include the instructions or specifications.";

/// Build the prompt for a fresh draft from a form snapshot.
///
/// Pure and deterministic: the same snapshot always yields the same string.
pub fn build_generation_prompt(form: &FormState) -> String {
    let custom = if form.custom_instructions.is_empty() {
        "None"
    } else {
        form.custom_instructions.as_str()
    };
    let format_mode = if form.email_mode {
        "as an email"
    } else {
        "as a message"
    };

    format!(
        "Please help me draft a message with the following specifications:\n\
         Initial message/instructions: {}\n\
         Tone: {}\n\
         Length: {}\n\
         Additional instructions: {}\n\
         Special instructions: {}\n\
         Format mode: {}\n\
         {PROMPT_TRAILER}",
        form.initial_message,
        form.tone.label(),
        form.length.phrase(),
        custom,
        special_instructions(form),
        format_mode,
    )
}

/// Build the prompt that rewrites an existing draft per one adjust directive.
pub fn build_adjustment_prompt(current_message: &str, option: AdjustOption) -> String {
    format!(
        "Please help me adjust a message with the following specifications:\n\
         Initial message: {current_message}\n\
         Please adjust the message to: {}\n\
         {PROMPT_TRAILER}",
        option.directive(),
    )
}

// Toggle order is fixed: spelling, grammar, punctuation.
fn special_instructions(form: &FormState) -> String {
    let mut active = Vec::new();
    if form.fix_spelling {
        active.push("Fix spelling");
    }
    if form.fix_grammar {
        active.push("Fix grammar");
    }
    if form.fix_punctuation {
        active.push("Fix punctuation");
    }

    if active.is_empty() {
        "None".to_string()
    } else {
        active.join(", ")
    }
}
