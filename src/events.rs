// Event types for async communication

use crate::models::Notification;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A user-facing notification raised by an action
    Notice(Notification),
    /// The draft text should be written to the system clipboard
    CopyToClipboard(String),
    /// A generate or adjust attempt ended, successfully or not
    RequestFinished,
}
