// Reactive cell holding the current draft

use tokio::sync::watch;

/// Single source of truth for the drafted message. An empty string means "no
/// draft yet". Cloning yields another handle to the same cell, so the UI, the
/// controller and any in-flight tasks all observe the same value.
#[derive(Debug, Clone)]
pub struct DraftStore {
    cell: watch::Sender<String>,
}

impl DraftStore {
    pub fn new() -> Self {
        let (cell, _) = watch::channel(String::new());
        Self { cell }
    }

    pub fn get(&self) -> String {
        self.cell.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.borrow().is_empty()
    }

    /// Replace the draft in one step; readers never observe a partial write.
    pub fn set(&self, text: impl Into<String>) {
        let _ = self.cell.send_replace(text.into());
    }

    pub fn clear(&self) {
        self.set(String::new());
    }

    /// A receiver the render loop can borrow the latest committed value from.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.cell.subscribe()
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
