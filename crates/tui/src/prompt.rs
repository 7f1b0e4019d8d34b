//! Collaborators that need the user: they post a [`UiRequest`] to the event
//! loop and wait for its answer.

use std::path::PathBuf;

use async_trait::async_trait;
use deck_engine::{
    EngineError,
    collab::{
        ActionSheetPresenter, HapticFeedback, Haptics, Navigator, ResultCollab, Route, Scanner,
    },
    scan::ActionSheet,
};
use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub enum UiRequest {
    /// Ask for one line of text. `None` means the user cancelled.
    Prompt {
        title: String,
        hint: String,
        reply: oneshot::Sender<Option<String>>,
    },
    Sheet {
        sheet: ActionSheet,
        reply: oneshot::Sender<Option<usize>>,
    },
    Navigate(Route),
    Haptic(HapticFeedback),
}

/// Sending half of the event loop's request queue.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiRequest>,
}

impl UiHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn post(&self, request: UiRequest) {
        if self.tx.send(request).is_err() {
            tracing::debug!("ui loop is gone, request dropped");
        }
    }

    async fn prompt(&self, title: &str, hint: &str) -> ResultCollab<Option<String>> {
        let (reply, answer) = oneshot::channel();
        self.post(UiRequest::Prompt {
            title: title.to_string(),
            hint: hint.to_string(),
            reply,
        });
        answer
            .await
            .map_err(|_| EngineError::Scan("prompt closed".to_string()))
    }
}

/// Live scan reads what a scanner gun or a paste types into a prompt; image
/// scans read the decoded payload from a file the user names.
#[derive(Debug, Clone)]
pub struct PromptScanner {
    ui: UiHandle,
}

impl PromptScanner {
    pub fn new(ui: UiHandle) -> Self {
        Self { ui }
    }

    async fn read_payload_file(&self, title: &str) -> ResultCollab<Option<String>> {
        let Some(path) = self.ui.prompt(title, "Path of the image payload file").await? else {
            return Ok(None);
        };
        let path = PathBuf::from(path.trim());
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| EngineError::Scan(format!("{}: {err}", path.display())))?;
        Ok(Some(content.trim().to_string()))
    }
}

#[async_trait]
impl Scanner for PromptScanner {
    async fn scan_qr(
        &self,
        launched_by: &str,
        use_merged_scanner: bool,
    ) -> ResultCollab<Option<String>> {
        tracing::debug!(launched_by, use_merged_scanner, "live scan");
        self.ui
            .prompt("Scan QR code", "Scan with a reader or paste the payload")
            .await
    }

    async fn pick_image_and_read_qr(&self) -> ResultCollab<Option<String>> {
        self.read_payload_file("Choose image").await
    }

    async fn read_qr_from_image_sheet(&self) -> ResultCollab<Option<String>> {
        self.read_payload_file("Open image").await
    }
}

#[derive(Debug, Clone)]
pub struct PromptSheets {
    ui: UiHandle,
}

impl PromptSheets {
    pub fn new(ui: UiHandle) -> Self {
        Self { ui }
    }
}

#[async_trait]
impl ActionSheetPresenter for PromptSheets {
    async fn present(&self, sheet: &ActionSheet) -> Option<usize> {
        let (reply, answer) = oneshot::channel();
        self.ui.post(UiRequest::Sheet {
            sheet: sheet.clone(),
            reply,
        });
        answer.await.ok().flatten()
    }
}

/// Navigation and haptics, both rendered by the event loop.
#[derive(Debug, Clone)]
pub struct UiNavigator {
    ui: UiHandle,
}

impl UiNavigator {
    pub fn new(ui: UiHandle) -> Self {
        Self { ui }
    }
}

impl Navigator for UiNavigator {
    fn go_to(&self, route: Route) {
        self.ui.post(UiRequest::Navigate(route));
    }
}

impl Haptics for UiNavigator {
    fn trigger(&self, feedback: HapticFeedback) {
        self.ui.post(UiRequest::Haptic(feedback));
    }
}
