use async_trait::async_trait;
use deck_engine::{
    EngineError,
    collab::{Clipboard, ResultCollab},
};

/// The system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn content(&self) -> ResultCollab<String> {
        let read = tokio::task::spawn_blocking(|| {
            arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text())
        })
        .await
        .map_err(|err| EngineError::Clipboard(err.to_string()))?;

        match read {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(err) => Err(EngineError::Clipboard(err.to_string())),
        }
    }
}
