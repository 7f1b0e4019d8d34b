//! Routes the scan button's tap and long-press to one input source.
//!
//! The decision is a table over platform, gesture and clipboard content; see
//! [`plan`]. The dispatcher then runs exactly one source and hands back the
//! raw payload, untouched.

use std::sync::Arc;

use serde::Deserialize;

use crate::collab::{ActionSheetPresenter, Clipboard, Scanner};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Desktop,
    #[serde(alias = "mobile_ios")]
    Ios,
    #[serde(alias = "mobile_android")]
    Android,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanGesture {
    Tap,
    LongPress,
}

/// Where the scanned or pasted string comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScanSource {
    LiveScan,
    ImagePickerScan,
    ClipboardPaste,
    Cancel,
}

impl ScanSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cancel => "Cancel",
            Self::ImagePickerScan => "Choose image",
            Self::LiveScan => "Scan QR code",
            Self::ClipboardPaste => "Copy from clipboard",
        }
    }
}

/// An option sheet shown on long-press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSheet {
    pub options: Vec<ScanSource>,
    pub cancel_index: usize,
    /// iOS sheets pop over the scan button.
    pub anchored: bool,
    pub title: Option<String>,
    pub message: Option<String>,
}

impl ActionSheet {
    fn scan_options(clipboard_empty: bool) -> Vec<ScanSource> {
        let mut options = vec![
            ScanSource::Cancel,
            ScanSource::ImagePickerScan,
            ScanSource::LiveScan,
        ];
        if !clipboard_empty {
            options.push(ScanSource::ClipboardPaste);
        }
        options
    }

    fn anchored(options: Vec<ScanSource>) -> Self {
        Self {
            options,
            cancel_index: 0,
            anchored: true,
            title: None,
            message: None,
        }
    }

    fn buttons(options: Vec<ScanSource>) -> Self {
        Self {
            options,
            cancel_index: 0,
            anchored: false,
            title: Some(String::new()),
            message: Some(String::new()),
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.options.iter().map(|option| option.label()).collect()
    }

    /// The source picked by the user; dismissals and unknown indices cancel.
    pub fn source_at(&self, choice: Option<usize>) -> ScanSource {
        choice
            .and_then(|index| self.options.get(index).copied())
            .unwrap_or(ScanSource::Cancel)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanPlan {
    /// Desktop: anchored sheet resolving to a QR read from an image.
    ImageSheet,
    LiveScan,
    Options(ActionSheet),
}

/// The scan button decision table.
///
/// | gesture   | platform | plan                                   |
/// |-----------|----------|----------------------------------------|
/// | any       | desktop  | image sheet                            |
/// | tap       | mobile   | live scan                              |
/// | long-press| mobile   | cancel / image / scan (+ clipboard)    |
pub fn plan(platform: Platform, gesture: ScanGesture, clipboard_empty: bool) -> ScanPlan {
    match (platform, gesture) {
        (Platform::Desktop, _) => ScanPlan::ImageSheet,
        (Platform::Ios | Platform::Android, ScanGesture::Tap) => ScanPlan::LiveScan,
        (Platform::Ios, ScanGesture::LongPress) => {
            ScanPlan::Options(ActionSheet::anchored(ActionSheet::scan_options(clipboard_empty)))
        }
        (Platform::Android, ScanGesture::LongPress) => {
            ScanPlan::Options(ActionSheet::buttons(ActionSheet::scan_options(clipboard_empty)))
        }
    }
}

pub struct ScanActionDispatcher {
    platform: Platform,
    launched_by: String,
    scanner: Arc<dyn Scanner>,
    clipboard: Arc<dyn Clipboard>,
    sheets: Arc<dyn ActionSheetPresenter>,
}

impl ScanActionDispatcher {
    pub fn new(
        platform: Platform,
        launched_by: impl Into<String>,
        scanner: Arc<dyn Scanner>,
        clipboard: Arc<dyn Clipboard>,
        sheets: Arc<dyn ActionSheetPresenter>,
    ) -> Self {
        Self {
            platform,
            launched_by: launched_by.into(),
            scanner,
            clipboard,
            sheets,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Resolve `gesture` and run the one source it selects.
    ///
    /// Returns `None` on cancel or when the source failed.
    pub async fn dispatch(&self, gesture: ScanGesture) -> Option<String> {
        let clipboard_empty = match (self.platform, gesture) {
            (Platform::Desktop, _) | (_, ScanGesture::Tap) => true,
            _ => self.clipboard_is_empty().await,
        };

        let acquired = match plan(self.platform, gesture, clipboard_empty) {
            ScanPlan::ImageSheet => self.scanner.read_qr_from_image_sheet().await,
            ScanPlan::LiveScan => self.scanner.scan_qr(&self.launched_by, false).await,
            ScanPlan::Options(sheet) => {
                let choice = self.sheets.present(&sheet).await;
                match sheet.source_at(choice) {
                    ScanSource::ImagePickerScan => self.scanner.pick_image_and_read_qr().await,
                    ScanSource::LiveScan => self.scanner.scan_qr(&self.launched_by, false).await,
                    ScanSource::ClipboardPaste => self.clipboard.content().await.map(Some),
                    ScanSource::Cancel => Ok(None),
                }
            }
        };

        match acquired {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("scan gesture resolved to nothing: {err}");
                None
            }
        }
    }

    async fn clipboard_is_empty(&self) -> bool {
        match self.clipboard.content().await {
            Ok(content) => content.trim().is_empty(),
            Err(err) => {
                tracing::debug!("clipboard read failed: {err}");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{EngineError, collab::ResultCollab};

    #[derive(Default)]
    struct Sources {
        calls: Mutex<Vec<&'static str>>,
        clipboard: String,
        clipboard_fails: bool,
        choice: Option<usize>,
        presented: Mutex<Vec<ActionSheet>>,
    }

    impl Sources {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Scanner for Sources {
        async fn scan_qr(&self, launched_by: &str, use_merged_scanner: bool) -> ResultCollab<Option<String>> {
            assert_eq!(launched_by, "WalletsList");
            assert!(!use_merged_scanner);
            self.calls.lock().unwrap().push("live");
            Ok(Some("bitcoin:bc1qlive".to_string()))
        }

        async fn pick_image_and_read_qr(&self) -> ResultCollab<Option<String>> {
            self.calls.lock().unwrap().push("image");
            Ok(Some("bitcoin:bc1qimage".to_string()))
        }

        async fn read_qr_from_image_sheet(&self) -> ResultCollab<Option<String>> {
            self.calls.lock().unwrap().push("image_sheet");
            Ok(Some("bitcoin:bc1qsheet".to_string()))
        }
    }

    #[async_trait]
    impl Clipboard for Sources {
        async fn content(&self) -> ResultCollab<String> {
            if self.clipboard_fails {
                return Err(EngineError::Clipboard("no display".to_string()));
            }
            Ok(self.clipboard.clone())
        }
    }

    #[async_trait]
    impl ActionSheetPresenter for Sources {
        async fn present(&self, sheet: &ActionSheet) -> Option<usize> {
            self.presented.lock().unwrap().push(sheet.clone());
            self.choice
        }
    }

    fn dispatcher(platform: Platform, sources: Sources) -> (ScanActionDispatcher, Arc<Sources>) {
        let sources = Arc::new(sources);
        let dispatcher = ScanActionDispatcher::new(
            platform,
            "WalletsList",
            sources.clone(),
            sources.clone(),
            sources.clone(),
        );
        (dispatcher, sources)
    }

    #[test]
    fn desktop_always_uses_image_sheet() {
        for gesture in [ScanGesture::Tap, ScanGesture::LongPress] {
            for clipboard_empty in [true, false] {
                assert_eq!(
                    plan(Platform::Desktop, gesture, clipboard_empty),
                    ScanPlan::ImageSheet
                );
            }
        }
    }

    #[test]
    fn mobile_tap_scans_live() {
        assert_eq!(plan(Platform::Ios, ScanGesture::Tap, false), ScanPlan::LiveScan);
        assert_eq!(plan(Platform::Android, ScanGesture::Tap, true), ScanPlan::LiveScan);
    }

    #[test]
    fn clipboard_option_only_when_clipboard_has_content() {
        for platform in [Platform::Ios, Platform::Android] {
            let ScanPlan::Options(empty) = plan(platform, ScanGesture::LongPress, true) else {
                panic!("long-press on mobile must show options");
            };
            assert_eq!(empty.labels(), vec!["Cancel", "Choose image", "Scan QR code"]);

            let ScanPlan::Options(full) = plan(platform, ScanGesture::LongPress, false) else {
                panic!("long-press on mobile must show options");
            };
            let paste = full
                .options
                .iter()
                .filter(|option| **option == ScanSource::ClipboardPaste)
                .count();
            assert_eq!(full.options.len(), 4);
            assert_eq!(paste, 1);
        }
    }

    #[test]
    fn sheet_style_follows_platform() {
        let ScanPlan::Options(ios) = plan(Platform::Ios, ScanGesture::LongPress, true) else {
            panic!("expected options");
        };
        let ScanPlan::Options(android) = plan(Platform::Android, ScanGesture::LongPress, true) else {
            panic!("expected options");
        };

        assert!(ios.anchored);
        assert_eq!(ios.cancel_index, 0);
        assert!(!android.anchored);
        assert_eq!(android.title.as_deref(), Some(""));
        assert_eq!(android.message.as_deref(), Some(""));
    }

    #[test]
    fn dismissed_or_unknown_choice_cancels() {
        let ScanPlan::Options(sheet) = plan(Platform::Ios, ScanGesture::LongPress, true) else {
            panic!("expected options");
        };
        assert_eq!(sheet.source_at(None), ScanSource::Cancel);
        assert_eq!(sheet.source_at(Some(3)), ScanSource::Cancel);
        assert_eq!(sheet.source_at(Some(1)), ScanSource::ImagePickerScan);
    }

    #[tokio::test]
    async fn android_whitespace_clipboard_offers_three_options() {
        let (dispatcher, sources) = dispatcher(
            Platform::Android,
            Sources {
                clipboard: "  ".to_string(),
                ..Sources::default()
            },
        );

        let value = dispatcher.dispatch(ScanGesture::LongPress).await;

        assert_eq!(value, None);
        let presented = sources.presented.lock().unwrap();
        assert_eq!(presented.len(), 1);
        assert_eq!(
            presented[0].options,
            vec![ScanSource::Cancel, ScanSource::ImagePickerScan, ScanSource::LiveScan]
        );
        assert!(sources.calls().is_empty());
    }

    #[tokio::test]
    async fn paste_forwards_clipboard_unmodified() {
        let (dispatcher, _sources) = dispatcher(
            Platform::Ios,
            Sources {
                clipboard: " bitcoin:bc1qpaste ".to_string(),
                choice: Some(3),
                ..Sources::default()
            },
        );

        let value = dispatcher.dispatch(ScanGesture::LongPress).await;

        assert_eq!(value.as_deref(), Some(" bitcoin:bc1qpaste "));
    }

    #[tokio::test]
    async fn each_gesture_runs_exactly_one_source() {
        let (desktop, sources) = dispatcher(Platform::Desktop, Sources::default());
        desktop.dispatch(ScanGesture::LongPress).await;
        assert_eq!(sources.calls(), vec!["image_sheet"]);

        let (mobile, sources) = dispatcher(Platform::Android, Sources::default());
        let value = mobile.dispatch(ScanGesture::Tap).await;
        assert_eq!(sources.calls(), vec!["live"]);
        assert_eq!(value.as_deref(), Some("bitcoin:bc1qlive"));

        let (mobile, sources) = dispatcher(
            Platform::Ios,
            Sources {
                choice: Some(1),
                ..Sources::default()
            },
        );
        mobile.dispatch(ScanGesture::LongPress).await;
        assert_eq!(sources.calls(), vec!["image"]);
    }

    #[tokio::test]
    async fn clipboard_failure_hides_paste_option() {
        let (dispatcher, sources) = dispatcher(
            Platform::Ios,
            Sources {
                clipboard_fails: true,
                choice: Some(2),
                ..Sources::default()
            },
        );

        let value = dispatcher.dispatch(ScanGesture::LongPress).await;

        assert_eq!(sources.presented.lock().unwrap()[0].options.len(), 3);
        assert_eq!(value.as_deref(), Some("bitcoin:bc1qlive"));
    }
}
