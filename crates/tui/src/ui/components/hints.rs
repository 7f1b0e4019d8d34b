use deck_engine::ListRenderModel;
use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, Overlay},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: String,
    pub action: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            hint.key.clone(),
            Style::default().fg(theme.accent),
        ));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

/// Hints for whatever currently has the keyboard.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    match &state.overlay {
        Some(Overlay::Prompt(_)) => vec![
            KeyHint::new("Enter", "confirm"),
            KeyHint::new("Esc", "cancel"),
        ],
        Some(Overlay::Sheet(_)) => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("Enter", "choose"),
            KeyHint::new("Esc", "dismiss"),
        ],
        None if state.detail.is_some() => vec![KeyHint::new("Esc", "back")],
        None => list_hints(&state.model),
    }
}

fn list_hints(model: &ListRenderModel) -> Vec<KeyHint> {
    let mut hints = vec![
        KeyHint::new("←→", "wallet"),
        KeyHint::new("Enter", "open"),
    ];
    if model.transactions_header.refresh.is_some() || model.pull_to_refresh {
        hints.push(KeyHint::new("r", "refresh"));
    }
    if let Some(scan) = model.scan_button {
        hints.push(KeyHint::new("s", scan.label.to_lowercase()));
        if scan.long_press {
            hints.push(KeyHint::new("S", "scan options"));
        }
    }
    hints.push(KeyHint::new("m", "reorder"));
    hints.push(KeyHint::new("o", "settings"));
    hints.push(KeyHint::new("q", "quit"));
    hints
}
