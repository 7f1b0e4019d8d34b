use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{Overlay, PromptState, SheetState},
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, overlay: Option<&Overlay>) {
    let theme = Theme::default();
    match overlay {
        Some(Overlay::Prompt(prompt)) => render_prompt(frame, area, prompt, &theme),
        Some(Overlay::Sheet(sheet)) => render_sheet(frame, area, sheet, &theme),
        None => {}
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Anchored sheets sit at the bottom right, next to the scan button.
fn anchored(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

fn render_prompt(frame: &mut Frame<'_>, area: Rect, prompt: &PromptState, theme: &Theme) {
    let rect = centered(area, area.width.saturating_sub(8).min(72), 5);
    let lines = vec![
        Line::from(Span::styled(prompt.hint.as_str(), Style::default().fg(theme.dim))),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(prompt.input.as_str(), Style::default().fg(theme.text)),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]),
    ];
    frame.render_widget(Clear, rect);
    Card::new(&prompt.title, theme)
        .focused(true)
        .render_with(frame, rect, Paragraph::new(lines));
}

fn render_sheet(frame: &mut Frame<'_>, area: Rect, state: &SheetState, theme: &Theme) {
    let sheet = &state.sheet;
    let mut header = Vec::new();
    if let Some(title) = sheet.title.as_deref().filter(|title| !title.is_empty()) {
        header.push(title);
    }
    if let Some(message) = sheet.message.as_deref().filter(|message| !message.is_empty()) {
        header.push(message);
    }

    let height = (sheet.options.len() + header.len()) as u16 + 2;
    let rect = if sheet.anchored {
        anchored(area, 28, height)
    } else {
        centered(area, 32, height)
    };

    let items = header
        .iter()
        .map(|line| ListItem::new(Line::from(Span::styled(*line, Style::default().fg(theme.dim)))))
        .chain(sheet.labels().into_iter().enumerate().map(|(index, label)| {
            let style = if index == sheet.cancel_index {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        }))
        .collect::<Vec<_>>();

    let card = Card::new("Scan", theme).focused(true);
    let list = List::new(items)
        .block(card.block())
        .highlight_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("› ");
    let mut list_state = ListState::default().with_selected(Some(header.len() + state.selected));

    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(list, rect, &mut list_state);
}
