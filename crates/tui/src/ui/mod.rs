pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

const SIDE_PANEL_WIDTH: u16 = 36;
const CAROUSEL_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        ratatui::widgets::Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let [info, content, bottom] = Layout::vertical([
        Constraint::Length(1), // Info bar
        Constraint::Min(0),    // Main content
        Constraint::Length(1), // Bottom bar
    ])
    .areas(area);

    render_info_bar(frame, info, state, &theme);
    let list_area = render_wallets(frame, content, state);
    screens::transactions::render(frame, list_area, state);

    if state.detail.is_some() {
        screens::detail::render(frame, list_area, state);
    }

    render_bottom_bar(frame, bottom, state, &theme);
    components::overlay::render(frame, area, state.overlay.as_ref());
    components::toast::render(frame, area, state.toast.as_ref());
}

/// Draws the wallets (carousel on top, or side panel on large screens) and
/// returns the area left for the transaction feed.
fn render_wallets(frame: &mut Frame<'_>, area: Rect, state: &AppState) -> Rect {
    if let Some(carousel) = state.model.carousel.as_ref() {
        let [top, rest] =
            Layout::vertical([Constraint::Length(CAROUSEL_HEIGHT), Constraint::Min(0)]).areas(area);
        screens::wallets::render_carousel(frame, top, carousel, state);
        return rest;
    }

    let [side, rest] =
        Layout::horizontal([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(0)]).areas(area);
    screens::wallets::render_panel(frame, side, state);
    rest
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let total = state
        .wallets
        .iter()
        .fold(deck_engine::Sats::ZERO, |total, wallet| total + wallet.balance);
    let status = if state.model.refreshing { "SYNC" } else { "OK" };

    let line = Line::from(vec![
        Span::styled("Source", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.source)),
        Span::styled("Wallets", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", state.wallets.len())),
        Span::styled("Total", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", total.format(deck_engine::BalanceUnit::Btc))),
        Span::styled(status, Style::default().fg(theme.accent)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints = components::hints::for_state(state);
    let bar = Paragraph::new(Line::from(components::hints::hints_to_spans(&hints, theme)));
    frame.render_widget(bar, area);
}
