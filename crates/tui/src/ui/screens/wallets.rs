use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use deck_engine::render::{CarouselItem, CarouselSection, WALLETS_TITLE};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, WalletCard},
            money::styled_balance,
        },
        theme::Theme,
    },
};

const CARD_WIDTH: u16 = 30;
const ADD_WALLET_LABEL: &str = "Add a wallet";

/// Horizontally paged carousel; the focused card is kept in view.
pub fn render_carousel(frame: &mut Frame<'_>, area: Rect, section: &CarouselSection, state: &AppState) {
    let theme = Theme::default();
    let frame_card = Card::new(section.title, &theme);
    let inner = frame_card.inner(area);
    frame.render_widget(frame_card.block(), area);

    let visible = usize::from((inner.width / CARD_WIDTH).max(1));
    let first = state
        .focus_index
        .saturating_sub(visible - 1)
        .min(section.items.len().saturating_sub(visible));
    let shown: Vec<_> = section.items.iter().enumerate().skip(first).take(visible).collect();

    let columns = Layout::horizontal(vec![Constraint::Length(CARD_WIDTH); shown.len()]).split(inner);
    for ((index, item), column) in shown.into_iter().zip(columns.iter()) {
        let focused = index == state.focus_index;
        match item {
            CarouselItem::Wallet(wallet) => {
                WalletCard::new(
                    &wallet.label,
                    wallet.kind.label(),
                    styled_balance(wallet.balance, wallet.preferred_unit, &theme),
                    &theme,
                )
                .focused(focused)
                .render(frame, *column);
            }
            CarouselItem::AddWallet => {
                let hint = Paragraph::new(Line::from(Span::styled(
                    "Press a to add",
                    Style::default().fg(theme.dim),
                )));
                Card::new(ADD_WALLET_LABEL, &theme)
                    .focused(focused)
                    .render_with(frame, *column, hint);
            }
        }
    }
}

/// Side panel used on large screens instead of the carousel.
pub fn render_panel(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let items: Vec<ListItem> = state
        .wallets
        .iter()
        .map(|wallet| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    wallet.label.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("{}  ", wallet.kind.label()),
                        Style::default().fg(theme.dim),
                    ),
                    styled_balance(wallet.balance, wallet.preferred_unit, &theme),
                ]),
            ])
        })
        .chain(std::iter::once(ListItem::new(Line::from(Span::styled(
            format!("+ {ADD_WALLET_LABEL}"),
            Style::default().fg(theme.dim),
        )))))
        .collect();

    let list = List::new(items)
        .block(Card::new(WALLETS_TITLE, &theme).focused(state.detail.is_none()).block())
        .highlight_style(Style::default().fg(theme.accent))
        .highlight_symbol("› ");
    let mut list_state = ListState::default().with_selected(Some(state.focus_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}
