use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use deck_engine::{ListRenderModel, Transaction, Wallet};
use std::sync::Arc;

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::styled_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let model = &state.model;
    let card = Card::new(model.transactions_header.title, &theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let [status, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
    frame.render_widget(Paragraph::new(status_line(model, &theme)), status);

    if let Some(empty) = model.empty_state {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                empty.headline,
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(empty.hint, Style::default().fg(theme.dim))),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
        return;
    }

    let items: Vec<ListItem> = model
        .transactions
        .iter()
        .map(|tx| transaction_item(tx, &state.wallets, &theme))
        .collect();
    frame.render_widget(List::new(items), body);
}

fn status_line(model: &ListRenderModel, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    if model.refreshing {
        spans.push(Span::styled("Refreshing…", Style::default().fg(theme.accent)));
    }
    if let Some(button) = model.transactions_header.refresh {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        let style = if button.enabled {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.dim).add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled("[r] refresh", style));
    }
    Line::from(spans)
}

fn transaction_item(tx: &Transaction, wallets: &[Arc<Wallet>], theme: &Theme) -> ListItem<'static> {
    let date = tx.timestamp.format("%d %b %H:%M").to_string();
    let wallet = wallets
        .iter()
        .find(|wallet| wallet.id == tx.wallet_id)
        .map(|wallet| wallet.label.clone())
        .unwrap_or_default();
    let memo = tx.memo.clone().unwrap_or_else(|| short_txid(&tx.txid));
    let pending = if tx.confirmations == 0 { "  pending" } else { "" };

    ListItem::new(Line::from(vec![
        Span::styled(format!("{date}  "), Style::default().fg(theme.dim)),
        Span::styled(format!("{wallet:<14} "), Style::default().fg(theme.text)),
        Span::styled(format!("{memo:<24} "), Style::default().fg(theme.text)),
        styled_amount(tx.amount, tx.preferred_unit, theme),
        Span::styled(pending, Style::default().fg(theme.accent)),
    ]))
}

fn short_txid(txid: &str) -> String {
    if txid.len() <= 12 || !txid.is_ascii() {
        return txid.to_string();
    }
    format!("{}…{}", &txid[..6], &txid[txid.len() - 6..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_txids_are_shortened() {
        assert_eq!(short_txid("ab12"), "ab12");
        assert_eq!(
            short_txid("4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b"),
            "4a5e1e…eda33b"
        );
    }
}
