use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};

use deck_engine::{BalanceUnit, collab::Route};

use crate::{
    app::AppState,
    ui::{components::card::Card, theme::Theme},
};

/// Title and body lines shown for a navigation target.
pub fn describe(route: &Route, state: &AppState) -> (&'static str, Vec<(String, String)>) {
    match route {
        Route::Settings => ("Settings", vec![("Platform".into(), format!("{:?}", state.platform))]),
        Route::AddWallet => ("Add wallet", vec![("Source".into(), state.source.clone())]),
        Route::ReorderWallets => (
            "Reorder wallets",
            state
                .wallets
                .iter()
                .enumerate()
                .map(|(index, wallet)| (format!("{}", index + 1), wallet.label.clone()))
                .collect(),
        ),
        Route::WalletTransactions { wallet_id, kind } => {
            let label = state
                .wallets
                .iter()
                .find(|wallet| wallet.id == *wallet_id)
                .map(|wallet| wallet.label.clone())
                .unwrap_or_default();
            (
                "Wallet",
                vec![
                    ("Label".into(), label),
                    ("Kind".into(), kind.label().to_string()),
                    ("Id".into(), wallet_id.to_string()),
                ],
            )
        }
        Route::SendDetails {
            address,
            amount,
            memo,
        } => {
            let mut lines = vec![("Address".into(), address.clone())];
            if let Some(amount) = amount {
                lines.push(("Amount".into(), amount.format(BalanceUnit::Btc)));
            }
            if let Some(memo) = memo {
                lines.push(("Memo".into(), memo.clone()));
            }
            ("Send", lines)
        }
        Route::LightningInvoice { invoice } => {
            ("Lightning invoice", vec![("Invoice".into(), invoice.clone())])
        }
    }
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(route) = state.detail.as_ref() else {
        return;
    };
    let theme = Theme::default();
    let (title, fields) = describe(route, state);

    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{key:<10}"), Style::default().fg(theme.dim)),
                Span::styled(value, Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    frame.render_widget(Clear, area);
    Card::new(title, &theme)
        .focused(true)
        .render_with(frame, area, Paragraph::new(lines).wrap(Wrap { trim: false }));
}
