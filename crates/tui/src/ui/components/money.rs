use deck_engine::{BalanceUnit, Sats};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Styled span for a transaction amount.
///
/// - Incoming amounts: green with `+` prefix
/// - Outgoing amounts: red, sign shown
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Sats, unit: BalanceUnit, theme: &Theme) -> Span<'static> {
    let formatted = amount.format(unit);

    let (color, prefix) = if amount > Sats::ZERO {
        (theme.positive, "+")
    } else if amount < Sats::ZERO {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{formatted}"), Style::default().fg(color))
}

/// Styled span for a wallet balance; balances carry no sign prefix.
#[must_use]
pub fn styled_balance(balance: Sats, unit: BalanceUnit, theme: &Theme) -> Span<'static> {
    Span::styled(
        balance.format(unit),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_amounts_get_a_plus_sign() {
        let theme = Theme::default();
        let span = styled_amount(Sats::new(2_500), BalanceUnit::Sats, &theme);
        assert_eq!(span.content, "+2500 sats");
        assert_eq!(span.style.fg, Some(theme.positive));

        let span = styled_amount(Sats::new(-1), BalanceUnit::Btc, &theme);
        assert_eq!(span.content, "-0.00000001 BTC");
        assert_eq!(span.style.fg, Some(theme.negative));
    }
}
