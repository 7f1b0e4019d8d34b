use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Rounded panel used for every section of the wallets list.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            focused: false,
        }
    }

    /// Mark this card as focused (uses accent border color).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.surface))
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block().inner(area)
    }

    pub fn render_with<W: Widget>(&self, frame: &mut Frame<'_>, area: Rect, content: W) {
        let inner = self.inner(area);
        frame.render_widget(self.block(), area);
        frame.render_widget(content, inner);
    }
}

/// One wallet card: label, kind and balance.
pub struct WalletCard<'a> {
    label: &'a str,
    subtitle: &'a str,
    balance: Span<'static>,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> WalletCard<'a> {
    pub fn new(label: &'a str, subtitle: &'a str, balance: Span<'static>, theme: &'a Theme) -> Self {
        Self {
            label,
            subtitle,
            balance,
            theme,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect) {
        let card = Card::new(self.label, self.theme).focused(self.focused);
        let lines = vec![
            Line::from(Span::styled(
                self.subtitle.to_string(),
                Style::default().fg(self.theme.dim),
            )),
            Line::from(self.balance.add_modifier(Modifier::BOLD)),
        ];
        card.render_with(frame, area, Paragraph::new(lines));
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn wallet_card_shows_label_and_bold_balance() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|frame| {
                WalletCard::new("Daily", "HD SegWit", Span::raw("0.0001 BTC"), &theme)
                    .render(frame, frame.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| (0..30).map(|x| buffer[(x, y)].symbol()).collect::<String>();
        assert!(row(0).contains("Daily"));
        assert!(row(2).contains("0.0001 BTC"));

        let balance_x = (0..30).find(|&x| buffer[(x, 2)].symbol() == "0").unwrap();
        assert!(buffer[(balance_x, 2)].modifier.contains(Modifier::BOLD));
    }
}
