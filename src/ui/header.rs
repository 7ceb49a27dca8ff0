use crate::render::SlideView;
use crate::ui::theme::{CHROME_SEPARATOR, CHROME_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct Header<'a> {
    deck_title: Option<&'a str>,
}

impl<'a> Header<'a> {
    pub fn new(deck_title: Option<&'a str>) -> Self {
        Self { deck_title }
    }

    pub fn widget(&self, view: &SlideView) -> Paragraph<'static> {
        let text_style = Style::default().fg(CHROME_TEXT).add_modifier(Modifier::DIM);
        let separator_style = Style::default().fg(CHROME_SEPARATOR);

        let mut spans = vec![
            Span::styled(" ", text_style),
            Span::styled(self.deck_title.unwrap_or("podium").to_string(), text_style),
        ];
        if let Some(title) = &view.title {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(title.clone(), text_style));
        }
        Paragraph::new(Line::from(spans))
    }
}
