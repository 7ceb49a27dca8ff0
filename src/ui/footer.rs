use crate::config::ProgressStyle;
use crate::render::SlideView;
use crate::theme::Rgb;
use crate::ui::theme::{CHROME_TEXT, PROGRESS_TRACK, STATUS_ERROR};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct Footer<'a> {
    style: ProgressStyle,
    accent: Rgb,
    status: Option<&'a str>,
    jump_input: &'a str,
}

impl<'a> Footer<'a> {
    pub fn new(style: ProgressStyle, accent: Rgb, status: Option<&'a str>, jump_input: &'a str) -> Self {
        Self {
            style,
            accent,
            status,
            jump_input,
        }
    }

    /// Progress bar, or `None` when the bar style is off.
    pub fn bar(&self, view: &SlideView, area: Rect) -> Option<Paragraph<'static>> {
        if self.style != ProgressStyle::Bar {
            return None;
        }
        let width = area.width as usize;
        let filled = filled_cells(view.index, view.total, width);
        let line = Line::from(vec![
            Span::styled("━".repeat(filled), Style::default().fg(self.accent.into())),
            Span::styled(
                "━".repeat(width - filled),
                Style::default().fg(PROGRESS_TRACK),
            ),
        ]);
        Some(Paragraph::new(line))
    }

    /// Right-hand label: status, pending jump input, or slide counter.
    pub fn label(&self, view: &SlideView) -> Paragraph<'static> {
        let text_style = Style::default().fg(CHROME_TEXT).add_modifier(Modifier::DIM);
        let span = if let Some(status) = self.status {
            Span::styled(format!(" {status} "), Style::default().fg(STATUS_ERROR))
        } else if !self.jump_input.is_empty() {
            Span::styled(format!(" go to {}_ ", self.jump_input), text_style)
        } else if self.style == ProgressStyle::None {
            Span::raw("")
        } else {
            Span::styled(format!(" {} / {} ", view.index + 1, view.total), text_style)
        };
        Paragraph::new(Line::from(span)).alignment(ratatui::layout::Alignment::Right)
    }
}

fn filled_cells(index: usize, total: usize, width: usize) -> usize {
    if total == 0 {
        return 0;
    }
    ((index + 1) * width / total).min(width)
}

/// Slide index under `column` when the progress bar in `bar` is clicked.
pub fn progress_target(bar: Rect, column: u16, total: usize) -> Option<usize> {
    if total == 0 || bar.width == 0 || column < bar.x || column >= bar.x + bar.width {
        return None;
    }
    let offset = (column - bar.x) as usize;
    Some((offset * total / bar.width as usize).min(total - 1))
}
