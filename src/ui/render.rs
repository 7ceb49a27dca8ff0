use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, footer_split, layout_regions};
use crate::ui::slide::slide_paragraph;
use crate::ui::theme::{CHROME_BORDER, CHROME_TEXT};
use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let Some(view) = app.view() else {
        draw_loading(frame, app);
        return;
    };

    let (header, body, footer) = layout_regions(area);
    let background = Style::default().bg(view.background.into());
    frame.render_widget(Block::default().style(background), area);

    let header_widget = Header::new(app.deck().title());
    frame.render_widget(header_widget.widget(&view), header);

    frame.render_widget(Clear, body);
    frame.render_widget(slide_paragraph(&view), body);

    let footer_widget = Footer::new(
        app.progress_style(),
        app.tokens().emphasis(),
        app.status_text(),
        app.jump_input(),
    );
    let (bar, label) = footer_split(footer);
    match footer_widget.bar(&view, bar) {
        Some(widget) => {
            frame.render_widget(widget, bar);
            frame.render_widget(footer_widget.label(&view), label);
        }
        None => frame.render_widget(footer_widget.label(&view), footer),
    }
}

fn draw_loading(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(50, 30, frame.area());
    let (resolved, total) = app.assets().progress();
    let mut lines = vec![
        Line::default(),
        Line::from(format!("Loading assets {resolved} / {total}")),
    ];
    let queued = app.queued_commands();
    if queued > 0 {
        lines.push(Line::from(format!("{queued} command(s) queued")));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(CHROME_TEXT))
            .block(
                Block::default()
                    .title(app.deck().title().unwrap_or("podium").to_string())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(CHROME_BORDER)),
            ),
        area,
    );
}
