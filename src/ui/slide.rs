use crate::navigator::TransitionKind;
use crate::render::{NodeContent, SlideView, ViewNode};
use crate::theme::Rgb;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

const BODY_PADDING_X: u16 = 4;
const BODY_PADDING_TOP: u16 = 1;
/// Extra left offset while a slide transition runs.
const SLIDE_IN_OFFSET: u16 = 6;

/// Turn the projected slide into a paragraph for the body region.
pub fn slide_paragraph(view: &SlideView) -> Paragraph<'static> {
    let mut base = Style::default()
        .fg(view.foreground.into())
        .bg(view.background.into());
    let mut left = BODY_PADDING_X;
    match view.transition {
        Some(TransitionKind::Fade) => base = base.add_modifier(Modifier::DIM),
        Some(TransitionKind::Slide) => left += SLIDE_IN_OFFSET,
        Some(TransitionKind::None) | None => {}
    }

    Paragraph::new(slide_lines(view))
        .style(base)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::new(
            left,
            BODY_PADDING_X,
            BODY_PADDING_TOP,
            0,
        )))
}

pub fn slide_lines(view: &SlideView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    // A list item whose text is carried by its children prefixes the next node.
    let mut carried_marker: Option<String> = None;

    for node in &view.nodes {
        let prefix = match carried_marker.take() {
            Some(marker) => marker,
            None => indent(node.depth),
        };
        if let NodeContent::ListItem { marker, text } = &node.content {
            if text.is_empty() {
                carried_marker = Some(format!("{prefix}{marker} "));
                continue;
            }
        }
        push_node(&mut lines, node, prefix);
    }
    if let Some(marker) = carried_marker {
        lines.push(Line::from(marker));
    }
    lines
}

fn push_node(lines: &mut Vec<Line<'static>>, node: &ViewNode, prefix: String) {
    let color = style_for(node.color);
    match &node.content {
        NodeContent::Heading { text, level } => {
            let style = color.add_modifier(Modifier::BOLD);
            if *level <= 1 {
                lines.push(
                    Line::from(Span::styled(text.to_uppercase(), style))
                        .alignment(Alignment::Center),
                );
            } else {
                lines.push(Line::from(vec![Span::raw(prefix), Span::styled(text.clone(), style)]));
            }
            lines.push(Line::default());
        }
        NodeContent::Paragraph(text) => {
            for row in text.lines() {
                lines.push(Line::from(vec![
                    Span::raw(prefix.clone()),
                    Span::styled(row.to_string(), color),
                ]));
            }
            lines.push(Line::default());
        }
        NodeContent::Code { lang, source } => {
            let muted = color.add_modifier(Modifier::DIM);
            let label = lang.as_deref().unwrap_or("code");
            lines.push(Line::from(vec![
                Span::raw(prefix.clone()),
                Span::styled(format!("┌─ {label}"), muted),
            ]));
            for row in source.lines() {
                lines.push(Line::from(vec![
                    Span::raw(prefix.clone()),
                    Span::styled("│ ", muted),
                    Span::styled(row.to_string(), color),
                ]));
            }
            lines.push(Line::from(vec![Span::raw(prefix), Span::styled("└─", muted)]));
            lines.push(Line::default());
        }
        NodeContent::Image { label, size } => {
            let text = match size {
                Some((w, h)) => format!("[image: {label} ({w}×{h})]"),
                None => format!("[image: {label}]"),
            };
            lines.push(Line::from(vec![Span::raw(prefix), Span::styled(text, color)]));
            lines.push(Line::default());
        }
        NodeContent::ListItem { marker, text } => {
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{marker} "), color.add_modifier(Modifier::BOLD)),
                Span::styled(text.clone(), color),
            ]));
        }
        NodeContent::Table { header, rows } => {
            push_table(lines, &prefix, color, header, rows);
            lines.push(Line::default());
        }
        NodeContent::Quote { quote, cite } => {
            let italic = color.add_modifier(Modifier::ITALIC);
            lines.push(Line::from(vec![
                Span::raw(prefix.clone()),
                Span::styled("❝ ", color.add_modifier(Modifier::BOLD)),
                Span::styled(quote.clone(), italic),
            ]));
            if let Some(cite) = cite {
                lines.push(Line::from(vec![
                    Span::raw(prefix),
                    Span::styled(format!("    ~ {cite}"), color.add_modifier(Modifier::DIM)),
                ]));
            }
            lines.push(Line::default());
        }
        NodeContent::Link { text, href } => {
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(text.clone(), color.add_modifier(Modifier::UNDERLINED)),
                Span::styled(format!(" <{href}>"), color.add_modifier(Modifier::DIM)),
            ]));
        }
        NodeContent::Media { url, title } => {
            let text = match title {
                Some(title) => format!("▶ {title} ({url})"),
                None => format!("▶ {url}"),
            };
            lines.push(Line::from(vec![Span::raw(prefix), Span::styled(text, color)]));
            lines.push(Line::default());
        }
        NodeContent::Placeholder { asset, reason } => {
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    format!("[{asset} unavailable: {reason}]"),
                    color.add_modifier(Modifier::ITALIC),
                ),
            ]));
            lines.push(Line::default());
        }
    }
}

fn push_table(
    lines: &mut Vec<Line<'static>>,
    prefix: &str,
    color: Style,
    header: &[String],
    rows: &[Vec<String>],
) {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let format_row = |row: &[String]| -> String {
        (0..columns)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{cell:<width$}", width = widths[i])
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    if !header.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(prefix.to_string()),
            Span::styled(format_row(header), color.add_modifier(Modifier::BOLD)),
        ]));
        let rule = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("──");
        lines.push(Line::from(vec![
            Span::raw(prefix.to_string()),
            Span::styled(rule, color.add_modifier(Modifier::DIM)),
        ]));
    }
    for row in rows {
        lines.push(Line::from(vec![
            Span::raw(prefix.to_string()),
            Span::styled(format_row(row), color),
        ]));
    }
}

fn style_for(color: Rgb) -> Style {
    Style::default().fg(color.into())
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
