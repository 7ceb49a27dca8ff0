use crate::config::ProgressStyle;
use crate::navigator::NavCommand;
use crate::ui::app::App;
use crate::ui::footer::progress_target;
use crate::ui::layout::{footer_split, layout_regions};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Esc => {
            if app.jump_input().is_empty() {
                app.request_quit();
            } else {
                app.clear_jump_input();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_jump_digit(c),
        KeyCode::Char('g') => {
            app.submit_jump();
        }
        KeyCode::Enter => {
            if !app.submit_jump() {
                app.command(NavCommand::Next);
            }
        }
        KeyCode::Right
        | KeyCode::Down
        | KeyCode::PageDown
        | KeyCode::Char(' ')
        | KeyCode::Char('l')
        | KeyCode::Char('j') => navigate(app, NavCommand::Next),
        KeyCode::Left
        | KeyCode::Up
        | KeyCode::PageUp
        | KeyCode::Backspace
        | KeyCode::Char('h')
        | KeyCode::Char('k') => navigate(app, NavCommand::Prev),
        KeyCode::Home => navigate(app, NavCommand::Jump(0)),
        KeyCode::End => {
            let last = app.deck().len().saturating_sub(1);
            navigate(app, NavCommand::Jump(last));
        }
        _ => {}
    }
}

/// Left click on the progress bar jumps to the slide under the cursor.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if app.progress_style() != ProgressStyle::Bar {
        return;
    }
    let Some((cols, rows)) = app.size() else {
        return;
    };
    let (_, _, footer) = layout_regions(Rect::new(0, 0, cols, rows));
    if footer.height == 0 || mouse.row < footer.y || mouse.row >= footer.y + footer.height {
        return;
    }
    let (bar, _) = footer_split(footer);
    if let Some(index) = progress_target(bar, mouse.column, app.deck().len()) {
        navigate(app, NavCommand::Jump(index));
    }
}

fn navigate(app: &mut App, command: NavCommand) {
    app.clear_jump_input();
    app.command(command);
}
