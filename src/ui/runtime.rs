use crate::config::ProgressStyle;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, handle_mouse};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;

/// Drive the presenter until the user quits.
///
/// The asset barrier is awaited on `runtime`; everything else runs on the
/// calling thread.
pub fn run(mut app: App, runtime: &Handle, tick_rate: Duration) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal(app.progress_style() == ProgressStyle::Bar)?;
    let events = EventHandler::new(tick_rate);

    let registry = app.assets().clone();
    let ready_tx = events.sender();
    runtime.spawn(async move {
        registry.await_ready().await;
        let _ = ready_tx.send(AppEvent::AssetsReady);
    });

    if let Ok((cols, rows)) = crossterm::terminal::size() {
        app.on_resize(cols, rows);
    }

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Mouse(mouse)) => handle_mouse(&mut app, mouse),
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            Ok(AppEvent::Resize(cols, rows)) => app.on_resize(cols, rows),
            Ok(AppEvent::AssetsReady) => app.on_assets_ready(),
            Err(RecvTimeoutError::Timeout) => app.on_tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!(position = ?app.navigation().position(), "Presenter closed");
    drop(guard);
    Ok(())
}
