mod common;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use common::{deck_with_reveals, session, Script, ScriptedLoader};
use podium::assets::AssetHandle;
use podium::config::Config;
use podium::navigator::NavCommand;
use podium::ui::app::App;
use podium::ui::deck::{DeckIntent, DeckLifecycleState, DeckReducer};
use podium::ui::mvi::Reducer;

#[test]
fn loading_queue_keeps_arrival_order() {
    let state = DeckLifecycleState::default();
    let state = DeckReducer::reduce(
        state,
        DeckIntent::QueueCommand {
            command: NavCommand::Next,
        },
    );
    let state = DeckReducer::reduce(
        state,
        DeckIntent::QueueCommand {
            command: NavCommand::Jump(3),
        },
    );
    assert_eq!(
        state,
        DeckLifecycleState::Loading {
            queued: VecDeque::from(vec![NavCommand::Next, NavCommand::Jump(3)]),
        }
    );
}

#[test]
fn assets_ready_transitions_to_ready() {
    let state = DeckLifecycleState::Loading {
        queued: VecDeque::new(),
    };
    assert_eq!(
        DeckReducer::reduce(state, DeckIntent::AssetsReady),
        DeckLifecycleState::Ready
    );
}

#[test]
fn ready_ignores_queue_and_repeat_ready() {
    let state = DeckReducer::reduce(
        DeckLifecycleState::Ready,
        DeckIntent::QueueCommand {
            command: NavCommand::Prev,
        },
    );
    assert_eq!(state, DeckLifecycleState::Ready);
    assert_eq!(
        DeckReducer::reduce(state, DeckIntent::AssetsReady),
        DeckLifecycleState::Ready
    );
}

#[tokio::test]
async fn loaded_and_failed_assets_open_the_gate_and_replay() {
    let loader = Arc::new(
        ScriptedLoader::new()
            .with(
                "diagram",
                Script::Delay(
                    Duration::from_millis(10),
                    AssetHandle::Image {
                        width: 10,
                        height: 10,
                    },
                ),
            )
            .with("snippet", Script::Fail("gone".to_string())),
    );
    let session = session(deck_with_reveals(&[0, 2, 1]), loader);
    session.start_loading(&Config::default());
    let registry = session.assets.clone();

    let mut app = App::new(session, &Config::default().presentation);
    app.command(NavCommand::Next);
    app.command(NavCommand::Next);
    app.command(NavCommand::Next);
    assert!(!app.is_ready());
    assert_eq!(app.queued_commands(), 3);

    tokio::time::timeout(Duration::from_secs(5), registry.await_ready())
        .await
        .expect("assets resolve");
    app.on_assets_ready();

    assert!(app.is_ready());
    assert_eq!(app.navigation().position(), (1, 2));
}

#[tokio::test]
async fn hung_asset_keeps_loading_view() {
    let loader = Arc::new(ScriptedLoader::new().with("video", Script::Hang));
    let session = session(deck_with_reveals(&[1]), loader);
    session.start_loading(&Config::default());

    let mut app = App::new(session, &Config::default().presentation);
    tokio::time::sleep(Duration::from_millis(20)).await;
    app.on_tick(std::time::Instant::now());
    assert!(!app.is_ready());
    assert!(app.view().is_none());
    assert_eq!(app.assets().progress(), (0, 1));
}
