use podium::assets::{AssetHandle, AssetStatus};
use podium::config::Config;
use podium::session::Session;
use std::path::Path;
use std::time::Duration;

fn demo_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/elm-talk/deck.toml"))
}

#[test]
fn demo_deck_parses() {
    let session = Session::open(demo_path(), &Config::default()).unwrap();
    assert_eq!(session.deck.len(), 6);
    assert_eq!(session.deck.title(), Some("Elm for JavaScript developers"));
    // Reveals: 0 + 1 + 3 + 1 + 0 + 2, plus 5 slide changes.
    assert_eq!(session.shape.total_steps(), 12);
}

#[tokio::test]
async fn demo_assets_all_load() {
    let config = Config::default();
    let session = Session::open(demo_path(), &config).unwrap();
    session.start_loading(&config);
    tokio::time::timeout(Duration::from_secs(5), session.assets.await_ready())
        .await
        .expect("assets resolve");

    assert_eq!(
        session.assets.status("logo"),
        Some(AssetStatus::Loaded(AssetHandle::Image {
            width: 16,
            height: 16,
        }))
    );
    assert!(matches!(
        session.assets.status("maybe"),
        Some(AssetStatus::Loaded(AssetHandle::Text(source))) if source.contains("Nothing")
    ));
    assert_eq!(session.assets.progress(), (4, 4));
}
