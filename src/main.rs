use anyhow::Context;
use clap::{Parser, Subcommand};
use podium::assets::AssetStatus;
use podium::config::Config;
use podium::deck::DeckFile;
use podium::notes::{write_json_lines, NotesEntry};
use podium::session::Session;
use podium::ui::app::App;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "podium", version, about = "Present slide decks in the terminal")]
struct Cli {
    /// Config file (defaults to ~/.config/podium/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs here instead of the configured file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the presenter
    Present {
        deck: PathBuf,

        /// Append presenter notes as JSON lines on every slide change
        #[arg(long)]
        notes_file: Option<PathBuf>,

        /// 1-based slide to open on
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        start: Option<u32>,
    },
    /// Load the deck and every asset, then report
    Check { deck: PathBuf },
    /// Print presenter notes for every slide
    Notes { deck: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading config")?;

    match cli.command {
        Command::Present {
            deck,
            notes_file,
            start,
        } => {
            let log_path = podium::logging::init_tracing(&config.logging, cli.log_file.as_deref())?;
            tracing::info!(log = %log_path.display(), deck = %deck.display(), "Starting presenter");
            present(&deck, &config, notes_file, start)
        }
        Command::Check { deck } => {
            podium::logging::init_tracing(&config.logging, cli.log_file.as_deref())?;
            check(&deck, &config)
        }
        Command::Notes { deck } => notes(&deck),
    }
}

fn present(
    deck: &Path,
    config: &Config,
    notes_file: Option<PathBuf>,
    start: Option<u32>,
) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let _enter = runtime.enter();

    let session = Session::open(deck, config)?;
    session.start_loading(config);

    let mut app = App::new(session, &config.presentation);
    let notes_writer = notes_file.map(|path| {
        let rx = app.subscribe_notes();
        runtime.spawn(async move {
            if let Err(err) = write_json_lines(rx, path.clone()).await {
                tracing::error!(path = %path.display(), error = %err, "Notes writer stopped");
            }
        })
    });
    if let Some(number) = start {
        app.start_at(number as usize - 1);
    }

    podium::ui::run(app, runtime.handle(), config.presentation.tick_rate())
        .context("running presenter")?;

    // App is gone, so the notes channel is closed and the writer drains.
    if let Some(writer) = notes_writer {
        let _ = runtime.block_on(writer);
    }
    Ok(())
}

fn check(deck: &Path, config: &Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    let _enter = runtime.enter();

    let session = Session::open(deck, config)?;
    let loads = session.start_loading(config);
    runtime.block_on(async {
        for load in loads {
            let _ = load.await;
        }
        session.assets.await_ready().await;
    });

    let mut failed = 0;
    for (id, status) in session.assets.snapshot() {
        match status {
            AssetStatus::Loaded(handle) => println!("ok      {id}  {handle:?}"),
            AssetStatus::Failed { reason } => {
                failed += 1;
                println!("failed  {id}  {reason}");
            }
            AssetStatus::Pending => println!("pending {id}"),
        }
    }
    println!(
        "theme   font {}",
        session.tokens.font("primary").unwrap_or("-")
    );
    println!(
        "{}: {} slide(s), {} step(s), {} asset(s), {failed} failed",
        deck.display(),
        session.deck.len(),
        session.shape.total_steps(),
        session.assets.progress().1,
    );

    if failed > 0 {
        anyhow::bail!("{failed} asset(s) failed to load");
    }
    Ok(())
}

fn notes(deck: &Path) -> anyhow::Result<()> {
    let file = DeckFile::load(deck)?;
    for index in 0..file.deck.len() {
        let entry = NotesEntry::for_slide(&file.deck, index);
        let title = entry.title.as_deref().unwrap_or("");
        println!("── {}/{} {title}", entry.slide + 1, entry.total);
        if let Some(notes) = &entry.notes {
            println!("{notes}");
        }
        println!();
    }
    Ok(())
}
