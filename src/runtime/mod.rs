use clap::Parser;
use log::warn;

use crate::config::{Settings, resolve_config_path};
use crate::host::{AlbumAction, SelectionAction};
use crate::library::{AlbumCatalog, AlbumEntry, AlbumIndex, CatalogBuilder};
use crate::logging;
use crate::session::SessionManager;

mod cli;

use cli::{Command, Flags};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let flags = Flags::parse();
    let config_path = flags.config.or_else(resolve_config_path);
    let (settings, fallback) = Settings::load_or_default(config_path.as_deref());
    logging::init(&settings.log);
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    let sessions = SessionManager::new(settings.mpd.clone());

    match flags.subcommand.unwrap_or(Command::List) {
        Command::Config => print!("{}", settings.to_toml()?),
        Command::List => {
            let catalog = CatalogBuilder::new(sessions).build()?;
            print_catalog(&catalog);
        }
        Command::Play { albums } => {
            queue_albums(AlbumAction::play(sessions.clone()), sessions, &albums)?;
        }
        Command::Enqueue { albums } => {
            queue_albums(AlbumAction::enqueue(sessions.clone()), sessions, &albums)?;
        }
    }

    Ok(())
}

fn print_catalog(catalog: &AlbumCatalog) {
    if catalog.is_empty() {
        println!("no albums");
        return;
    }
    let index = AlbumIndex::new(catalog.records());
    for (n, album) in catalog.albums().iter().enumerate() {
        println!(
            "{:>4}  {}  [{} tracks]",
            n + 1,
            album,
            index.files(album).len()
        );
    }
}

fn queue_albums(
    action: AlbumAction,
    sessions: SessionManager,
    numbers: &[usize],
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogBuilder::new(sessions).build()?;
    let selection = select(&catalog, numbers)?;

    let outcome = action.activate_multiple(&selection);
    if !outcome.is_clean() {
        return Err(format!(
            "{}: {} of {} commands failed",
            action.name(),
            outcome.failed,
            outcome.issued
        )
        .into());
    }
    println!("{}: {} album(s)", action.description(), selection.len());
    Ok(())
}

/// Look up 1-based album numbers in `catalog`.
fn select(catalog: &AlbumCatalog, numbers: &[usize]) -> Result<Vec<AlbumEntry>, String> {
    numbers
        .iter()
        .map(|&n| {
            n.checked_sub(1)
                .and_then(|i| catalog.get(i))
                .ok_or_else(|| format!("no album number {n} (catalog has {})", catalog.len()))
        })
        .collect()
}
