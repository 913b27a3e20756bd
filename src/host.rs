//! What a launcher host holds: a catalog source yielding album items, and
//! actions it can run over a selection of those items.

use crate::library::{AlbumEntry, CatalogBuilder, CatalogItems};
use crate::queue::{QueueCommander, QueueIntent, QueueOutcome};
use crate::session::{MpdClient, MusicService, SessionManager};

/// An item a host can list, identify and show.
pub trait CatalogItem {
    /// Stable identity of the item.
    fn id(&self) -> String;
    fn title(&self) -> &str;
    fn icon_name(&self) -> &'static str;
}

/// An operation over one or many items.
pub trait SelectionAction {
    type Item;

    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn icon_name(&self) -> &'static str {
        "media-playback-start"
    }

    fn activate_multiple(&self, items: &[Self::Item]) -> QueueOutcome;

    fn activate(&self, item: &Self::Item) -> QueueOutcome {
        self.activate_multiple(std::slice::from_ref(item))
    }
}

impl CatalogItem for AlbumEntry {
    fn id(&self) -> String {
        format!("{}\u{1f}{}", self.album.title, self.album.artist)
    }

    fn title(&self) -> &str {
        &self.album.title
    }

    fn icon_name(&self) -> &'static str {
        "media-optical"
    }
}

/// The albums of the daemon's library, as a host-facing source.
pub struct AlbumSource<C = MpdClient> {
    builder: CatalogBuilder<C>,
}

impl<C: MusicService> AlbumSource<C> {
    pub fn new(sessions: SessionManager<C>) -> Self {
        Self {
            builder: CatalogBuilder::new(sessions),
        }
    }

    pub fn name(&self) -> &str {
        "Albums"
    }

    pub fn description(&self) -> &str {
        "Music albums in mpd Library"
    }

    pub fn icon_name(&self) -> &'static str {
        "applications-internet"
    }

    /// Items come pre-sorted by title and artist.
    pub fn should_sort_lexically(&self) -> bool {
        false
    }

    /// A fresh listing each time it is called.
    pub fn items(&self) -> CatalogItems<'_, C> {
        self.builder.items()
    }
}

/// `Play` or `Enqueue` over a selection of albums.
pub struct AlbumAction<C = MpdClient> {
    commander: QueueCommander<C>,
    intent: QueueIntent,
}

impl<C: MusicService> AlbumAction<C> {
    /// Replace the queue with the selection and start playing.
    pub fn play(sessions: SessionManager<C>) -> Self {
        Self {
            commander: QueueCommander::new(sessions),
            intent: QueueIntent::Replace,
        }
    }

    /// Append the selection to the queue.
    pub fn enqueue(sessions: SessionManager<C>) -> Self {
        Self {
            commander: QueueCommander::new(sessions),
            intent: QueueIntent::Append,
        }
    }

    pub fn intent(&self) -> QueueIntent {
        self.intent
    }
}

impl<C: MusicService> SelectionAction for AlbumAction<C> {
    type Item = AlbumEntry;

    fn name(&self) -> &str {
        match self.intent {
            QueueIntent::Replace => "Play",
            QueueIntent::Append => "Enqueue",
        }
    }

    fn description(&self) -> &str {
        match self.intent {
            QueueIntent::Replace => "Play Album",
            QueueIntent::Append => "Enqueue Album",
        }
    }

    fn activate_multiple(&self, items: &[AlbumEntry]) -> QueueOutcome {
        self.commander.run(self.intent, items)
    }
}
