use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::{debug, warn};

use super::model::{Album, TrackRecord, files_of};
use crate::session::{ListEntry, MpdClient, MusicService, SessionError, SessionManager};

/// Keep the first item of each key, preserving order.
pub fn dedup_stable<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// One album of a catalog, together with the record collection it was
/// built from.
#[derive(Debug, Clone)]
pub struct AlbumEntry {
    pub album: Album,
    records: Arc<[TrackRecord]>,
}

impl AlbumEntry {
    pub fn new(album: Album, records: Arc<[TrackRecord]>) -> Self {
        Self { album, records }
    }

    /// Files of the album in record order.
    pub fn files(&self) -> impl Iterator<Item = &str> + '_ {
        files_of(&self.album, &self.records)
    }
}

impl PartialEq for AlbumEntry {
    fn eq(&self, other: &Self) -> bool {
        self.album == other.album
    }
}

impl Eq for AlbumEntry {}

impl Hash for AlbumEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.album.hash(state);
    }
}

/// Distinct albums in ascending (title, artist) order.
#[derive(Debug, Clone)]
pub struct AlbumCatalog {
    albums: Vec<Album>,
    records: Arc<[TrackRecord]>,
}

impl AlbumCatalog {
    /// Group `records` into albums.
    ///
    /// Records without an artist or album are dropped. One candidate is made
    /// per remaining record, candidates are sorted, and duplicates collapse
    /// onto their first occurrence.
    pub fn from_records(records: Vec<TrackRecord>) -> Self {
        let records: Arc<[TrackRecord]> = records
            .into_iter()
            .filter(|r| r.artist().is_some() && r.album().is_some())
            .collect();

        let mut candidates: Vec<Album> = records.iter().filter_map(TrackRecord::album_key).collect();
        candidates.sort();
        debug!("Got {} items", candidates.len());

        Self {
            albums: dedup_stable(candidates, Album::clone),
            records,
        }
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// The records albums were built from, missing-tag records excluded.
    pub fn records(&self) -> &[TrackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AlbumEntry> {
        self.albums
            .get(index)
            .map(|album| AlbumEntry::new(album.clone(), Arc::clone(&self.records)))
    }

    pub fn entries(&self) -> Entries {
        self.clone().into_iter()
    }
}

impl IntoIterator for AlbumCatalog {
    type Item = AlbumEntry;
    type IntoIter = Entries;

    fn into_iter(self) -> Entries {
        Entries {
            albums: self.albums.into_iter(),
            records: self.records,
        }
    }
}

/// Iterator over the entries of a catalog.
pub struct Entries {
    albums: std::vec::IntoIter<Album>,
    records: Arc<[TrackRecord]>,
}

impl Iterator for Entries {
    type Item = AlbumEntry;

    fn next(&mut self) -> Option<AlbumEntry> {
        let album = self.albums.next()?;
        Some(AlbumEntry::new(album, Arc::clone(&self.records)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.albums.size_hint()
    }
}

/// Fetch the metadata of every file in the database.
///
/// Only the first record per file is kept. A file the daemon has no record
/// for, or refuses to describe, is skipped; any other failure ends the fetch.
pub fn fetch_records<C: MusicService + ?Sized>(client: &mut C) -> Result<Vec<TrackRecord>, SessionError> {
    let files: Vec<String> = client
        .list_all()?
        .into_iter()
        .filter_map(ListEntry::into_file)
        .collect();

    let mut records = Vec::with_capacity(files.len());
    for file in files {
        match client.list_all_info(&file) {
            Ok(info) => match info.into_iter().next() {
                Some(record) => records.push(record),
                None => warn!("no metadata for {file}, skipping"),
            },
            Err(err) if err.is_rejection() => {
                warn!("metadata lookup for {file} failed: {err}, skipping");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(records)
}

/// Builds album catalogs from the daemon's database.
pub struct CatalogBuilder<C = MpdClient> {
    sessions: SessionManager<C>,
}

impl<C: MusicService> CatalogBuilder<C> {
    pub fn new(sessions: SessionManager<C>) -> Self {
        Self { sessions }
    }

    /// Open a session and build a catalog from a full listing.
    pub fn build(&self) -> Result<AlbumCatalog, SessionError> {
        let mut session = self.sessions.session();
        let records = fetch_records(&mut *session)?;
        Ok(AlbumCatalog::from_records(records))
    }

    /// Lazy form of [`CatalogBuilder::build`]: nothing is fetched until the
    /// first call to `next`. Each call starts over with a fresh fetch.
    pub fn items(&self) -> CatalogItems<'_, C> {
        CatalogItems {
            builder: self,
            entries: None,
        }
    }
}

/// See [`CatalogBuilder::items`].
pub struct CatalogItems<'a, C> {
    builder: &'a CatalogBuilder<C>,
    entries: Option<Entries>,
}

impl<C: MusicService> Iterator for CatalogItems<'_, C> {
    type Item = AlbumEntry;

    fn next(&mut self) -> Option<AlbumEntry> {
        if self.entries.is_none() {
            let catalog = self.builder.build().unwrap_or_else(|err| {
                warn!("could not list albums: {err}");
                AlbumCatalog::from_records(Vec::new())
            });
            self.entries = Some(catalog.into_iter());
        }
        self.entries.as_mut()?.next()
    }
}
