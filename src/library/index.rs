use std::collections::HashMap;

use super::model::{Album, TrackRecord};

/// Files of every album, grouped in a single pass over the records.
///
/// Answers the same as [`super::files_of`] without rescanning the whole
/// collection for each album.
pub struct AlbumIndex<'a> {
    groups: HashMap<Album, Vec<&'a str>>,
}

impl<'a> AlbumIndex<'a> {
    pub fn new(records: &'a [TrackRecord]) -> Self {
        let mut groups: HashMap<Album, Vec<&'a str>> = HashMap::new();
        for record in records {
            if let Some(album) = record.album_key() {
                groups.entry(album).or_default().push(record.file.as_str());
            }
        }
        Self { groups }
    }

    /// Files of `album` in record order; empty for an unknown album.
    pub fn files(&self, album: &Album) -> &[&'a str] {
        self.groups.get(album).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
