use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A tag value as reported by the daemon.
///
/// The daemon repeats a key when a tag has several values, so anything may
/// turn out to be a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    One(String),
    Many(Vec<String>),
}

impl TagValue {
    /// The value used for grouping and display: the scalar itself or the
    /// first element of a sequence.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(v) => Some(v),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }

    /// Add another value for the same key, promoting a scalar to a sequence.
    pub fn push(&mut self, value: String) {
        match self {
            Self::One(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(v) => v.push(value),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

/// Flat metadata for one track, as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Path of the file relative to the music directory; unique per record.
    pub file: String,
    /// Every other tag, keyed by lowercase tag name.
    pub tags: BTreeMap<String, TagValue>,
}

impl TrackRecord {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            tags: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach a tag.
    pub fn with_tag(mut self, key: &str, value: impl Into<TagValue>) -> Self {
        self.tags.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    /// Record a tag line, merging repeated keys into a sequence.
    pub fn push_tag(&mut self, key: &str, value: String) {
        let key = key.to_ascii_lowercase();
        match self.tags.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.tags.insert(key, TagValue::One(value));
            }
        }
    }

    pub fn tag(&self, key: &str) -> Option<&TagValue> {
        self.tags.get(&key.to_ascii_lowercase())
    }

    pub fn artist(&self) -> Option<&str> {
        self.tag("artist").and_then(TagValue::first)
    }

    pub fn album(&self) -> Option<&str> {
        self.tag("album").and_then(TagValue::first)
    }

    /// The album this record belongs to, if it carries both artist and album.
    pub fn album_key(&self) -> Option<Album> {
        Some(Album::new(self.album()?, self.artist()?))
    }
}

/// An album, identified by its title and artist.
///
/// Ordering is by title, then artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub title: String,
    pub artist: String,
}

impl Album {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Files of this album within `records`, in record order.
    pub fn files<'a>(&'a self, records: &'a [TrackRecord]) -> impl Iterator<Item = &'a str> + 'a {
        files_of(self, records)
    }

    pub fn contains(&self, record: &TrackRecord) -> bool {
        record.album() == Some(self.title.as_str()) && record.artist() == Some(self.artist.as_str())
    }
}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash of the concatenation; equal albums still hash equally.
        state.write(self.title.as_bytes());
        state.write(self.artist.as_bytes());
        state.write_u8(0xff);
    }
}

impl Ord for Album {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then_with(|| self.artist.cmp(&other.artist))
    }
}

impl PartialOrd for Album {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- {} (Album)", self.artist, self.title)
    }
}

/// Every `file` in `records` whose artist and album match `album`.
///
/// Rescans the whole collection on each call.
pub fn files_of<'a>(album: &'a Album, records: &'a [TrackRecord]) -> impl Iterator<Item = &'a str> + 'a {
    records
        .iter()
        .filter(move |r| album.contains(r))
        .map(|r| r.file.as_str())
}
