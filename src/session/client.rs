use log::trace;

use super::error::SessionError;
use crate::config::socket_address;
use crate::library::TrackRecord;

/// An entry of the recursive database listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    File(String),
    Directory(String),
    Playlist(String),
}

impl ListEntry {
    /// The path of a file entry; `None` for directories and playlists.
    pub fn into_file(self) -> Option<String> {
        match self {
            Self::File(path) => Some(path),
            Self::Directory(_) | Self::Playlist(_) => None,
        }
    }
}

/// The subset of the daemon's command set this crate relies on.
///
/// Every call is one blocking round trip.
pub trait MusicService {
    fn connect(&mut self, host: &str, port: &str) -> Result<(), SessionError>;
    fn password(&mut self, password: &str) -> Result<(), SessionError>;
    /// Recursive listing of the whole database.
    fn list_all(&mut self) -> Result<Vec<ListEntry>, SessionError>;
    /// Full metadata for everything at `uri`.
    fn list_all_info(&mut self, uri: &str) -> Result<Vec<TrackRecord>, SessionError>;
    fn clear(&mut self) -> Result<(), SessionError>;
    fn add(&mut self, uri: &str) -> Result<(), SessionError>;
    fn play(&mut self) -> Result<(), SessionError>;
}

/// [`MusicService`] backed by an `mpd` crate connection.
#[derive(Default)]
pub struct MpdClient {
    conn: Option<mpd::Client>,
}

impl MpdClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Run `f` on the connection. An IO failure drops the connection.
    fn run<T>(
        &mut self,
        f: impl FnOnce(&mut mpd::Client) -> mpd::error::Result<T>,
    ) -> Result<T, SessionError> {
        let conn = self.conn.as_mut().ok_or(SessionError::NotConnected)?;
        let result = f(conn).map_err(SessionError::from);
        if matches!(result, Err(SessionError::Io(_))) {
            self.conn = None;
        }
        result
    }
}

/// A song handle for commands that take a path.
fn song_at(uri: &str) -> mpd::Song {
    mpd::Song {
        file: uri.to_string(),
        ..mpd::Song::default()
    }
}

/// Flatten a song into a record. Fields the crate parses out of the tag
/// list go first so they win as the first value of their key.
fn record_from_song(song: mpd::Song) -> TrackRecord {
    let mut record = TrackRecord::new(song.file);
    let parsed = [
        ("artist", song.artist),
        ("title", song.title),
        ("name", song.name),
        ("last-modified", song.last_mod),
    ];
    for (key, value) in parsed {
        if let Some(value) = value {
            record.push_tag(key, value);
        }
    }
    for (key, value) in song.tags {
        record.push_tag(&key, value);
    }
    record
}

impl MusicService for MpdClient {
    fn connect(&mut self, host: &str, port: &str) -> Result<(), SessionError> {
        let address = socket_address(host, port);
        let conn = mpd::Client::connect(address.as_str()).map_err(|source| SessionError::Connect {
            address: address.clone(),
            source,
        })?;
        trace!("connected to {address}");
        self.conn = Some(conn);
        Ok(())
    }

    fn password(&mut self, password: &str) -> Result<(), SessionError> {
        self.run(|c| c.login(password))
    }

    fn list_all(&mut self) -> Result<Vec<ListEntry>, SessionError> {
        let songs = self.run(|c| c.listall())?;
        Ok(songs.into_iter().map(|s| ListEntry::File(s.file)).collect())
    }

    fn list_all_info(&mut self, uri: &str) -> Result<Vec<TrackRecord>, SessionError> {
        let songs = self.run(|c| c.lsinfo(song_at(uri)))?;
        Ok(songs.into_iter().map(record_from_song).collect())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.run(|c| c.clear())
    }

    fn add(&mut self, uri: &str) -> Result<(), SessionError> {
        self.run(|c| c.push(song_at(uri))).map(drop)
    }

    fn play(&mut self) -> Result<(), SessionError> {
        self.run(|c| c.play())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one connection: greet, then answer each request line with the
    /// next canned response. Returns the requests received.
    fn scripted_server(responses: Vec<&'static str>) -> (String, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut writer = stream.try_clone().unwrap();
            let mut reader = BufReader::new(stream);
            writer.write_all(b"OK MPD 0.23.5\n").unwrap();

            let mut seen = Vec::new();
            for response in responses {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 {
                    break;
                }
                seen.push(line.trim_end().to_string());
                writer.write_all(response.as_bytes()).unwrap();
            }
            seen
        });
        (port, handle)
    }

    fn command_name(line: &str) -> &str {
        line.split_whitespace().next().unwrap_or_default()
    }

    #[test]
    fn commands_before_connect_fail_with_not_connected() {
        let mut client = MpdClient::new();
        assert!(matches!(client.clear(), Err(SessionError::NotConnected)));
        assert!(matches!(client.add("x"), Err(SessionError::NotConnected)));
        assert!(!client.is_connected());
    }

    #[test]
    fn connect_to_closed_port_reports_connect_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port().to_string();
        drop(listener);

        let mut client = MpdClient::new();
        let err = client.connect("127.0.0.1", &port).unwrap_err();
        assert!(matches!(err, SessionError::Connect { .. }));
        assert!(!client.is_connected());
    }

    #[test]
    fn client_drives_the_daemon_commands() {
        let (port, server) = scripted_server(vec![
            "OK\n",
            "file: X/a1.flac\nfile: X/a2.flac\nOK\n",
            "file: X/a1.flac\nLast-Modified: 2020-01-01T00:00:00Z\nArtist: X\nAlbum: Foo\nOK\n",
            "OK\n",
            "Id: 7\nOK\n",
            "OK\n",
        ]);

        let mut client = MpdClient::new();
        client.connect("127.0.0.1", &port).unwrap();
        client.password("s3cret").unwrap();

        let files: Vec<String> = client
            .list_all()
            .unwrap()
            .into_iter()
            .filter_map(ListEntry::into_file)
            .collect();
        assert_eq!(files, vec!["X/a1.flac", "X/a2.flac"]);

        let info = client.list_all_info("X/a1.flac").unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].file, "X/a1.flac");
        assert_eq!(info[0].artist(), Some("X"));
        assert_eq!(info[0].album(), Some("Foo"));

        client.clear().unwrap();
        client.add("X/a1.flac").unwrap();
        client.play().unwrap();
        drop(client);

        let seen = server.join().unwrap();
        let names: Vec<&str> = seen.iter().map(|l| command_name(l)).collect();
        assert_eq!(names[..4], ["password", "listall", "lsinfo", "clear"]);
        assert!(names[4].starts_with("add"));
        assert_eq!(names[5], "play");
        assert!(seen[2].contains("X/a1.flac"));
        assert!(seen[4].contains("X/a1.flac"));
    }

    #[test]
    fn rejected_password_is_an_ack_and_connection_stays_usable() {
        let (port, server) = scripted_server(vec![
            "ACK [3@0] {password} incorrect password\n",
            "OK\n",
        ]);

        let mut client = MpdClient::new();
        client.connect("127.0.0.1", &port).unwrap();
        let err = client.password("wrong").unwrap_err();
        assert!(err.is_auth_rejected());
        assert!(client.is_connected());
        client.clear().unwrap();
        drop(client);

        assert_eq!(server.join().unwrap().len(), 2);
    }

    #[test]
    fn server_hangup_fails_the_next_command() {
        let (port, server) = scripted_server(vec![]);

        let mut client = MpdClient::new();
        client.connect("127.0.0.1", &port).unwrap();
        server.join().unwrap();

        assert!(client.clear().is_err());
    }

    #[test]
    fn record_from_song_keeps_parsed_fields_and_tags() {
        let song = mpd::Song {
            file: "X/a1.flac".into(),
            artist: Some("X".into()),
            title: Some("Intro".into()),
            ..mpd::Song::default()
        };
        let record = record_from_song(song);
        assert_eq!(record.file, "X/a1.flac");
        assert_eq!(record.artist(), Some("X"));
        assert!(record.tag("title").is_some());
        assert_eq!(record.album(), None);
    }
}
