use crate::error::{Error, Result};
use crate::rhythmdb;
use crate::song::Song;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, BufRead, Write};

/// All songs of a Rhythmbox library, in the order they appear in the database file.
///
/// The library is read once and never modified afterwards, so it can be freely shared between
/// readers.
#[derive(Debug, Clone, Default)]
pub struct Library {
    /// The file the library was read from, if any.
    path: Option<Utf8PathBuf>,
    songs: Vec<Song>,
}

impl Library {
    /// Reads the library at the default location, `~/.local/share/rhythmbox/rhythmdb.xml`.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_library_path()?)
    }

    /// Reads the library from the given file.
    pub fn open<T: AsRef<Utf8Path>>(fpath: T) -> Result<Self> {
        let songs = rhythmdb::decode_file(fpath.as_ref())?;
        Ok(Library {
            path: Some(fpath.as_ref().to_path_buf()),
            songs,
        })
    }

    /// Reads the library from an arbitrary XML stream.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Library {
            path: None,
            songs: rhythmdb::decode(reader)?,
        })
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Returns the location of the first song titled `title`, ignoring case.
    pub fn lookup(&self, title: &str) -> Result<&str> {
        lookup(&self.songs, title)
    }

    /// Writes every field of every song to `out`, one paragraph per song. Useful for debugging.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for song in &self.songs {
            writeln!(out, "{}", song)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}

/// Sequentially searches `songs` for a title, ignoring case, and returns the location of the
/// first match.
pub fn lookup<'a>(songs: &'a [Song], title: &str) -> Result<&'a str> {
    match songs.iter().find(|x| x.title_matches(title)) {
        Some(song) => Ok(song.location()),
        None => Err(Error::SongNotFound(title.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" standalone="yes"?>
<rhythmdb version="2.0">
  <entry type="song">
    <title>Girl</title>
    <artist>The Beatles</artist>
    <location>file:///music/girl.mp3</location>
  </entry>
  <entry type="iradio">
    <title>Hotel California</title>
    <location>http://radio.example/stream</location>
  </entry>
  <entry type="song">
    <title>Hotel California</title>
    <artist>Eagles</artist>
    <location>file:///music/hotel_california.mp3</location>
  </entry>
  <entry type="song">
    <title>HOTEL CALIFORNIA</title>
    <artist>Eagles</artist>
    <location>file:///music/hotel_california_live.mp3</location>
  </entry>
</rhythmdb>
"#;

    fn library() -> Library {
        Library::from_reader(XML.as_bytes()).unwrap()
    }

    #[test]
    fn from_reader_has_no_path() {
        let library = library();
        assert_eq!(library.len(), 3);
        assert!(!library.is_empty());
        assert!(library.path().is_none());
    }

    #[test]
    fn lookup_ignores_case() {
        let library = library();
        for query in ["hotel california", "HOTEL CALIFORNIA", "Hotel California"] {
            assert_eq!(library.lookup(query).unwrap(), "file:///music/hotel_california.mp3");
        }
        assert_eq!(library.lookup("girl").unwrap(), "file:///music/girl.mp3");
    }

    #[test]
    fn lookup_missing_title_fails() {
        match library().lookup("Bohemian Rhapsody") {
            Err(Error::SongNotFound(title)) => assert_eq!(title, "Bohemian Rhapsody"),
            other => panic!("expected SongNotFound, got {other:?}"),
        }
    }

    #[test]
    fn lookup_in_empty_library_fails() {
        assert!(matches!(lookup(&[], "Girl"), Err(Error::SongNotFound(_))));
    }

    #[test]
    fn dump_writes_one_paragraph_per_song() {
        let library = library();
        let mut out = Vec::new();
        library.dump(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let paragraphs = out.split("\n\n").filter(|x| !x.is_empty()).collect::<Vec<_>>();
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].starts_with("Song title: Girl\nSong artist: The Beatles\n"));
        assert!(paragraphs[1].contains("Song location: file:///music/hotel_california.mp3"));
        assert!(out.ends_with("Song BPM: 0\n\n"));
    }

    #[test]
    fn iterates_in_document_order() {
        let library = library();
        let artists = (&library).into_iter().map(Song::artist).collect::<Vec<_>>();
        assert_eq!(artists, ["The Beatles", "Eagles", "Eagles"]);
        assert_eq!(library.iter().count(), library.songs().len());
    }
}
