//! Decoder for Rhythmbox's `rhythmdb.xml`.
//!
//! The database is a flat list of `<entry type="...">` elements. Only entries of type `song` are
//! turned into [`Song`]s; radio stations, podcasts and the like are skipped together with all
//! of their children.
//!
//! ```xml
//! <rhythmdb version="2.0">
//!   <entry type="song">
//!     <title>Hotel California</title>
//!     <artist>Eagles</artist>
//!     <track-number>1</track-number>
//!     <bitrate>96</bitrate>
//!     ...
//!   </entry>
//! </rhythmdb>
//! ```

mod field;

use crate::error::{Error, Result};
use crate::song::Song;
use camino::Utf8Path;
use field::Field;
use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};

const ENTRY_TAG: &[u8] = b"entry";
const SONG_TYPE: &str = "song";

/// Where the decoder currently is relative to the entries of the document.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
enum State {
    /// Outside of any entry.
    #[default]
    Idle,

    /// Inside an entry whose contents are skipped. `depth` counts the `entry` elements opened
    /// since skipping began, and `in_song` tells whether a song entry encloses them.
    Ignoring { depth: usize, in_song: bool },

    /// Inside a song entry, between fields.
    InSong,

    /// Inside a field element, waiting for its text.
    Capturing(Field),

    /// Inside a field element whose text was already stored.
    Captured(Field),
}

/// Accumulation state for a single `decode` call.
#[derive(Debug, Default)]
struct Decoder {
    state: State,

    /// The song being assembled from the fields of the current entry.
    song: Song,

    songs: Vec<Song>,
}

impl Decoder {
    fn open(&mut self, start: &BytesStart) -> quick_xml::Result<()> {
        let name = start.name();
        let is_entry = name.as_ref() == ENTRY_TAG;
        self.state = match self.state {
            State::Idle if is_entry => {
                match entry_type(start)? {
                    Some(kind) if kind == SONG_TYPE => State::InSong,
                    kind => {
                        trace!("Skipping entry of type {:?}", kind);
                        State::Ignoring { depth: 1, in_song: false }
                    },
                }
            },
            State::Ignoring { depth, in_song } if is_entry => State::Ignoring { depth: depth + 1, in_song },
            State::InSong if is_entry => State::Ignoring { depth: 1, in_song: true },
            State::InSong => match Field::from_tag(name.as_ref()) {
                Some(field) => State::Capturing(field),
                None => State::InSong,
            },
            state => state,
        };
        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        let is_entry = name == ENTRY_TAG;
        self.state = match self.state {
            State::Ignoring { depth: 1, in_song } if is_entry => {
                if in_song { State::InSong } else { State::Idle }
            },
            State::Ignoring { depth, in_song } if is_entry => State::Ignoring { depth: depth - 1, in_song },
            State::InSong if is_entry => {
                let song = std::mem::take(&mut self.song);
                trace!("Decoded song #{}: '{}'", self.songs.len(), song.title());
                self.songs.push(song);
                State::Idle
            },
            State::Capturing(field) | State::Captured(field) if name == field.tag().as_bytes() => State::InSong,
            state => state,
        };
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if let State::Capturing(field) = self.state {
            field.assign(&mut self.song, text, self.songs.len())?;
            self.state = State::Captured(field);
        }
        Ok(())
    }
}

/// Returns the unescaped `type` attribute of an entry, if present.
fn entry_type(start: &BytesStart) -> quick_xml::Result<Option<String>> {
    match start.try_get_attribute("type")? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Walks all attributes of an element so malformed or duplicated ones are reported.
fn check_attributes(start: &BytesStart) -> quick_xml::Result<()> {
    for attr in start.attributes() {
        attr?;
    }
    Ok(())
}

/// Whether `text` consists only of XML whitespace.
fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Wraps a quick-xml failure, keeping I/O problems apart from malformed documents.
fn xml_error(source: quick_xml::Error, position: usize) -> Error {
    match source {
        quick_xml::Error::Io(e) => Error::Read(e),
        source => Error::Xml { position, source },
    }
}

/// Tracks the document element, which must appear exactly once.
#[derive(Debug, Default)]
struct Root {
    /// Number of currently open elements.
    open_elements: usize,
    seen: bool,
}

impl Root {
    fn open(&mut self) -> quick_xml::Result<()> {
        if self.open_elements == 0 && self.seen {
            return Err(quick_xml::Error::UnexpectedToken("second root element".to_string()));
        }
        self.seen = true;
        self.open_elements += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.open_elements = self.open_elements.saturating_sub(1);
    }

    fn text(&self, text: &str) -> quick_xml::Result<()> {
        if self.open_elements == 0 && !is_blank(text) {
            return Err(quick_xml::Error::UnexpectedToken("text outside the root element".to_string()));
        }
        Ok(())
    }

    fn cdata(&self) -> quick_xml::Result<()> {
        if self.open_elements == 0 {
            return Err(quick_xml::Error::UnexpectedToken("CDATA outside the root element".to_string()));
        }
        Ok(())
    }

    fn finish(&self) -> quick_xml::Result<()> {
        if !self.seen {
            return Err(quick_xml::Error::UnexpectedEof("root element".to_string()));
        }
        if self.open_elements != 0 {
            return Err(quick_xml::Error::UnexpectedEof(format!("{} unclosed element(s)", self.open_elements)));
        }
        Ok(())
    }
}

/// Decodes every song entry in a Rhythmbox XML document, in document order.
///
/// The whole stream is consumed before returning. Any structural error in the document, or an
/// integer field that does not hold a number, aborts decoding; no partial list is returned.
pub fn decode<R: BufRead>(reader: R) -> Result<Vec<Song>> {
    let mut reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut decoder = Decoder::default();
    let mut root = Root::default();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => return Err(xml_error(e, reader.buffer_position())),
        };
        let checked = match event {
            Event::Start(start) => root.open()
                .and_then(|_| check_attributes(&start))
                .and_then(|_| decoder.open(&start)),
            Event::Empty(start) => {
                let result = root.open()
                    .and_then(|_| check_attributes(&start))
                    .and_then(|_| decoder.open(&start));
                root.close();
                decoder.close(start.name().as_ref());
                result
            },
            Event::End(end) => {
                root.close();
                decoder.close(end.name().as_ref());
                Ok(())
            },
            Event::Text(text) => match text.unescape() {
                Ok(text) => {
                    if let Err(e) = root.text(&text) {
                        return Err(xml_error(e, reader.buffer_position()));
                    }
                    decoder.text(&text)?;
                    Ok(())
                },
                Err(e) => Err(e),
            },
            Event::CData(cdata) => match root.cdata().and_then(|_| reader.decoder().decode(&cdata)) {
                Ok(text) => {
                    decoder.text(&text)?;
                    Ok(())
                },
                Err(e) => Err(e),
            },
            Event::Eof => break,
            _ => Ok(()),
        };
        if let Err(e) = checked {
            return Err(xml_error(e, reader.buffer_position()));
        }
        buf.clear();
    }

    if let Err(e) = root.finish() {
        return Err(xml_error(e, reader.buffer_position()));
    }

    Ok(decoder.songs)
}

/// Opens the library file at `fpath` and decodes it. The file is closed before returning.
pub fn decode_file<T: AsRef<Utf8Path>>(fpath: T) -> Result<Vec<Song>> {
    let fpath = fpath.as_ref();
    let file = match File::open(fpath) {
        Ok(file) => file,
        Err(e) => return Err(Error::Open { path: fpath.to_path_buf(), source: e }),
    };
    let songs = decode(BufReader::new(file))?;
    debug!("Decoded {} songs from '{}'", songs.len(), fpath);
    Ok(songs)
}
