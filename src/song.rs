use std::fmt;

/// A single song read from a Rhythmbox library.
///
/// Songs are only ever built by the decoder, once per `<entry type="song">`, and cannot be
/// modified afterwards. Fields whose element was absent from the entry hold an empty string or
/// zero.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Song {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    /// Usually a `file://` URI.
    pub(crate) location: String,
    pub(crate) genre: String,
    pub(crate) track_number: u32,
    pub(crate) rating: u32,
    pub(crate) disc_number: u32,
    pub(crate) bit_rate: u32,
    pub(crate) album_artist: String,
    pub(crate) comments: String,
    pub(crate) bpm: u32,
}

impl Song {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn album(&self) -> &str {
        &self.album
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn track_number(&self) -> u32 {
        self.track_number
    }

    pub fn rating(&self) -> u32 {
        self.rating
    }

    pub fn disc_number(&self) -> u32 {
        self.disc_number
    }

    /// Bit rate in kbit/s.
    pub fn bit_rate(&self) -> u32 {
        self.bit_rate
    }

    pub fn album_artist(&self) -> &str {
        &self.album_artist
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Beats per minute.
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Whether the song's title equals `title`, ignoring case.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.chars().flat_map(char::to_lowercase)
            .eq(title.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for Song {
    /// Renders every field on its own line. Meant for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Song title: {}", self.title)?;
        writeln!(f, "Song artist: {}", self.artist)?;
        writeln!(f, "Song album: {}", self.album)?;
        writeln!(f, "Song location: {}", self.location)?;
        writeln!(f, "Song genre: {}", self.genre)?;
        writeln!(f, "Song track number: {}", self.track_number)?;
        writeln!(f, "Song rating: {}", self.rating)?;
        writeln!(f, "Song disc number: {}", self.disc_number)?;
        writeln!(f, "Song bit rate: {}", self.bit_rate)?;
        writeln!(f, "Song album artist: {}", self.album_artist)?;
        writeln!(f, "Song comments: {}", self.comments)?;
        write!(f, "Song BPM: {}", self.bpm)
    }
}
