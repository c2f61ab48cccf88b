use crate::error::{Error, Result};
use crate::song::Song;

/// A child element of a song entry that maps onto a `Song` field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Field {
    Title,
    Artist,
    Album,
    Location,
    Genre,
    TrackNumber,
    Rating,
    DiscNumber,
    BitRate,
    AlbumArtist,
    Comment,
    BeatsPerMinute,
}

impl Field {
    /// Looks up the field stored in the element with the given tag name.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        let field = match tag {
            b"title" => Field::Title,
            b"artist" => Field::Artist,
            b"album" => Field::Album,
            b"location" => Field::Location,
            b"genre" => Field::Genre,
            b"track-number" => Field::TrackNumber,
            b"rating" => Field::Rating,
            b"disc-number" => Field::DiscNumber,
            b"bitrate" => Field::BitRate,
            b"album-artist" => Field::AlbumArtist,
            b"comment" => Field::Comment,
            b"beats-per-minute" => Field::BeatsPerMinute,
            _ => return None,
        };
        Some(field)
    }

    /// The element name, as it appears in rhythmdb.xml.
    pub fn tag(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Location => "location",
            Field::Genre => "genre",
            Field::TrackNumber => "track-number",
            Field::Rating => "rating",
            Field::DiscNumber => "disc-number",
            Field::BitRate => "bitrate",
            Field::AlbumArtist => "album-artist",
            Field::Comment => "comment",
            Field::BeatsPerMinute => "beats-per-minute",
        }
    }

    /// Stores `text` in the matching field of `song`, overwriting whatever was there.
    /// `entry` is the index of the song entry being decoded, used for error reporting.
    pub fn assign(self, song: &mut Song, text: &str, entry: usize) -> Result<()> {
        let slot = match self {
            Field::Title => &mut song.title,
            Field::Artist => &mut song.artist,
            Field::Album => &mut song.album,
            Field::Location => &mut song.location,
            Field::Genre => &mut song.genre,
            Field::AlbumArtist => &mut song.album_artist,
            Field::Comment => &mut song.comments,
            Field::TrackNumber => return self.assign_number(&mut song.track_number, text, entry),
            Field::Rating => return self.assign_number(&mut song.rating, text, entry),
            Field::DiscNumber => return self.assign_number(&mut song.disc_number, text, entry),
            Field::BitRate => return self.assign_number(&mut song.bit_rate, text, entry),
            Field::BeatsPerMinute => return self.assign_number(&mut song.bpm, text, entry),
        };
        *slot = text.to_string();
        Ok(())
    }

    fn assign_number(self, slot: &mut u32, text: &str, entry: usize) -> Result<()> {
        *slot = match text.parse::<u32>() {
            Ok(num) => num,
            Err(e) => return Err(Error::FieldFormat {
                field: self.tag(),
                entry,
                value: text.to_string(),
                source: e,
            }),
        };
        Ok(())
    }
}
