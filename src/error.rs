use camino::Utf8PathBuf;
use std::io;
use std::num::ParseIntError;
use std::sync::Arc;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to open '{path}': {source}")]
    Open {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read the library: {0}")]
    Read(#[source] Arc<io::Error>),

    /// The document is not well-formed XML.
    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// An integer field holds text that is not a decimal number. `field` is the element name and
    /// `entry` the zero-based index of the entry among the song entries of the document; other
    /// entry types are not counted.
    #[error("Invalid <{field}> value '{value}' in song entry #{entry}: {source}")]
    FieldFormat {
        field: &'static str,
        entry: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("No song titled '{0}' in the library")]
    SongNotFound(String),

    #[error("{0}")]
    Path(String),
}
