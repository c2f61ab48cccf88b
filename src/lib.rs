pub mod error;
pub mod library;
pub mod rhythmdb;
pub mod song;

pub use error::{Error, Result};
pub use library::{lookup, Library};
pub use rhythmdb::{decode, decode_file};
pub use song::Song;

use camino::Utf8PathBuf;
use std::path::Path;

/// Location of the Rhythmbox database, relative to the home directory.
const RHYTHMDB_REL_PATH: &str = ".local/share/rhythmbox/rhythmdb.xml";

/// Returns the default path to the Rhythmbox library file.
pub fn default_library_path() -> Result<Utf8PathBuf> {
    path_from(dirs::home_dir, RHYTHMDB_REL_PATH)
}

/// Constructs a path by concatenating a `dirs::*` function output and an arbitrary relative path.
///
/// # Examples
/// ```
/// # use rhythmdb_tools::path_from;
/// # use std::path::PathBuf;
/// let path = path_from(|| Some(PathBuf::from("/home/user")), "my_file.txt").unwrap();
/// assert_eq!(path, "/home/user/my_file.txt");
/// ```
pub fn path_from<A: AsRef<Path>, B: AsRef<Path>>(base_dir: fn() -> Option<A>, rel_path: B) -> Result<Utf8PathBuf> {
    if !rel_path.as_ref().is_relative() {
        return Err(Error::Path(format!("Path {:?} must be relative", rel_path.as_ref())));
    }
    let path = match base_dir() {
        Some(path) => path,
        None => return Err(Error::Path("Failed to locate home directory".to_string())),
    };
    if !path.as_ref().is_absolute() {
        return Err(Error::Path(format!("Base directory {:?} is not absolute", path.as_ref())));
    }
    let mut path = match path.as_ref().to_str() {
        Some(str) => Utf8PathBuf::from(str),
        None => return Err(Error::Path(format!(
            "Failed to convert {:?} to UTF-8 (other encodings not supported)", path.as_ref()
        ))),
    };
    let rel_path = match rel_path.as_ref().to_str() {
        Some(path) => path,
        None => return Err(Error::Path(format!(
            "Failed to convert {:?} to UTF-8 (other encodings not supported)", rel_path.as_ref()
        ))),
    };
    path.push(rel_path);
    Ok(path)
}
