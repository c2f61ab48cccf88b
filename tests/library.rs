use rhythmdb_tools::{decode_file, lookup, Error, Library};
use camino::Utf8PathBuf;
use std::fs;
use std::io::Write;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/rhythmdb.xml");

const TITLES: [&str; 16] = [
    "If I Needed Someone",
    "Wait",
    "I'm Looking Through You",
    "Michelle",
    "Girl",
    "Run For Your Life",
    "Nowhere Man",
    "The Word",
    "What Goes On",
    "In My Life",
    "Drive My Car",
    "You Won't See Me",
    "Norwegian Wood (This Bird Has Flown)",
    "Think For Yourself",
    "Hotel California",
    "Rope",
];

fn fixture() -> Library {
    Library::open(FIXTURE).unwrap()
}

#[test]
fn fixture_has_sixteen_songs_in_order() {
    let library = fixture();
    assert_eq!(library.len(), 16);
    assert_eq!(library.path(), Some(camino::Utf8Path::new(FIXTURE)));
    let titles = library.iter().map(|x| x.title()).collect::<Vec<_>>();
    assert_eq!(titles, TITLES);
}

#[test]
fn hotel_california_is_fifteenth() {
    let library = fixture();
    let song = &library.songs()[14];
    assert_eq!(song.title(), "Hotel California");
    assert_eq!(song.artist(), "Eagles");
    assert_eq!(song.location(), "location");
    assert_eq!(song.genre(), "Rock");
    assert_eq!(song.track_number(), 1);
    assert_eq!(song.rating(), 0);
    assert_eq!(song.disc_number(), 0);
    assert_eq!(song.bit_rate(), 96);
    assert_eq!(song.album_artist(), "");
    assert_eq!(song.comments(), "");
    assert_eq!(song.bpm(), 0);
}

#[test]
fn optional_fields_are_decoded_when_present() {
    let library = fixture();
    let song = &library.songs()[3];
    assert_eq!(song.title(), "Michelle");
    assert_eq!(song.rating(), 5);
    assert_eq!(song.disc_number(), 1);
    assert_eq!(song.album_artist(), "The Beatles");
    assert_eq!(song.comments(), "Mono mix");
    assert_eq!(song.bpm(), 124);
}

#[test]
fn rope_uses_defaults_for_missing_fields() {
    let library = fixture();
    let song = &library.songs()[15];
    assert_eq!(song.title(), "Rope");
    assert_eq!(song.artist(), "The Beatles");
    assert_eq!(song.bit_rate(), 96);
    assert_eq!(song.album(), "");
    assert_eq!(song.genre(), "");
    assert_eq!(song.track_number(), 0);
}

#[test]
fn every_fixture_title_can_be_found() {
    let library = fixture();
    for title in TITLES {
        assert!(library.lookup(title).is_ok(), "'{}' not found", title);
    }
    assert_eq!(library.lookup("hotel california").unwrap(), "location");
    assert_eq!(library.lookup("ROPE").unwrap(), "file:///home/user/Music/Rope.mp3");
}

#[test]
fn non_song_titles_are_not_found() {
    let library = fixture();
    assert!(matches!(library.lookup("Hotel Radio"), Err(Error::SongNotFound(_))));
    assert!(matches!(library.lookup("Rock History"), Err(Error::SongNotFound(_))));
    assert!(matches!(library.lookup("Bohemian Rhapsody"), Err(Error::SongNotFound(_))));
}

#[test]
fn duplicate_titles_resolve_to_the_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("rhythmdb.xml")).unwrap();
    let mut file = fs::File::create(&path).unwrap();
    write!(file, r#"<rhythmdb version="2.0">
  <entry type="song"><title>Girl</title><location>first</location></entry>
  <entry type="song"><title>girl</title><location>second</location></entry>
</rhythmdb>"#).unwrap();
    drop(file);

    let songs = decode_file(&path).unwrap();
    assert_eq!(songs.len(), 2);
    assert_eq!(lookup(&songs, "GIRL").unwrap(), "first");
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("missing.xml")).unwrap();
    match Library::open(&path) {
        Err(Error::Open { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("expected an open error, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_a_structural_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("rhythmdb.xml")).unwrap();
    fs::write(&path, r#"<rhythmdb><entry type="song"><title>Rope</entry></rhythmdb>"#).unwrap();
    assert!(matches!(Library::open(&path), Err(Error::Xml { .. })));
}

#[test]
fn dump_covers_every_song() {
    let library = fixture();
    let mut out = Vec::new();
    library.dump(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches("Song title: ").count(), 16);
    assert!(out.contains("Song title: Hotel California\nSong artist: Eagles\n"));
}
