use rhythmdb_tools::{default_library_path, Error, Library};
use anyhow::{anyhow, Result};
use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use log::error;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

#[derive(Parser)]
struct Cli {
    #[arg(short, long, help = "Path to rhythmdb.xml (default: ~/.local/share/rhythmbox/rhythmdb.xml)")]
    library: Option<Utf8PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (repeatable)")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the location of one or more songs, looked up by title (case-insensitive)
    Find {
        #[arg(required = true)]
        titles: Vec<String>,
    },
    /// Print every field of every song
    Dump,
    /// List the titles and artists of all songs
    List,
}

/// Reads the library from `path`, or from the default location if none was given.
fn open_library(path: Option<Utf8PathBuf>) -> Result<Library> {
    let path = match path {
        Some(path) => path,
        None => default_library_path()?,
    };
    match Library::open(&path) {
        Ok(library) => Ok(library),
        Err(e) => Err(anyhow!("Failed to load the library from '{}': {}", path, e)),
    }
}

/// Prints one location per title. Returns the number of titles that were not found.
fn find(library: &Library, titles: &[String]) -> usize {
    let mut n_missing = 0usize;
    for title in titles {
        match library.lookup(title) {
            Ok(location) => println!("{}", location),
            Err(e @ Error::SongNotFound(_)) => {
                error!("{}", e);
                n_missing += 1;
            },
            Err(e) => {
                error!("Lookup of '{}' failed: {}", title, e);
                n_missing += 1;
            },
        }
    }
    n_missing
}

fn list(library: &Library) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for song in library {
        writeln!(out, "{}  {}", song.title(), song.artist().dimmed())?;
    }
    writeln!(out, "\n{} songs", library.len())?;
    out.flush()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .module("rhythmdb_tools")
        .verbosity(2 + cli.verbose as usize)
        .init()
        .unwrap();

    let library = match open_library(cli.library) {
        Ok(library) => library,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    match cli.command {
        Commands::Find { titles } => {
            if find(&library, &titles) != 0 {
                return ExitCode::FAILURE;
            }
        },
        Commands::Dump => {
            let mut out = BufWriter::new(io::stdout().lock());
            if let Err(e) = library.dump(&mut out).and_then(|_| out.flush()) {
                error!("Failed to write the library dump: {}", e);
                return ExitCode::FAILURE;
            }
        },
        Commands::List => {
            if let Err(e) = list(&library) {
                error!("Failed to list songs: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
