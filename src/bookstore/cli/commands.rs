//! Context setup and the input loop.

use super::render::render;
use super::setup::Cli;
use bookstore::api::{BookstoreApi, Outcome};
use bookstore::config::BookstoreConfig;
use bookstore::error::{BookstoreError, Result};
use bookstore::store::fs::FileStore;
use bookstore::store::DataStore;
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "BOOKSTORE_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(&cli, std::env::var_os(HOME_ENV).map(PathBuf::from))?;
    let config = BookstoreConfig::load(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), ?config, "starting");

    let mut api = BookstoreApi::open(FileStore::with_config(data_dir, &config))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&mut api, stdin.lock(), &mut stdout.lock())
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "bookstore=debug"
    } else {
        "bookstore=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn resolve_data_dir(cli: &Cli, home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = home.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    if cli.global {
        let dirs = ProjectDirs::from("com", "bookstore", "bookstore").ok_or_else(|| {
            BookstoreError::Store("could not determine the user data directory".to_string())
        })?;
        return Ok(dirs.data_dir().to_path_buf());
    }
    std::env::current_dir().map_err(BookstoreError::Io)
}

/// Feeds `input` to the api line by line until end of input or `quit`.
///
/// Lines are decoded lossily. Bytes that are not UTF-8 become U+FFFD, which
/// fails every character-class check, so the line goes through the usual
/// rejection path.
fn serve<S, R, W>(api: &mut BookstoreApi<S>, mut input: R, out: &mut W) -> Result<()>
where
    S: DataStore,
    R: BufRead,
    W: Write,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).map_err(BookstoreError::Io)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let outcome = api.execute(&line)?;
        if outcome == Outcome::Quit {
            break;
        }
        for text in render(&outcome) {
            writeln!(out, "{}", text).map_err(BookstoreError::Io)?;
        }
    }
    out.flush().map_err(BookstoreError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore::store::memory::InMemoryStore;

    fn session(input: &str) -> String {
        let mut api = BookstoreApi::open(InMemoryStore::new()).unwrap();
        let mut out = Vec::new();
        serve(&mut api, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["bookstore"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn serve_prints_one_block_per_command() {
        let output = session(
            "su root sjtu\n\
             select 1\n\
             modify -price=2.5\n\
             import 5 20\n\
             \n\
             buy 1 2\n\
             nonsense\n\
             show finance\n",
        );
        assert_eq!(output, "5.00\nInvalid\n+ 5.00 - 20.00\n");
    }

    #[test]
    fn non_utf8_line_is_rejected_and_session_continues() {
        let mut api = BookstoreApi::open(InMemoryStore::new()).unwrap();
        let mut out = Vec::new();
        serve(
            &mut api,
            &b"su root sjtu\nregister caf\xe9 pw X\nselect \xff\nlog\n"[..],
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Invalid\nInvalid\n=== System Log ===\nTotal transactions: 0\n"
        );
        assert_eq!(api.bookstore().accounts().len(), 1);
        assert!(api.bookstore().books().is_empty());
    }

    #[test]
    fn serve_stops_at_quit() {
        let output = session("log\nquit\nlog\n");
        assert_eq!(output, "Invalid\n");
    }

    #[test]
    fn storage_failure_aborts() {
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        assert!(BookstoreApi::open(store).is_err());
    }

    #[test]
    fn data_dir_flag_wins() {
        let dir = resolve_data_dir(
            &cli(&["--data-dir", "/srv/shop", "-g"]),
            Some(PathBuf::from("/env/shop")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/srv/shop"));
    }

    #[test]
    fn env_beats_global_and_cwd() {
        let dir = resolve_data_dir(&cli(&["-g"]), Some(PathBuf::from("/env/shop"))).unwrap();
        assert_eq!(dir, PathBuf::from("/env/shop"));
    }

    #[test]
    fn falls_back_to_cwd() {
        let dir = resolve_data_dir(&cli(&[]), Some(PathBuf::new())).unwrap();
        assert_eq!(dir, std::env::current_dir().unwrap());
    }
}
