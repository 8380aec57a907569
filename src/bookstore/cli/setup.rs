use clap::Parser;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bookstore", bin_name = "bookstore", version = get_version())]
#[command(
    about = "Bookstore command interpreter",
    long_about = "Reads bookstore commands from stdin, one per line, and prints \
                  each result on stdout. Rejected commands print `Invalid`."
)]
pub struct Cli {
    /// Directory holding the data files
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Use the per-user data directory
    #[arg(short, long)]
    pub global: bool,

    /// Log debug detail, including rejection reasons, to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
