use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// Route `log` output to a file so it never lands on the terminal UI.
/// Filter comes from `RUST_LOG`, defaulting to `info`. Returns the log
/// path, or `None` when the file could not be opened and logging stays off.
pub fn init() -> Option<PathBuf> {
    let path = log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .ok()?;
    Some(path)
}

pub fn log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lifeterm")
        .join("lifeterm.log")
}
