use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::error::{Context, Result};
use crate::utils::log_timestamp;

/// Where log records are written.
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// Append to a file, creating its directory on first use.
    File(PathBuf),
    Stderr,
}

/// Install the global logger. Called once from each binary's `main`.
///
/// The level defaults to `info` and can be changed with `RUST_LOG`.
pub fn init(target: LogTarget) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {} {}",
            log_timestamp(),
            record.level(),
            record.args()
        )
    });

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .context("Logger was already initialised")?;
    Ok(())
}
