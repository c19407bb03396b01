//! Sequentially numbered output paths (`<prefix><n>.<ext>`).
//!
//! The next number is found by scanning the directory, which is not atomic: two processes
//! writing into the same directory at the same time can pick the same name. Callers that run
//! concurrently need their own locking or distinct directories.

use log::debug;
use snafu::{ResultExt, Snafu};
use std::{
    io,
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum NamingError {
    #[snafu(display("failed to create output directory `{}`", path.display()))]
    CreateOutputDir { path: PathBuf, source: io::Error },
    #[snafu(display("failed to list output directory `{}`", path.display()))]
    ReadOutputDir { path: PathBuf, source: io::Error },
    #[snafu(display("no number left after `{prefix}{max}.{extension}` in `{}`", dir.display()))]
    NumbersExhausted {
        dir: PathBuf,
        prefix: String,
        extension: String,
        max: u64,
    },
}

/// Returns the number in `name` if it has the form `<prefix><digits>.<extension>`.
pub fn numbered_suffix(name: &str, prefix: &str, extension: &str) -> Option<u64> {
    let digits = name
        .strip_prefix(prefix)?
        .strip_suffix(extension)?
        .strip_suffix('.')?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Picks `<dir>/<prefix><max + 1>.<extension>`, where `max` is the highest number already used
/// in `dir` (0 if none). A missing `dir` is created.
pub fn next_output_path(dir: &Path, prefix: &str, extension: &str) -> Result<PathBuf, NamingError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => Some(entries),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            std::fs::create_dir_all(dir)
                .context(naming_error::CreateOutputDirSnafu { path: dir })?;
            None
        }
        Err(source) => {
            return Err(NamingError::ReadOutputDir {
                path: dir.to_owned(),
                source,
            })
        }
    };

    let mut max = 0u64;
    for entry in entries.into_iter().flatten() {
        let entry = entry.context(naming_error::ReadOutputDirSnafu { path: dir })?;
        let name = entry.file_name();
        // Non-UTF-8 names can't match an UTF-8 prefix anyway.
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(n) = numbered_suffix(name, prefix, extension) {
            max = max.max(n);
        }
    }

    let next = max.checked_add(1).ok_or_else(|| NamingError::NumbersExhausted {
        dir: dir.to_owned(),
        prefix: prefix.to_owned(),
        extension: extension.to_owned(),
        max,
    })?;

    let path = dir.join(format!("{prefix}{next}.{extension}"));
    debug!("next numbered output path is `{}`", path.display());
    Ok(path)
}
