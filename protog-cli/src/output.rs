//! Proto file output

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error writing the generated proto file
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Target exists and overwriting was not allowed
    #[error("file already exists, pass -f if you want to overwrite it")]
    AlreadyExists,

    /// Any other I/O failure
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// File name for a package: lower-cased with a `.proto` suffix
///
/// Names that already mention `.proto` are used as given.
pub fn file_name(package: &str) -> String {
    if package.contains(".proto") {
        package.to_string()
    } else {
        format!("{}.proto", package.to_lowercase())
    }
}

/// Full output path for a package inside `dir`
pub fn proto_path(dir: &Path, package: &str) -> PathBuf {
    dir.join(file_name(package))
}

/// Write `contents` to `path`, refusing to replace an existing file unless `force`
///
/// Contents go to a temporary file next to `path` that is moved into place
/// only once fully written, so a failed write never leaves a partial file.
pub fn write_proto(path: &Path, contents: &[u8], force: bool) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !force && path.try_exists()? {
        return Err(OutputError::AlreadyExists);
    }

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;

    let persisted = if force {
        file.persist(path)
    } else {
        file.persist_noclobber(path)
    };
    persisted.map_err(|e| match e.error.kind() {
        io::ErrorKind::AlreadyExists => OutputError::AlreadyExists,
        _ => OutputError::Io(e.error),
    })?;

    Ok(())
}
