use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use memmap2::Mmap;

use crate::model::booster::TreeEnsemble;

pub const DEFAULT_MODEL_FILE: &str = "xgboost_model.json";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("model artifact not found: {0}")]
    Missing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is empty: {0}")]
    Empty(PathBuf),
    #[error("gzip failed to decompress {path}: {source}")]
    Gzip {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unsupported model: {0}")]
    Unsupported(String),
    #[error("feature schema mismatch: {0}")]
    Schema(String),
    #[error("invalid tree: {0}")]
    InvalidTree(String),
}

/// Artifact location: an explicit path if given, otherwise
/// [`DEFAULT_MODEL_FILE`] next to the running executable.
pub fn resolve_model_path(explicit: Option<&Path>) -> Result<PathBuf, LoadError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(model_path_in(dir))
}

pub fn model_path_in(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_MODEL_FILE)
}

pub fn load_model(path: &Path) -> Result<TreeEnsemble, LoadError> {
    match std::fs::metadata(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(LoadError::Io(e)),
        Ok(meta) if !meta.is_file() => {
            return Err(LoadError::Io(io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            )));
        }
        Ok(_) => {}
    }
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let bytes = &mmap[..];

    if bytes.starts_with(&GZIP_MAGIC) {
        let mut json = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut json)
            .map_err(|source| LoadError::Gzip {
                path: path.to_path_buf(),
                source,
            })?;
        TreeEnsemble::from_json_slice(&json)
    } else {
        TreeEnsemble::from_json_slice(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/artifact.rs"]
mod tests;
