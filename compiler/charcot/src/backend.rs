// Native code emission. No machine code generator ships with the compiler;
// the fallback writes the IR next to the requested output for inspection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Turns IR text into an artifact for `target` at (or near) `output`.
pub trait NativeBackend {
    /// Returns the path actually written.
    fn emit(&self, ir: &str, target: &str, output: &Path) -> Result<PathBuf, BackendError>;
}

/// Writes the IR verbatim to `output` with an `.ll` extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct IrFileBackend;

impl NativeBackend for IrFileBackend {
    fn emit(&self, ir: &str, target: &str, output: &Path) -> Result<PathBuf, BackendError> {
        let path = output.with_extension("ll");
        log::info!(
            "no native code generator for {target}; writing IR to {}",
            path.display()
        );
        fs::write(&path, ir).map_err(|source| BackendError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
