use std::fs;
use std::path::Path;

use crate::error::{Error, ErrorKind, Result};

pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        Error::api(ErrorKind::Io(format!(
            "Cannot read file {}: {}",
            path.display(),
            e
        )))
    })
}

pub fn write_file(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| {
        Error::api(ErrorKind::Io(format!(
            "Cannot write to file {}: {}",
            path.display(),
            e
        )))
    })
}
