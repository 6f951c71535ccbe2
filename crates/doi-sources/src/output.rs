//! JSON report writers

use crate::error::{SourceError, SourceResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write a value as pretty JSON (4-space indent, non-ASCII kept as is)
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> SourceResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path).map_err(|e| SourceError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    value.serialize(&mut serializer).map_err(|e| SourceError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(path = %path.display(), "wrote JSON output");
    Ok(())
}
