//! Write canned content into caller-supplied sinks.

use crate::expectation::ContentSpec;
use crate::result::{DriverError, DriverResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Resolve `content` and write it into `sink`.
///
/// The sink is flushed but not closed. Missing content is a configuration
/// error: the caller asked for output the script never declared.
pub fn inject(
    operation: &str,
    content: Option<&ContentSpec>,
    sink: &mut dyn Write,
) -> DriverResult<()> {
    let Some(content) = content else {
        return Err(DriverError::MissingContentSpec {
            operation: operation.to_string(),
        });
    };

    let written = match content {
        ContentSpec::Literal(text) => write_all(sink, text.as_bytes()),
        ContentSpec::Base64(encoded) => STANDARD
            .decode(encoded.trim())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .and_then(|bytes| write_all(sink, &bytes)),
        ContentSpec::File(path) => copy_file(path, sink),
    };

    written.map_err(|e| DriverError::sink_write(operation, e))?;
    tracing::trace!(operation, kind = content.kind(), "injected content");
    Ok(())
}

fn copy_file(path: &Path, sink: &mut dyn Write) -> io::Result<()> {
    let mut file = File::open(path)?;
    io::copy(&mut file, sink)?;
    sink.flush()
}

fn write_all(sink: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    sink.write_all(bytes)?;
    sink.flush()
}
