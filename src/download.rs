//! Save extracted attachments to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{MailGrabError, Result};
use crate::extract::extract_attachments;
use crate::fname::resolve::resolve_unused;
use crate::fname::sanitize_filename;
use crate::parser::mime::parse_message;

/// How attachments of one message are selected and named.
#[derive(Debug, Clone)]
pub struct SaveOptions {
    /// Exact content type to keep, or `None` for unfiltered pass-through.
    pub mime_filter: Option<String>,
    /// Extension for saved files, overriding the declared filename's own.
    pub file_ext: Option<String>,
    /// Directory the files are written into. Must exist.
    pub output_dir: PathBuf,
}

/// Parse one raw message and write its matching attachments into
/// `opts.output_dir` under collision-free names.
///
/// Returns the paths written, in attachment order. Candidates without a
/// payload (container nodes in pass-through mode) are skipped.
pub fn save_attachments(raw_message: &[u8], opts: &SaveOptions) -> Result<Vec<PathBuf>> {
    let root = parse_message(raw_message)?;
    let mut written = Vec::new();

    for candidate in extract_attachments(&root, opts.mime_filter.as_deref()) {
        let Some(payload) = candidate.payload else {
            continue;
        };

        let sanitized = sanitize_filename(candidate.declared_filename.unwrap_or(""));
        let filename = resolve_unused(&sanitized, opts.file_ext.as_deref(), &opts.output_dir)?;
        let path = opts.output_dir.join(&filename);

        write_new(&path, payload)?;
        tracing::info!(
            filename = %filename,
            bytes = payload.len(),
            "Saved attachment"
        );
        written.push(path);
    }

    Ok(written)
}

/// Write `data` to `path`, failing if the file already exists.
///
/// `create_new` collapses the resolver's existence check and the write into
/// one atomic open, so two resolutions racing for the same name cannot
/// silently overwrite each other.
fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| MailGrabError::io(path, e))?;
    file.write_all(data).map_err(|e| MailGrabError::io(path, e))
}
