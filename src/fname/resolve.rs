//! Unused-name resolution against a live directory.
//!
//! The existence check is re-evaluated on every call; nothing is cached,
//! since the directory contents change as files are written during a run.

use std::path::Path;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{MailGrabError, Result};

/// Length of the random suffix appended on collision.
const SUFFIX_LEN: usize = 6;

/// Retry budget for suffixed and counter-generated names.
const MAX_ATTEMPTS: u32 = 1000;

/// Find a filename that does not collide with any entry in `dir`.
///
/// `sanitized` is the candidate name (already passed through
/// [`super::sanitize_filename`]); `declared_ext` is the caller-requested
/// extension without a leading period, which overrides whatever extension
/// the candidate itself carries.
///
/// The first attempt is the candidate verbatim (with the effective
/// extension). On collision, `stem_XXXXXX.ext` names with a random
/// 6-character alphanumeric suffix are tried. A blank candidate falls back
/// to `attachment1.ext`, `attachment2.ext`, … counter names.
///
/// Note: when neither a declared nor a detected extension exists, the
/// effective extension is a bare period, producing names like `report.`.
/// This mirrors the reference behavior and is kept deliberately.
///
/// Fails with [`MailGrabError::DirectoryUnavailable`] when `dir` is missing
/// and [`MailGrabError::NameSpaceExhausted`] when the retry budget runs out.
pub fn resolve_unused(sanitized: &str, declared_ext: Option<&str>, dir: &Path) -> Result<String> {
    check_dir(dir)?;

    let (stem, detected_ext) = split_extension(sanitized);
    let ext = effective_extension(declared_ext, detected_ext);

    if stem.is_empty() {
        return counter_fallback(&ext, dir);
    }

    let first = format!("{stem}{ext}");
    if !dir.join(&first).exists() {
        return Ok(first);
    }

    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!("{stem}_{}{ext}", random_suffix());
        if !dir.join(&candidate).exists() {
            return Ok(candidate);
        }
    }

    Err(MailGrabError::NameSpaceExhausted {
        base: stem.to_string(),
        dir: dir.to_path_buf(),
        attempts: MAX_ATTEMPTS,
    })
}

/// Verify that `dir` exists and is a writable directory.
fn check_dir(dir: &Path) -> Result<()> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            if meta.permissions().readonly() {
                return Err(MailGrabError::DirectoryUnavailable {
                    path: dir.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "directory is read-only",
                    ),
                });
            }
            Ok(())
        }
        Ok(_) => Err(MailGrabError::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        }),
        Err(source) => Err(MailGrabError::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Split a sanitized name into stem and extension (with leading period).
///
/// A leading period does not start an extension, and leading periods are
/// dropped from the stem, so `".hidden"` splits as `("hidden", "")`. This
/// differs from `Path::file_stem`, which would keep the dot; dropping it
/// keeps the resolved name from starting with a period and vanishing as a
/// hidden file on Unix.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name.trim_start_matches('.'), ""),
    }
}

/// Pick the extension to use: a non-empty declared extension wins over the
/// detected one; with neither, fall back to a bare period.
fn effective_extension(declared: Option<&str>, detected: &str) -> String {
    match declared {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.trim_start_matches('.')),
        _ if !detected.is_empty() => detected.to_string(),
        _ => ".".to_string(),
    }
}

/// `attachmentN.ext` names for candidates with no usable stem.
fn counter_fallback(ext: &str, dir: &Path) -> Result<String> {
    for counter in 1..=MAX_ATTEMPTS {
        let candidate = format!("attachment{counter}{ext}");
        if !dir.join(&candidate).exists() {
            return Ok(candidate);
        }
    }
    Err(MailGrabError::NameSpaceExhausted {
        base: "attachment".to_string(),
        dir: dir.to_path_buf(),
        attempts: MAX_ATTEMPTS,
    })
}

/// Six random characters from `[A-Za-z0-9]`.
fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect()
}
