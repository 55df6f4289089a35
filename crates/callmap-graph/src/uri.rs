//! URI, path, and editor-link helpers.
//!
//! Conversions between file system paths and file:// URIs go through the
//! `url` crate so percent-encoding and platform path formats are handled
//! consistently.

use camino::{Utf8Path, Utf8PathBuf};
use lsp_types::Uri;
use url::Url;

use crate::error::GraphError;

/// Scheme prefix of editor deep-links that open a file at a line.
pub const FILE_LINK_PREFIX: &str = "vscode://file/";

/// Converts a file:// URI to a `Utf8PathBuf`.
///
/// Handles percent-decoding and platform-specific path formats correctly.
#[must_use]
pub fn uri_to_path(uri: &Uri) -> Utf8PathBuf {
    let uri_str = uri.as_str();

    if let Some(path) = try_parse_uri_to_path(uri_str) {
        return path;
    }

    uri_str
        .strip_prefix("file://")
        .map_or_else(|| Utf8PathBuf::from(uri_str), Utf8PathBuf::from)
}

fn try_parse_uri_to_path(uri_str: &str) -> Option<Utf8PathBuf> {
    let url = Url::parse(uri_str).ok()?;
    let path = url.to_file_path().ok()?;
    Utf8PathBuf::try_from(path).ok()
}

/// Converts a path to a file:// URI.
///
/// # Errors
///
/// Returns a `GraphError` if the path cannot be converted to a valid URI.
pub fn path_to_uri(path: &Utf8Path) -> Result<Uri, GraphError> {
    let url = Url::from_file_path(path.as_std_path()).map_err(|()| {
        GraphError::io(
            format!("failed to convert path to URI: {path}"),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid path"),
        )
    })?;

    url.as_str().parse().map_err(|_| {
        GraphError::io(
            format!("failed to parse URI: {}", url.as_str()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid URI"),
        )
    })
}

/// Resolves `path` against the current directory when it is relative.
///
/// Paths that cannot be resolved are returned unchanged.
#[must_use]
pub fn absolute_path(path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::path::absolute(path.as_std_path())
        .ok()
        .and_then(|resolved| Utf8PathBuf::from_path_buf(resolved).ok())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Returns the final component of `path`, or the whole path when it has none.
#[must_use]
pub fn base_filename(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or_else(|| path.as_str())
}

/// Renders an editor deep-link for `path`, optionally positioned at `line`.
#[must_use]
pub fn file_link(path: &Utf8Path, line: Option<u32>) -> String {
    match line {
        Some(number) => format!("{FILE_LINK_PREFIX}{path}:{number}"),
        None => format!("{FILE_LINK_PREFIX}{path}"),
    }
}
