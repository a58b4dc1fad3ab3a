//! Utility functions for file writes and report formatting

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Sibling path used while a file is being written
///
/// `data-csv/data.csv` becomes `data-csv/.data.csv.partial`.
pub fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Replace the contents of `path` with `contents`
///
/// The data goes to a sibling `.partial` file first and is renamed over `path` once fully
/// written, so readers never observe a truncated file under the final name. Any existing
/// file at `path` is overwritten.
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = partial_path(path);

    if let Err(e) = tokio::fs::write(&tmp, contents).await {
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(std::io::Error::new(
            e.kind(),
            format!("failed to write '{}': {}", path.display(), e),
        )
        .into());
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        tokio::fs::remove_file(&tmp).await.ok();
        return Err(std::io::Error::new(
            e.kind(),
            format!("failed to move '{}' into place: {}", path.display(), e),
        )
        .into());
    }

    Ok(())
}

/// Hex-encoded SHA-256 digest
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Quote a string in repr style
///
/// Single quotes are used unless the string contains a single quote and no double quote.
///
/// # Examples
///
/// ```
/// use dataset_dl::utils::quote_str;
///
/// assert_eq!(quote_str("Country name"), "'Country name'");
/// assert_eq!(quote_str("it's"), "\"it's\"");
/// ```
#[must_use]
pub fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render a list of strings as `['a', 'b', 'c']`
#[must_use]
pub fn format_str_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote_str(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Render a float with at least one fractional digit (`5` becomes `5.0`)
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
