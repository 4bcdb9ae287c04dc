//! Brace-nesting lint for JavaScript-like source text.
//!
//! A single left-to-right pass tracks comments, quoted strings and
//! template literals so that braces inside them are ignored, and
//! reports:
//!
//! - closing braces with nothing open,
//! - closing braces that end a `${` interpolation instead of a `{`,
//! - braces and interpolations still open at end of input.
//!
//! No syntax tree is built and the scan never fails.
//!
//! # Quick start
//!
//! ```
//! use bracecheck::check_str;
//!
//! let source = "const s = `${a}`;\nif (ok) {\n  run(); // }\n";
//! let messages: Vec<String> = check_str(source).iter().map(ToString::to_string).collect();
//! assert_eq!(messages, ["Unclosed { opened at line 2, col 9"]);
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod diagnostic;
pub mod logging;
pub mod position;
pub mod scanner;

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

pub use diagnostic::{Diagnostic, MarkerKind, OpenMarker};
pub use position::Position;
pub use scanner::scan;

/// Failure to obtain the text to scan. Diagnostics are never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be read as UTF-8 text.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Scan in-memory source text.
#[must_use]
pub fn check_str(text: &str) -> Vec<Diagnostic> {
    scan(text)
}

/// Read a file in full and scan it.
///
/// Line endings are normalised first: `\r\n` and a lone `\r` both
/// become `\n`, so old Mac-style files get the same line numbers and
/// line-comment ends as Unix ones.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file is missing, unreadable, or not
/// valid UTF-8.
pub fn check_file(path: impl AsRef<Path>) -> Result<Vec<Diagnostic>, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read source");
    Ok(scan(&normalize_newlines(&content)))
}

fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
