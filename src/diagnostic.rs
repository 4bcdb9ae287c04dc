use std::fmt;

use crate::position::Position;

/// The opening token a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Plain code brace `{`.
    Brace,
    /// Template interpolation opener `${`.
    Interpolation,
}

impl MarkerKind {
    /// Source text of the opener.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brace => "{",
            Self::Interpolation => "${",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opener still waiting for its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMarker {
    pub kind: MarkerKind,
    pub position: Position,
}

/// A single brace-nesting finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// `}` seen with nothing open.
    ExtraClosingBrace { position: Position },
    /// `}` closed a marker that was not a plain brace.
    MismatchedBrace {
        position: Position,
        expected: MarkerKind,
    },
    /// Marker still open at end of input.
    UnclosedBrace { marker: OpenMarker },
}

impl Diagnostic {
    /// Where the finding points: the closer for extra and mismatched
    /// braces, the opener for unclosed ones.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::ExtraClosingBrace { position } | Self::MismatchedBrace { position, .. } => {
                *position
            }
            Self::UnclosedBrace { marker } => marker.position,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtraClosingBrace { position } => {
                write!(f, "Extra closing brace at {position}")
            }
            Self::MismatchedBrace { position, expected } => {
                write!(f, "Mismatched brace at {position}: expected {expected} close")
            }
            Self::UnclosedBrace { marker } => {
                write!(f, "Unclosed {} opened at {}", marker.kind, marker.position)
            }
        }
    }
}
