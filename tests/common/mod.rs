#![allow(dead_code)]

use bracecheck::{Diagnostic, MarkerKind, OpenMarker, Position, scan};

/// Scan and render each diagnostic as the CLI prints it.
pub fn messages(input: &str) -> Vec<String> {
    scan(input).iter().map(ToString::to_string).collect()
}

pub const fn extra(line: usize, column: usize) -> Diagnostic {
    Diagnostic::ExtraClosingBrace {
        position: Position::new(line, column),
    }
}

pub const fn mismatched(line: usize, column: usize) -> Diagnostic {
    Diagnostic::MismatchedBrace {
        position: Position::new(line, column),
        expected: MarkerKind::Interpolation,
    }
}

pub const fn unclosed(kind: MarkerKind, line: usize, column: usize) -> Diagnostic {
    Diagnostic::UnclosedBrace {
        marker: OpenMarker {
            kind,
            position: Position::new(line, column),
        },
    }
}

/// Position of the character at `index` (in chars) of `input`.
pub fn position_of(input: &str, index: usize) -> Position {
    let before: Vec<char> = input.chars().take(index).collect();
    let line = 1 + before.iter().filter(|&&c| c == '\n').count();
    let column = 1 + before.iter().rev().take_while(|&&c| c != '\n').count();
    Position::new(line, column)
}
