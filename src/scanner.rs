use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, MarkerKind, OpenMarker};
use crate::position::Position;

/// The single active interpretation of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexicalContext {
    Code,
    /// `// ...` up to the next newline.
    LineComment,
    /// `/* ... */`.
    BlockComment,
    /// Quoted string. `in_template` records whether the quote was opened
    /// inside a template literal, which is where scanning resumes once
    /// the string closes.
    StringLiteral { delimiter: char, in_template: bool },
    /// Backtick template. Interpolation spans live on the marker stack.
    TemplateLiteral,
}

/// Scan source text and report brace-nesting problems.
///
/// Extra and mismatched closers are reported in the order they are
/// met; braces still open at end of input follow, oldest first.
/// Unterminated strings, comments, and templates are not reported.
///
/// ```
/// use bracecheck::{Diagnostic, Position, scan};
///
/// let diagnostics = scan("function f() {\n  return 1;\n}}\n");
/// assert_eq!(
///     diagnostics,
///     vec![Diagnostic::ExtraClosingBrace { position: Position::new(3, 2) }],
/// );
/// ```
#[must_use]
#[tracing::instrument(level = "debug", skip_all, fields(bytes = text.len()))]
pub fn scan(text: &str) -> Vec<Diagnostic> {
    Scanner::new(text).scan()
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    prev: Option<char>,
    line: usize,
    col: usize,
    context: LexicalContext,
    stack: Vec<OpenMarker>,
    max_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            prev: None,
            line: 1,
            col: 0,
            context: LexicalContext::Code,
            stack: Vec::new(),
            max_depth: 0,
            diagnostics: Vec::new(),
        }
    }

    fn scan(mut self) -> Vec<Diagnostic> {
        let mut scanned = 0usize;

        while let Some(ch) = self.chars.next() {
            scanned += 1;
            self.step(ch);
            self.prev = Some(ch);
        }

        let unclosed = std::mem::take(&mut self.stack);
        for marker in unclosed {
            self.emit(Diagnostic::UnclosedBrace { marker });
        }

        debug!(
            chars = scanned,
            diagnostics = self.diagnostics.len(),
            max_depth = self.max_depth,
            end_context = ?self.context,
            "scan finished"
        );

        self.diagnostics
    }

    const fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn step(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
            if self.context == LexicalContext::LineComment {
                self.enter(LexicalContext::Code);
            }
            return;
        }
        self.col += 1;

        let next = self.chars.peek().copied();
        match self.context {
            LexicalContext::Code => self.code(ch, next),
            LexicalContext::LineComment => {}
            LexicalContext::BlockComment => {
                // The `/` that follows is examined again as code.
                if ch == '*' && next == Some('/') {
                    self.enter(LexicalContext::Code);
                }
            }
            LexicalContext::StringLiteral {
                delimiter,
                in_template,
            } => {
                if ch == delimiter && !self.escaped() {
                    self.enter(if in_template {
                        LexicalContext::TemplateLiteral
                    } else {
                        LexicalContext::Code
                    });
                }
            }
            LexicalContext::TemplateLiteral => self.template(ch, next),
        }
    }

    fn code(&mut self, ch: char, next: Option<char>) {
        match ch {
            '/' if next == Some('/') => self.enter(LexicalContext::LineComment),
            '/' if next == Some('*') => self.enter(LexicalContext::BlockComment),
            '"' | '\'' => self.enter(LexicalContext::StringLiteral {
                delimiter: ch,
                in_template: false,
            }),
            '`' => self.enter(LexicalContext::TemplateLiteral),
            '{' => self.push(MarkerKind::Brace),
            '}' => self.close_brace(),
            _ => {}
        }
    }

    fn template(&mut self, ch: char, next: Option<char>) {
        match ch {
            '"' | '\'' => self.enter(LexicalContext::StringLiteral {
                delimiter: ch,
                in_template: true,
            }),
            '`' if !self.escaped() => self.enter(LexicalContext::Code),
            '$' if next == Some('{') => self.push(MarkerKind::Interpolation),
            '}' if self
                .stack
                .last()
                .is_some_and(|m| m.kind == MarkerKind::Interpolation) =>
            {
                self.stack.pop();
            }
            _ => {}
        }
    }

    fn close_brace(&mut self) {
        let position = self.position();
        match self.stack.pop() {
            None => self.emit(Diagnostic::ExtraClosingBrace { position }),
            Some(open) if open.kind != MarkerKind::Brace => {
                self.emit(Diagnostic::MismatchedBrace {
                    position,
                    expected: open.kind,
                });
            }
            Some(_) => {}
        }
    }

    fn push(&mut self, kind: MarkerKind) {
        self.stack.push(OpenMarker {
            kind,
            position: self.position(),
        });
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    /// Only the raw previous character is consulted, so `\\"` still
    /// counts as an escaped quote.
    fn escaped(&self) -> bool {
        self.prev == Some('\\')
    }

    fn enter(&mut self, context: LexicalContext) {
        trace!(
            from = ?self.context,
            to = ?context,
            line = self.line,
            col = self.col,
            "context"
        );
        self.context = context;
    }

    fn emit(&mut self, diagnostic: Diagnostic) {
        debug!(%diagnostic, "diagnostic");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brace_at(line: usize, column: usize) -> Diagnostic {
        Diagnostic::UnclosedBrace {
            marker: OpenMarker {
                kind: MarkerKind::Brace,
                position: Position::new(line, column),
            },
        }
    }

    #[test]
    fn empty_input() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn balanced_code() {
        assert!(scan("if (a) {\n  b({ c: 1 });\n}\n").is_empty());
    }

    #[test]
    fn lone_closer() {
        assert_eq!(
            scan("}"),
            vec![Diagnostic::ExtraClosingBrace {
                position: Position::new(1, 1)
            }]
        );
    }

    #[test]
    fn lone_opener() {
        assert_eq!(scan("{"), vec![brace_at(1, 1)]);
    }

    #[test]
    fn brace_in_line_comment() {
        assert!(scan("// {\n").is_empty());
    }

    #[test]
    fn line_comment_ends_at_newline() {
        assert_eq!(scan("// }\n{"), vec![brace_at(2, 1)]);
    }

    #[test]
    fn brace_in_block_comment() {
        assert!(scan("/* {\n } } */").is_empty());
    }

    #[test]
    fn brace_in_strings() {
        assert!(scan("\"{\"").is_empty());
        assert!(scan("'}'").is_empty());
    }

    #[test]
    fn other_quote_inside_string_is_inert() {
        assert!(scan("\"it's {\" ").is_empty());
    }

    #[test]
    fn escaped_quote_keeps_string_open() {
        assert!(scan(r#""a\"{" "#).is_empty());
    }

    #[test]
    fn interpolation_balanced() {
        assert!(scan("`${x}`").is_empty());
    }

    #[test]
    fn interpolation_unclosed() {
        assert_eq!(
            scan("`${x`"),
            vec![Diagnostic::UnclosedBrace {
                marker: OpenMarker {
                    kind: MarkerKind::Interpolation,
                    position: Position::new(1, 2),
                },
            }]
        );
    }

    #[test]
    fn bare_brace_closing_interpolation() {
        assert_eq!(
            scan("`${x` }"),
            vec![Diagnostic::MismatchedBrace {
                position: Position::new(1, 7),
                expected: MarkerKind::Interpolation,
            }]
        );
    }

    #[test]
    fn unclosed_reported_oldest_first() {
        assert_eq!(scan("{\n  {"), vec![brace_at(1, 1), brace_at(2, 3)]);
    }

    #[test]
    fn closers_reported_before_unclosed() {
        let diagnostics = scan("{ } }\n{");
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::ExtraClosingBrace {
                    position: Position::new(1, 5)
                },
                brace_at(2, 1),
            ]
        );
    }
}
