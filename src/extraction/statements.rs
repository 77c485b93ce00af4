//! Decorator-buffering statement reconstructor.
//!
//! Decorated declarations often span several lines:
//!
//! ```text
//! @OneToMany(() => Order, (order) => order.customer, {
//!   cascade: true,
//! })
//! orders: Order[];
//! ```
//!
//! The reconstructor joins a run of decorator lines and the declaration they
//! annotate into one flat statement so that a single-line pattern can match it.
//! A run starts at a line beginning with `@` and ends at the first line
//! containing `;`. A `;` inside a decorator argument ends the run early; that
//! is a known limitation.

use std::str::Lines;

const DECORATOR_MARKER: char = '@';
const TERMINATOR: char = ';';

/// One flushed buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Trimmed lines joined with single spaces, with a trailing space
    pub text: String,
    /// 0-based line on which the buffer started
    pub line: usize,
    /// 0-based line holding the terminator
    pub end_line: usize,
    /// Byte offset in `text` at which each buffered line begins
    pub line_starts: Vec<usize>,
}

impl Statement {
    /// Source line holding the byte at `offset` of `text`.
    pub fn line_at(&self, offset: usize) -> usize {
        let index = self.line_starts.partition_point(|&start| start <= offset);
        self.line + index.saturating_sub(1)
    }
}

/// Iterator over the statements of one file, in document order.
pub struct StatementReconstructor<'a> {
    lines: std::iter::Enumerate<Lines<'a>>,
}

impl<'a> StatementReconstructor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for StatementReconstructor<'_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        let mut buffer = String::new();
        let mut line_starts = Vec::new();
        let mut start: Option<usize> = None;

        for (index, raw) in self.lines.by_ref() {
            let line = raw.trim();

            if start.is_none() && !line.starts_with(DECORATOR_MARKER) {
                continue;
            }

            let started_at = *start.get_or_insert(index);
            line_starts.push(buffer.len());
            buffer.push_str(line);
            buffer.push(' ');

            if line.contains(TERMINATOR) {
                return Some(Statement {
                    text: buffer,
                    line: started_at,
                    end_line: index,
                    line_starts,
                });
            }
        }

        // An unterminated run at end of input is dropped
        None
    }
}

pub fn reconstruct_statements(text: &str) -> Vec<Statement> {
    StatementReconstructor::new(text).collect()
}
