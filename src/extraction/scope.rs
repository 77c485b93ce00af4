//! Brace-depth tracking for body-scoped member attachment.
//!
//! Pattern matches carry byte offsets but no notion of which class they sit
//! in. `ScopeMap` walks the text once, counting `{`/`}` outside strings and
//! comments, and records for every line the class whose body *directly*
//! contains it. Lines nested deeper (method bodies, object literals) and lines
//! outside any class map to no owner.

use super::patterns::ClassHeader;

/// Maps byte offsets to 0-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Per-line owning class, as an index into the header list it was built from.
#[derive(Debug, Clone)]
pub struct ScopeMap {
    owners: Vec<Option<usize>>,
}

impl ScopeMap {
    /// `headers` must be in offset order, as `find_class_headers` returns them.
    pub fn build(text: &str, headers: &[ClassHeader]) -> Self {
        let mut owners = Vec::new();
        // (header index, depth of its body)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut depth = 0usize;
        let mut pending: Option<usize> = None;
        let mut next_header = 0usize;
        let mut state = Lexical::Code;
        let mut escaped = false;
        let mut prev = '\0';

        let owner_at = |stack: &[(usize, usize)], depth: usize| {
            stack
                .last()
                .filter(|(_, body_depth)| *body_depth == depth)
                .map(|(idx, _)| *idx)
        };

        owners.push(None);

        for (offset, ch) in text.char_indices() {
            while next_header < headers.len() && headers[next_header].offset <= offset {
                pending = Some(next_header);
                next_header += 1;
            }

            match state {
                Lexical::Code => match ch {
                    '/' if prev == '/' => state = Lexical::LineComment,
                    '*' if prev == '/' => state = Lexical::BlockComment,
                    '\'' | '"' | '`' => {
                        state = Lexical::Str(ch);
                        escaped = false;
                    }
                    '{' => {
                        depth += 1;
                        if let Some(idx) = pending.take() {
                            stack.push((idx, depth));
                        }
                    }
                    '}' => {
                        if stack.last().is_some_and(|(_, d)| *d == depth) {
                            stack.pop();
                        }
                        depth = depth.saturating_sub(1);
                    }
                    _ => {}
                },
                Lexical::LineComment => {
                    if ch == '\n' {
                        state = Lexical::Code;
                    }
                }
                Lexical::BlockComment => {
                    if ch == '/' && prev == '*' {
                        state = Lexical::Code;
                        // `*/` must not be read as the start of another comment
                        prev = '\0';
                        continue;
                    }
                }
                Lexical::Str(quote) => {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == quote || (ch == '\n' && quote != '`') {
                        state = Lexical::Code;
                    }
                }
            }

            if ch == '\n' {
                owners.push(owner_at(&stack, depth));
            }
            prev = ch;
        }

        Self { owners }
    }

    /// Class owning `line`, if the line sits directly in a class body.
    pub fn owner_of_line(&self, line: usize) -> Option<usize> {
        self.owners.get(line).copied().flatten()
    }
}
