//! Byte-offset cursor over a single-line query.
//!
//! The query text itself belongs to the navigator; only the cursor position
//! is kept here. Edits produce the new query string without applying it.

use unicode_width::UnicodeWidthStr;

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryCursor {
    pub pos: usize,
}

impl QueryCursor {
    /// Keep the cursor on a valid boundary of `query`.
    pub fn clamp(&mut self, query: &str) {
        if self.pos > query.len() {
            self.pos = query.len();
        }
        while !query.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
    }

    pub fn insert(&mut self, query: &str, text: &str) -> String {
        let mut next = query.to_string();
        next.insert_str(self.pos, text);
        self.pos += text.len();
        next
    }

    pub fn backspace(&mut self, query: &str) -> Option<String> {
        if self.pos == 0 {
            return None;
        }
        let prev = prev_char_boundary(query, self.pos);
        let mut next = query.to_string();
        next.drain(prev..self.pos);
        self.pos = prev;
        Some(next)
    }

    pub fn delete(&mut self, query: &str) -> Option<String> {
        if self.pos >= query.len() {
            return None;
        }
        let end = next_char_boundary(query, self.pos);
        let mut next = query.to_string();
        next.drain(self.pos..end);
        Some(next)
    }

    pub fn left(&mut self, query: &str) {
        self.pos = prev_char_boundary(query, self.pos);
    }

    pub fn right(&mut self, query: &str) {
        if self.pos < query.len() {
            self.pos = next_char_boundary(query, self.pos);
        }
    }

    /// Display column of the cursor.
    pub fn column(&self, query: &str) -> u16 {
        query[..self.pos].width() as u16
    }
}
