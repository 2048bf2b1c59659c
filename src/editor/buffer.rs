use std::ops::Range;

use ropey::Rope;

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The document: a rope-backed text buffer with a cursor and an optional
/// byte-range selection.
///
/// All external addressing is in byte offsets into the buffer's full text,
/// which is also what the search scanner produces. The selection and the
/// cursor column always lie on UTF-8 character boundaries.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    selection: Option<Range<usize>>,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            selection: None,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the entire content, resetting cursor, selection, and the
    /// dirty flag. Used when a file is loaded.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
        self.selection = None;
        self.dirty = false;
    }

    /// Drop all content. Used when a load fails.
    pub fn clear(&mut self) {
        self.set_text("");
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The current selection as a byte range, if any.
    pub const fn selection(&self) -> Option<&Range<usize>> {
        self.selection.as_ref()
    }

    /// Whether the buffer has been modified since load or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(
            line.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// Byte range of a line's content (newline excluded).
    pub fn line_byte_range(&self, line_idx: usize) -> Range<usize> {
        if line_idx >= self.rope.len_lines() {
            let end = self.rope.len_bytes();
            return end..end;
        }
        let start = self.rope.line_to_byte(line_idx);
        start..start + self.line_len(line_idx)
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Map a byte offset to a (line, column) position, clamping to the
    /// buffer end.
    pub fn position_at_offset(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(offset);
        (line, offset - self.rope.line_to_byte(line))
    }

    /// Map a (line, column) position to a byte offset, clamping to valid
    /// bounds.
    pub fn offset_at(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_byte(line) + col.min(self.line_len(line))
    }

    /// Byte offset of the cursor.
    pub fn cursor_offset(&self) -> usize {
        self.offset_at(self.cursor.line, self.cursor.col)
    }

    /// Select a byte span and place the caret at its end.
    ///
    /// This is the navigator's contract: the matched range is highlighted
    /// and the caret lands just after it. Offsets are snapped onto char
    /// boundaries; spans from a scan of an already-edited snapshot may
    /// point anywhere.
    pub fn select_span(&mut self, span: Range<usize>) {
        let start = self.snap_to_boundary(span.start);
        let end = self.snap_to_boundary(span.end).max(start);
        self.selection = Some(start..end);
        let (line, col) = self.position_at_offset(end);
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    /// Drop the selection, keeping the cursor where it is.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.touch();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        // Move cursor to the end of the inserted text
        let lines: Vec<&str> = s.split('\n').collect();
        if lines.len() > 1 {
            self.cursor.line += lines.len() - 1;
            self.cursor.set_col(lines.last().map_or(0, |l| l.len()));
        } else {
            self.cursor.set_col(self.cursor.col + s.len());
        }
        self.touch();
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.touch();
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        if self.cursor.col == 0 {
            // Join with the previous line by removing its newline
            let prev_line_len = self.line_len(self.cursor.line - 1);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        self.touch();
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..=char_idx);
        self.touch();
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column, clamping to valid bounds.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    /// Mark an edit: the selection no longer describes valid offsets.
    fn touch(&mut self) {
        self.selection = None;
        self.dirty = true;
    }

    /// Floor a byte offset onto the containing char's boundary.
    fn snap_to_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len_bytes());
        self.rope.char_to_byte(self.rope.byte_to_char(offset))
    }

    /// Ropey char index of the cursor.
    fn cursor_char_idx(&self) -> usize {
        self.rope.byte_to_char(self.cursor_offset())
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}
