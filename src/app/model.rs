use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::editor::EditorBuffer;
use crate::search::{self, MatchSet, ScanOutcome};
use crate::ui::viewport::Viewport;

/// Hash a byte slice for content comparison.
pub(super) fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Rows taken by permanent chrome: the menu/toolbar bar and the status bar.
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which dropdown menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuId {
    File,
    Search,
}

/// An open dropdown menu and its highlighted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub menu: MenuId,
    pub selected: usize,
}

/// What the path prompt will do with the submitted path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Load,
    Save,
}

/// The path prompt: the stand-in for a file chooser dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub action: PathAction,
    pub input: String,
}

/// Search lifecycle: `Idle` → `Searching` (scan in flight) → `Ready`
/// (matches populated). Navigation sets the match cursor and keeps the
/// phase at `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    /// A scan with this generation is running on a worker thread.
    Searching(u64),
    Ready,
}

/// Match state owned by the application: the collected set, the navigation
/// cursor, and the scan generation counter.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub phase: ScanPhase,
    pub matches: MatchSet,
    /// Index of the current match; `None` until the first navigation.
    pub cursor: Option<usize>,
    /// Query text of the most recent search request.
    pub last_query: Option<String>,
    generation: u64,
}

impl SearchState {
    /// Begin a new search: clear the match set, unset the cursor, and claim
    /// the next scan generation.
    pub fn begin(&mut self, query: &str) -> u64 {
        self.matches = MatchSet::default();
        self.cursor = None;
        self.generation += 1;
        self.phase = ScanPhase::Searching(self.generation);
        self.last_query = Some(query.to_string());
        self.generation
    }

    /// Drop matches whose offsets no longer describe the document
    /// (after a load). The generation counter is kept so in-flight scans
    /// of the old text stay stale.
    pub fn invalidate(&mut self) {
        self.matches = MatchSet::default();
        self.cursor = None;
        self.phase = ScanPhase::Idle;
    }

    pub const fn current_generation(&self) -> u64 {
        self.generation
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited
    pub buffer: EditorBuffer,
    /// Path of the loaded or last-saved file, if any
    pub file_path: Option<PathBuf>,
    /// Viewport managing the visible slice of the buffer
    pub viewport: Viewport,
    /// Match set, navigation cursor, and scan phase
    pub search: SearchState,
    /// Search prompt contents while the prompt is open
    pub search_input: Option<String>,
    /// Whether patterns are interpreted as regular expressions
    pub use_regex: bool,
    /// Open path prompt (load/save), if any
    pub path_prompt: Option<PathPrompt>,
    /// Open dropdown menu, if any
    pub menu: Option<MenuState>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether on-disk change watching is enabled
    pub watch_enabled: bool,
    /// The file changed on disk outside the editor since it was loaded
    pub disk_changed: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("use_regex", &self.use_regex)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model for a terminal of the given size.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        let buffer = EditorBuffer::empty();
        let total_lines = buffer.line_count();
        Self {
            buffer,
            file_path: None,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(CHROME_ROWS),
                total_lines,
            ),
            search: SearchState::default(),
            search_input: None,
            use_regex: false,
            path_prompt: None,
            menu: None,
            help_visible: false,
            watch_enabled: true,
            disk_changed: false,
            toast: None,
            should_quit: false,
        }
    }

    /// Load a file wholesale into the buffer, replacing its content.
    ///
    /// On failure the buffer is cleared and the file path dropped, so a
    /// later save cannot silently overwrite the unreadable file with an
    /// empty document.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let raw_bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.buffer.clear();
                self.file_path = None;
                self.after_document_replaced();
                return Err(err)
                    .with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        self.buffer
            .set_text(&String::from_utf8_lossy(&raw_bytes));
        self.file_path = Some(path.to_path_buf());
        self.after_document_replaced();
        Ok(())
    }

    /// Write the buffer's full text as raw bytes to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written; the buffer keeps
    /// its dirty flag in that case.
    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, self.buffer.text().as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.buffer.mark_clean();
        self.file_path = Some(path.to_path_buf());
        self.disk_changed = false;
        Ok(())
    }

    /// Whether the bytes on disk match the buffer content. Used to tell a
    /// foreign modification apart from the editor's own save.
    pub fn disk_matches_buffer(&self) -> bool {
        let Some(path) = &self.file_path else {
            return false;
        };
        std::fs::read(path)
            .is_ok_and(|bytes| hash_bytes(&bytes) == hash_bytes(self.buffer.text().as_bytes()))
    }

    /// Apply a finished scan. Outcomes from any generation other than the
    /// one currently in flight are dropped.
    pub fn apply_scan(&mut self, outcome: ScanOutcome) {
        let ScanPhase::Searching(generation) = self.search.phase else {
            tracing::debug!(generation = outcome.generation, "dropping scan outcome, no scan in flight");
            return;
        };
        if outcome.generation != generation {
            tracing::debug!(
                stale = outcome.generation,
                current = generation,
                "dropping stale scan outcome"
            );
            return;
        }

        match outcome.result {
            Ok(matches) => {
                self.search.matches = matches;
                self.search.phase = ScanPhase::Ready;
                // The first result should be visible immediately.
                self.navigate_match(false);
            }
            Err(err) => {
                self.search.phase = ScanPhase::Idle;
                self.show_toast(ToastLevel::Error, format!("Search failed: {err}"));
            }
        }
    }

    /// Move to the next (or previous) match, selecting its span and
    /// scrolling it into view. An empty match set produces a toast, never
    /// a fault.
    pub fn navigate_match(&mut self, backwards: bool) {
        let result = if backwards {
            search::prev_match(&self.search.matches, self.search.cursor)
        } else {
            search::next_match(&self.search.matches, self.search.cursor)
        };
        match result {
            Ok((idx, span)) => {
                self.search.cursor = Some(idx);
                self.buffer.select_span(span);
                self.viewport.ensure_visible(self.buffer.cursor().line);
            }
            Err(_) => {
                self.show_toast(ToastLevel::Info, "No matches");
            }
        }
    }

    /// One-based current match and total, for the status bar.
    pub fn current_search_match(&self) -> Option<(usize, usize)> {
        self.search
            .cursor
            .map(|idx| (idx + 1, self.search.matches.len()))
    }

    /// Sync the viewport after an edit: track the line count and keep the
    /// cursor on screen.
    pub fn sync_viewport(&mut self) {
        self.viewport.set_total_lines(self.buffer.line_count());
        self.viewport.ensure_visible(self.buffer.cursor().line);
    }

    fn after_document_replaced(&mut self) {
        self.search.invalidate();
        self.disk_changed = false;
        self.viewport.set_total_lines(self.buffer.line_count());
        self.viewport.go_to_top();
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}
