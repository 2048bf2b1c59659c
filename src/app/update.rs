use crate::app::Model;
use crate::app::model::{MenuId, MenuState, PathAction, PathPrompt};
use crate::editor::Direction;
use crate::search::ScanOutcome;
use crate::ui;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of buffer (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    MoveToEnd,
    /// Move cursor to absolute position (line, col) — e.g. from mouse click
    MoveTo(usize, usize),
    /// Scroll the viewport up by n lines
    ScrollUp(usize),
    /// Scroll the viewport down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // File
    /// Open the path prompt to load a file
    OpenLoadPrompt,
    /// Save: directly when a path is known, via the path prompt otherwise
    Save,
    /// Update path prompt contents
    PathInput(String),
    /// Confirm the path prompt (load or save runs as a side effect)
    PathSubmit,
    /// Dismiss the path prompt
    PathCancel,
    /// The loaded file was modified on disk by someone else
    FileChanged,

    // Search
    /// Open the search prompt
    StartSearch,
    /// Update search prompt contents
    SearchInput(String),
    /// Kick off a scan for the prompt's query (spawned as a side effect)
    SubmitSearch,
    /// Toggle regex interpretation of the pattern
    ToggleRegex,
    /// Go to next match
    NextMatch,
    /// Go to previous match
    PrevMatch,
    /// Close the search prompt and drop matches and highlight
    ClearSearch,
    /// A background scan finished
    ScanFinished(ScanOutcome),

    // Menus and overlays
    /// Open a dropdown menu
    OpenMenu(MenuId),
    /// Move the menu highlight up
    MenuUp,
    /// Move the menu highlight down
    MenuDown,
    /// Switch between the File and Search menus
    MenuSwitch,
    /// Close the open menu
    CloseMenu,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit immediately, with no save prompt
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Any action that is not menu navigation closes an open menu.
    if !matches!(
        msg,
        Message::OpenMenu(_) | Message::MenuUp | Message::MenuDown | Message::MenuSwitch
    ) {
        model.menu = None;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.sync_viewport();
        }
        Message::SplitLine => {
            model.buffer.split_line();
            model.sync_viewport();
        }
        Message::DeleteBack => {
            model.buffer.delete_back();
            model.sync_viewport();
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
            model.sync_viewport();
        }
        Message::MoveCursor(dir) => {
            model.buffer.move_cursor(dir);
            model.sync_viewport();
        }
        Message::MoveHome => {
            model.buffer.move_home();
            model.sync_viewport();
        }
        Message::MoveEnd => {
            model.buffer.move_end();
            model.sync_viewport();
        }
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
            model.sync_viewport();
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
            model.sync_viewport();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.sync_viewport();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.sync_viewport();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.buffer.clear_selection();
            model.sync_viewport();
        }
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
        }
        Message::PageUp => {
            model.viewport.page_up();
        }
        Message::PageDown => {
            model.viewport.page_down();
        }

        // File
        Message::OpenLoadPrompt => {
            model.path_prompt = Some(PathPrompt {
                action: PathAction::Load,
                input: model
                    .file_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            });
        }
        Message::Save => {
            // With no known path the prompt collects one; otherwise the
            // write happens as a side effect.
            if model.file_path.is_none() {
                model.path_prompt = Some(PathPrompt {
                    action: PathAction::Save,
                    input: String::new(),
                });
            }
        }
        Message::PathInput(input) => {
            if let Some(prompt) = &mut model.path_prompt {
                prompt.input = input;
            }
        }
        Message::PathCancel => {
            model.path_prompt = None;
        }
        // PathSubmit/SubmitSearch/FileChanged: handled in effects (side effects)
        Message::PathSubmit | Message::SubmitSearch | Message::FileChanged => {}

        // Search
        Message::StartSearch => {
            // Prompt opens prefilled with the previous query, like a search
            // field that keeps its text.
            model.search_input = Some(model.search.last_query.clone().unwrap_or_default());
        }
        Message::SearchInput(query) => {
            if model.search_input.is_some() {
                model.search_input = Some(query);
            }
        }
        Message::ToggleRegex => {
            model.use_regex = !model.use_regex;
        }
        Message::NextMatch => {
            model.navigate_match(false);
        }
        Message::PrevMatch => {
            model.navigate_match(true);
        }
        Message::ClearSearch => {
            model.search_input = None;
            model.search.invalidate();
            model.buffer.clear_selection();
        }
        Message::ScanFinished(outcome) => {
            model.apply_scan(outcome);
        }

        // Menus and overlays
        Message::OpenMenu(menu) => {
            model.menu = Some(MenuState { menu, selected: 0 });
        }
        Message::MenuUp => {
            if let Some(state) = &mut model.menu {
                state.selected = state.selected.saturating_sub(1);
            }
        }
        Message::MenuDown => {
            if let Some(state) = &mut model.menu {
                let max = ui::menu_len(state.menu).saturating_sub(1);
                state.selected = (state.selected + 1).min(max);
            }
        }
        Message::MenuSwitch => {
            if let Some(state) = &mut model.menu {
                state.menu = match state.menu {
                    MenuId::File => MenuId::Search,
                    MenuId::Search => MenuId::File,
                };
                state.selected = 0;
            }
        }
        Message::CloseMenu => {
            model.menu = None;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model
                .viewport
                .resize(width, height.saturating_sub(crate::app::model::CHROME_ROWS));
            model.viewport.ensure_visible(model.buffer.cursor().line);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
