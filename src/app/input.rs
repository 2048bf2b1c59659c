use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::app::model::CHROME_ROWS;
use crate::app::{App, MenuId, Message, Model};
use crate::editor::Direction;
use crate::ui::{self, BarItem};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if let Some(state) = model.menu {
            return match key.code {
                KeyCode::Up => Some(Message::MenuUp),
                KeyCode::Down => Some(Message::MenuDown),
                KeyCode::Left | KeyCode::Right => Some(Message::MenuSwitch),
                KeyCode::Enter => menu_action(state.menu, state.selected),
                KeyCode::Esc | KeyCode::F(10) => Some(Message::CloseMenu),
                _ => None,
            };
        }

        if let Some(prompt) = &model.path_prompt {
            return match key.code {
                KeyCode::Esc => Some(Message::PathCancel),
                KeyCode::Enter => Some(Message::PathSubmit),
                KeyCode::Backspace => {
                    let mut next = prompt.input.clone();
                    next.pop();
                    Some(Message::PathInput(next))
                }
                KeyCode::Char(c) if is_plain(key.modifiers) => {
                    let mut next = prompt.input.clone();
                    next.push(c);
                    Some(Message::PathInput(next))
                }
                _ => None,
            };
        }

        if let Some(query) = &model.search_input {
            return match key.code {
                KeyCode::Esc => Some(Message::ClearSearch),
                KeyCode::Enter => Some(Message::SubmitSearch),
                KeyCode::Tab => Some(Message::ToggleRegex),
                KeyCode::Backspace => {
                    let mut next = query.clone();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char(c) if is_plain(key.modifiers) => {
                    let mut next = query.clone();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            // File
            KeyCode::Char('o') if ctrl => Some(Message::OpenLoadPrompt),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('q') if ctrl => Some(Message::Quit),

            // Search
            KeyCode::Char('f') if ctrl => Some(Message::StartSearch),
            KeyCode::Char('r') if ctrl => Some(Message::ToggleRegex),
            KeyCode::Char('n') if ctrl => Some(Message::NextMatch),
            KeyCode::Char('p') if ctrl => Some(Message::PrevMatch),
            KeyCode::F(3) if shift => Some(Message::PrevMatch),
            KeyCode::F(3) => Some(Message::NextMatch),
            KeyCode::Esc => Some(Message::ClearSearch),

            // Menus and overlays
            KeyCode::F(10) => Some(Message::OpenMenu(MenuId::File)),
            KeyCode::Char('f') if alt => Some(Message::OpenMenu(MenuId::File)),
            KeyCode::Char('s') if alt => Some(Message::OpenMenu(MenuId::Search)),
            KeyCode::F(1) => Some(Message::ToggleHelp),

            // Cursor movement
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),

            // Editing
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::InsertChar(c)),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Message::HideHelp);
        }

        let area = Rect::new(
            0,
            0,
            model.viewport.width(),
            model.viewport.height().saturating_add(CHROME_ROWS),
        );

        if let Some(state) = model.menu {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                if let Some(idx) =
                    ui::menu_item_at(state, model.use_regex, area, mouse.column, mouse.row)
                {
                    return menu_action(state.menu, idx);
                }
                if mouse.row == 0 {
                    if let Some(item) = ui::bar_hit(mouse.column, model.use_regex) {
                        return Some(bar_message(item));
                    }
                }
                return Some(Message::CloseMenu);
            }
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row == 0 {
                    return ui::bar_hit(mouse.column, model.use_regex).map(bar_message);
                }
                let text_area = ui::text_area_rect(model, area);
                if point_in_rect(mouse.column, mouse.row, text_area) {
                    let line = model.viewport.offset() + (mouse.row - text_area.y) as usize;
                    let line = line.min(model.buffer.line_count().saturating_sub(1));
                    let gutter = ui::gutter_width(model.buffer.line_count());
                    let display_col = mouse.column.saturating_sub(text_area.x + gutter) as usize;
                    let text = model.buffer.line_at(line).unwrap_or_default();
                    return Some(Message::MoveTo(line, byte_col_at(&text, display_col)));
                }
                None
            }
            MouseEventKind::ScrollDown => {
                model.viewport.can_scroll_down().then_some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp => {
                model.viewport.can_scroll_up().then_some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }
}

/// No modifier that would make a character key a chord.
fn is_plain(modifiers: KeyModifiers) -> bool {
    !modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

const fn bar_message(item: BarItem) -> Message {
    match item {
        BarItem::MenuFile => Message::OpenMenu(MenuId::File),
        BarItem::MenuSearch => Message::OpenMenu(MenuId::Search),
        BarItem::Open => Message::OpenLoadPrompt,
        BarItem::Save => Message::Save,
        BarItem::Find => Message::StartSearch,
        BarItem::Prev => Message::PrevMatch,
        BarItem::Next => Message::NextMatch,
        BarItem::Regex => Message::ToggleRegex,
    }
}

/// The action behind a dropdown menu entry.
fn menu_action(menu: MenuId, index: usize) -> Option<Message> {
    match (menu, index) {
        (MenuId::File, 0) => Some(Message::OpenLoadPrompt),
        (MenuId::File, 1) => Some(Message::Save),
        (MenuId::File, 2) => Some(Message::Quit),
        (MenuId::Search, 0) => Some(Message::StartSearch),
        (MenuId::Search, 1) => Some(Message::PrevMatch),
        (MenuId::Search, 2) => Some(Message::NextMatch),
        (MenuId::Search, 3) => Some(Message::ToggleRegex),
        _ => None,
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Map a display column to a byte column within `line`, walking character
/// widths. Clicks past the end of the line land at the line end.
fn byte_col_at(line: &str, display_col: usize) -> usize {
    let mut width = 0usize;
    for (byte_idx, ch) in line.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > display_col {
            return byte_idx;
        }
        width += ch_width;
    }
    line.len()
}
