use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{MenuState, Model};

use super::bar::{menu_anchor_x, menu_items};

/// Where an open menu's dropdown sits: anchored under its bar label.
pub fn menu_dropdown_rect(state: MenuState, use_regex: bool, area: Rect) -> Rect {
    let items = menu_items(state.menu, use_regex);
    let inner_width = items.iter().map(|item| item.width()).max().unwrap_or(0);
    // Item width is small and bounded by the label table
    #[allow(clippy::cast_possible_truncation)]
    let width = (inner_width as u16 + 4).min(area.width);
    #[allow(clippy::cast_possible_truncation)]
    let height = (items.len() as u16 + 2).min(area.height.saturating_sub(1));
    let x = menu_anchor_x(state.menu, use_regex).min(area.width.saturating_sub(width));
    Rect::new(x, 1, width, height)
}

/// The dropdown item index under a mouse position, if any.
pub fn menu_item_at(state: MenuState, use_regex: bool, area: Rect, col: u16, row: u16) -> Option<usize> {
    let popup = menu_dropdown_rect(state, use_regex, area);
    let inside = col >= popup.x
        && col < popup.x + popup.width
        && row > popup.y
        && row < popup.y + popup.height.saturating_sub(1);
    if !inside {
        return None;
    }
    let idx = (row - popup.y - 1) as usize;
    (idx < menu_items(state.menu, use_regex).len()).then_some(idx)
}

pub fn render_menu_dropdown(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(state) = model.menu else {
        return;
    };
    let popup = menu_dropdown_rect(state, model.use_regex, area);

    let lines: Vec<Line> = menu_items(state.menu, model.use_regex)
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == state.selected {
                Style::default().bg(Color::White).fg(Color::Black)
            } else {
                Style::default()
            };
            Line::styled(format!(" {item} "), style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", section_style));
    lines.push(Line::raw("  Ctrl+O              Load a file"));
    lines.push(Line::raw("  Ctrl+S              Save (prompts for a path first time)"));
    lines.push(Line::raw("  Ctrl+Q              Exit immediately"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Search", section_style));
    lines.push(Line::raw("  Ctrl+F              Start search"));
    lines.push(Line::raw("  F3 / Ctrl+N         Next match"));
    lines.push(Line::raw("  Shift+F3 / Ctrl+P   Previous match"));
    lines.push(Line::raw("  Ctrl+R              Toggle regex matching"));
    lines.push(Line::raw("  Esc                 Clear search"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Move the cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Scroll"));
    lines.push(Line::raw("  Mouse click/wheel   Place cursor, scroll"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Menus", section_style));
    lines.push(Line::raw("  F10 / Alt+F         File menu"));
    lines.push(Line::raw("  Alt+S               Search menu"));
    lines.push(Line::raw("  F1                  This help"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
