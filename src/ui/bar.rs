//! The combined menu/toolbar bar on the top row.
//!
//! One layout function drives both rendering and mouse hit-testing so the
//! two can never disagree about where a button lives.

use unicode_width::UnicodeWidthStr;

use crate::app::MenuId;

/// A clickable region of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarItem {
    MenuFile,
    MenuSearch,
    Open,
    Save,
    Find,
    Prev,
    Next,
    Regex,
}

/// The bar's segments in display order. `None` segments are spacing.
pub(super) fn bar_segments(use_regex: bool) -> Vec<(Option<BarItem>, String)> {
    vec![
        (None, " ".to_string()),
        (Some(BarItem::MenuFile), "File".to_string()),
        (None, "  ".to_string()),
        (Some(BarItem::MenuSearch), "Search".to_string()),
        (None, "  │  ".to_string()),
        (Some(BarItem::Open), "[Open]".to_string()),
        (None, " ".to_string()),
        (Some(BarItem::Save), "[Save]".to_string()),
        (None, "  ".to_string()),
        (Some(BarItem::Find), "[Find]".to_string()),
        (None, " ".to_string()),
        (Some(BarItem::Prev), "[Prev]".to_string()),
        (None, " ".to_string()),
        (Some(BarItem::Next), "[Next]".to_string()),
        (None, "  ".to_string()),
        (
            Some(BarItem::Regex),
            format!("[Regex {}]", if use_regex { "on " } else { "off" }),
        ),
    ]
}

/// The bar item under display column `col`, if any.
pub fn bar_hit(col: u16, use_regex: bool) -> Option<BarItem> {
    let col = col as usize;
    let mut x = 0;
    for (item, text) in bar_segments(use_regex) {
        let width = text.width();
        if col >= x && col < x + width {
            return item;
        }
        x += width;
    }
    None
}

/// Display column where a menu's bar label starts; anchors its dropdown.
pub fn menu_anchor_x(menu: MenuId, use_regex: bool) -> u16 {
    let target = match menu {
        MenuId::File => BarItem::MenuFile,
        MenuId::Search => BarItem::MenuSearch,
    };
    let mut x = 0usize;
    for (item, text) in bar_segments(use_regex) {
        if item == Some(target) {
            break;
        }
        x += text.width();
    }
    u16::try_from(x).unwrap_or(u16::MAX)
}

/// Dropdown item labels, with shortcut hints.
pub fn menu_items(menu: MenuId, use_regex: bool) -> Vec<String> {
    match menu {
        MenuId::File => vec![
            "Load…            Ctrl+O".to_string(),
            "Save             Ctrl+S".to_string(),
            "Exit             Ctrl+Q".to_string(),
        ],
        MenuId::Search => vec![
            "Start Search     Ctrl+F".to_string(),
            "Previous Match   Shift+F3".to_string(),
            "Next Match       F3".to_string(),
            format!(
                "Use Regex    [{}]  Ctrl+R",
                if use_regex { "x" } else { " " }
            ),
        ],
    }
}

/// Number of items in a menu.
pub fn menu_len(menu: MenuId) -> usize {
    match menu {
        MenuId::File => 3,
        MenuId::Search => 4,
    }
}
