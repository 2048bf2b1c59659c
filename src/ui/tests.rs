use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::app::{MenuId, MenuState, Message, Model, ToastLevel, update};

use super::*;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn model_with_text(text: &str) -> Model {
    let mut model = Model::new((80, 24));
    model.buffer.set_text(text);
    model.sync_viewport();
    model
}

fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_render_shows_buffer_text_and_bar_labels() {
    let model = model_with_text("hello editor");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("hello editor"));
    assert!(content.contains("File"));
    assert!(content.contains("Search"));
    assert!(content.contains("[Open]"));
    assert!(content.contains("[Regex off]"));
}

#[test]
fn test_render_status_bar_shows_filename_and_position() {
    let mut model = model_with_text("abc");
    model.file_path = Some(std::path::PathBuf::from("/tmp/notes.txt"));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("notes.txt"));
    assert!(content.contains("Ln 1, Col 1"));
}

#[test]
fn test_render_search_prompt_shows_query_and_mode() {
    let model = model_with_text("abc");
    let model = update(model, Message::StartSearch);
    let model = update(model, Message::SearchInput("needle".to_string()));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("Find: needle"));
    assert!(content.contains("[literal]"));
}

#[test]
fn test_render_open_menu_lists_items() {
    let model = model_with_text("abc");
    let model = update(model, Message::OpenMenu(MenuId::Search));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("Start Search"));
    assert!(content.contains("Previous Match"));
    assert!(content.contains("Use Regex"));
}

#[test]
fn test_render_toast_bar_shows_message() {
    let mut model = model_with_text("abc");
    model.show_toast(ToastLevel::Error, "Load failed: boom");
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("[error] Load failed: boom"));
}

#[test]
fn test_render_help_overlay() {
    let model = model_with_text("abc");
    let model = update(model, Message::ToggleHelp);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let content = buffer_content(&terminal);
    assert!(content.contains("Help"));
    assert!(content.contains("Toggle regex matching"));
}

#[test]
fn test_render_does_not_crash_on_tiny_terminal() {
    let model = model_with_text("hello\nworld");
    let backend = TestBackend::new(3, 2);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

// --- Bar layout / hit-testing ---

#[test]
fn test_bar_hit_matches_rendered_labels() {
    // "File" occupies columns 1-4
    assert_eq!(bar_hit(1, false), Some(BarItem::MenuFile));
    assert_eq!(bar_hit(4, false), Some(BarItem::MenuFile));
    // Spacing around items is dead space
    assert_eq!(bar_hit(0, false), None);
    assert_eq!(bar_hit(5, false), None);
}

#[test]
fn test_bar_hit_finds_every_item_somewhere() {
    let mut found = Vec::new();
    for col in 0..80 {
        if let Some(item) = bar_hit(col, true) {
            if found.last() != Some(&item) {
                found.push(item);
            }
        }
    }
    assert_eq!(
        found,
        vec![
            BarItem::MenuFile,
            BarItem::MenuSearch,
            BarItem::Open,
            BarItem::Save,
            BarItem::Find,
            BarItem::Prev,
            BarItem::Next,
            BarItem::Regex,
        ]
    );
}

#[test]
fn test_menu_dropdown_sits_under_its_label() {
    let area = Rect::new(0, 0, 80, 24);
    let state = MenuState {
        menu: MenuId::File,
        selected: 0,
    };
    let rect = menu_dropdown_rect(state, false, area);
    assert_eq!(rect.y, 1);
    assert_eq!(rect.x, 1);
    // 3 items + borders
    assert_eq!(rect.height, 5);
}

#[test]
fn test_menu_item_at_maps_rows_to_indices() {
    let area = Rect::new(0, 0, 80, 24);
    let state = MenuState {
        menu: MenuId::File,
        selected: 0,
    };
    let rect = menu_dropdown_rect(state, false, area);
    // First item row is just below the top border
    assert_eq!(menu_item_at(state, false, area, rect.x + 1, rect.y + 1), Some(0));
    assert_eq!(menu_item_at(state, false, area, rect.x + 1, rect.y + 3), Some(2));
    // The border rows and outside clicks miss
    assert_eq!(menu_item_at(state, false, area, rect.x + 1, rect.y), None);
    assert_eq!(menu_item_at(state, false, area, 79, 23), None);
}

#[test]
fn test_text_area_rect_shrinks_for_prompt_and_toast() {
    let area = Rect::new(0, 0, 80, 24);
    let model = model_with_text("abc");
    assert_eq!(text_area_rect(&model, area).height, 22);

    let model = update(model, Message::StartSearch);
    assert_eq!(text_area_rect(&model, area).height, 21);

    let mut model = model;
    model.show_toast(ToastLevel::Info, "hi");
    assert_eq!(text_area_rect(&model, area).height, 20);
}

#[test]
fn test_gutter_width_tracks_line_count() {
    assert_eq!(gutter_width(5), 2);
    assert_eq!(gutter_width(150), 4);
}
