use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, PathAction, ScanPhase};

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let query = model.search_input.as_deref().unwrap_or_default();
    let mode = if model.use_regex { "regex" } else { "literal" };
    let text = format!("Find: {query}█  [{mode}]  Enter: search  Tab: toggle regex  Esc: cancel");
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_path_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(prompt) = &model.path_prompt else {
        return;
    };
    let verb = match prompt.action {
        PathAction::Load => "Load",
        PathAction::Save => "Save",
    };
    let text = format!(
        "{verb} path: {}█  Enter: confirm  Esc: cancel",
        prompt.input
    );
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model.file_path.as_ref().map_or_else(
        || "untitled".to_string(),
        |path| {
            path.file_name()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().to_string())
        },
    );

    let dirty_indicator = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };
    let disk_indicator = if model.disk_changed {
        " [disk changed]"
    } else {
        ""
    };

    let cursor = model.buffer.cursor();
    let percent = model.viewport.scroll_percent();
    let cursor_info = format!("[{percent}%]  Ln {}, Col {}", cursor.line + 1, cursor.col + 1);

    let search_info = if matches!(model.search.phase, ScanPhase::Searching(_)) {
        "  [searching…]".to_string()
    } else if let Some((current, total)) = model.current_search_match() {
        format!("  [{current}/{total}]")
    } else if matches!(model.search.phase, ScanPhase::Ready) {
        format!("  [{} matches]", model.search.matches.len())
    } else {
        String::new()
    };

    let regex_indicator = if model.use_regex { "  [regex]" } else { "" };

    let status = format!(
        " {filename}{dirty_indicator}{disk_indicator}  {cursor_info}{search_info}{regex_indicator}  F1:help"
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
