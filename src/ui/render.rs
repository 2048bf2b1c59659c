use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;

use super::{bar, overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    render_bar(model, frame, Rect { height: 1, ..area });
    render_text_area(model, frame, text_area_rect(model, area));

    let prompt_active = model.search_input.is_some() || model.path_prompt.is_some();
    let toast_active = model.active_toast().is_some();
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let prompt_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(toast_active) + u16::from(prompt_active)),
        height: 1,
        ..area
    };

    if model.search_input.is_some() {
        status::render_search_bar(model, frame, prompt_area);
    } else if model.path_prompt.is_some() {
        status::render_path_bar(model, frame, prompt_area);
    }
    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    } else if model.menu.is_some() {
        overlays::render_menu_dropdown(model, frame, area);
    }
}

/// The rectangle holding buffer text, between the bar and the footer rows.
pub fn text_area_rect(model: &Model, area: Rect) -> Rect {
    let prompt_active = model.search_input.is_some() || model.path_prompt.is_some();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(prompt_active) + u16::from(toast_active);
    Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1 + footer_rows),
    }
}

fn render_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let base = Style::default().bg(Color::DarkGray).fg(Color::White);
    let open_menu = model.menu.map(|state| state.menu);

    let spans: Vec<Span> = bar::bar_segments(model.use_regex)
        .into_iter()
        .map(|(item, text)| {
            let style = match item {
                Some(bar::BarItem::MenuFile)
                    if open_menu == Some(crate::app::MenuId::File) =>
                {
                    base.reversed()
                }
                Some(bar::BarItem::MenuSearch)
                    if open_menu == Some(crate::app::MenuId::Search) =>
                {
                    base.reversed()
                }
                Some(bar::BarItem::Regex) if model.use_regex => {
                    base.fg(Color::Yellow).add_modifier(Modifier::BOLD)
                }
                Some(_) => base.add_modifier(Modifier::BOLD),
                None => base,
            };
            Span::styled(text, style)
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn render_text_area(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.buffer.line_count();
    let number_width = line_number_width(total_lines) as usize;
    let cursor = model.buffer.cursor();

    let match_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let selection_style = Style::default().bg(Color::Yellow).fg(Color::Black);
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

    let start = model.viewport.offset();
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = model.buffer.line_at(line_idx).unwrap_or_default();
        let line_range = model.buffer.line_byte_range(line_idx);
        let line_num = format!("{:>number_width$} ", line_idx + 1);

        // One padding cell so the cursor is visible at end-of-line.
        let padded = if line_idx == cursor.line {
            format!("{line_text} ")
        } else {
            line_text
        };

        let mut segments: Vec<(Range<usize>, Style)> = vec![(0..padded.len(), Style::default())];
        for &offset in model.search.matches.offsets() {
            let span = offset..offset + model.search.matches.match_len();
            if let Some(rel) = intersect_line(&span, &line_range) {
                segments = overlay(segments, align_to_boundaries(&padded, rel), match_style);
            }
        }
        if let Some(selection) = model.buffer.selection() {
            if let Some(rel) = intersect_line(selection, &line_range) {
                segments = overlay(segments, align_to_boundaries(&padded, rel), selection_style);
            }
        }
        if line_idx == cursor.line {
            let col = align_to_boundaries(&padded, cursor.col..cursor.col).start;
            let ch_len = padded[col..].chars().next().map_or(1, char::len_utf8);
            segments = overlay(segments, col..col + ch_len, cursor_style);
        }

        let mut spans = vec![Span::styled(
            line_num,
            Style::default().fg(Color::DarkGray),
        )];
        for (range, style) in segments {
            if range.start < range.end {
                spans.push(Span::styled(padded[range].to_string(), style));
            }
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Intersect a global byte span with a line's byte range, yielding the
/// overlap relative to the line start.
fn intersect_line(span: &Range<usize>, line: &Range<usize>) -> Option<Range<usize>> {
    let start = span.start.max(line.start);
    let end = span.end.min(line.end);
    (start < end).then(|| start - line.start..end - line.start)
}

/// Clamp a highlight range onto character boundaries. Offsets may be stale
/// after edits (matches are only recomputed by a new search), so they are
/// never trusted to land on boundaries of the current text.
fn align_to_boundaries(text: &str, range: Range<usize>) -> Range<usize> {
    let mut start = range.start.min(text.len());
    while start > 0 && !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = range.end.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    start..end.max(start)
}

/// Split `segments` so `range` is styled with `style`, leaving the rest
/// untouched.
fn overlay(
    segments: Vec<(Range<usize>, Style)>,
    range: Range<usize>,
    style: Style,
) -> Vec<(Range<usize>, Style)> {
    if range.start >= range.end {
        return segments;
    }
    let mut out = Vec::new();
    for (seg, seg_style) in segments {
        if seg.end <= range.start || seg.start >= range.end {
            out.push((seg, seg_style));
            continue;
        }
        if seg.start < range.start {
            out.push((seg.start..range.start, seg_style));
        }
        out.push((seg.start.max(range.start)..seg.end.min(range.end), style));
        if seg.end > range.end {
            out.push((range.end..seg.end, seg_style));
        }
    }
    out
}

/// Width of the gutter: line numbers plus one space.
pub fn gutter_width(total_lines: usize) -> u16 {
    line_number_width(total_lines) + 1
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
