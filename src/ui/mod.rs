use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use strum::IntoEnumIterator;
use time::{macros::format_description, OffsetDateTime};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::state::{ItemView, OverlayState, TrackerState};
use crate::catalog::{Category, FilterMode};
use crate::config::Palette;
use crate::progress::RESET_PROMPT;
use crate::status::SyncStatus;

const TITLE: &str = "⚡ Data Science Tracker";
const TAGLINE: &str = "Master every concept with precision";
const FOOTER: &str = "🎯 Keep grinding! Your consistency will pay off.";

pub fn draw_app(frame: &mut Frame, state: &TrackerState, list_state: &mut ListState, palette: &Palette) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_header(frame, state, palette, vertical[0]);
    draw_stats(frame, state, palette, vertical[1]);
    draw_progress_bar(frame, state, palette, vertical[2]);
    frame.render_widget(Paragraph::new(filter_line(state.filter(), palette)), vertical[3]);
    draw_sections(frame, state, list_state, palette, vertical[4]);
    frame.render_widget(
        Paragraph::new(footer_text(state, palette)).alignment(Alignment::Center),
        vertical[5],
    );

    render_overlay(frame, state, palette);
}

fn draw_header(frame: &mut Frame, state: &TrackerState, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let badge = status_badge(state.sync_status());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(badge.width() as u16 + 1),
        ])
        .split(inner);

    let title = Text::from(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(palette.muted))),
    ]);
    frame.render_widget(Paragraph::new(title), columns[0]);

    let badge_bg = if state.sync_status().is_synced() {
        palette.synced_badge
    } else {
        palette.ready_badge
    };
    let badge_widget = Paragraph::new(Line::from(Span::styled(
        badge,
        Style::default()
            .bg(badge_bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(badge_widget, columns[1]);
}

fn status_badge(status: &SyncStatus) -> String {
    match status {
        SyncStatus::Ready => format!(" {} ", status.label()),
        SyncStatus::Synced { at } => format!(" {} {} ", status.label(), format_time_short(*at)),
    }
}

fn format_time_short(dt: OffsetDateTime) -> String {
    dt.format(&format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| dt.unix_timestamp().to_string())
}

fn draw_stats(frame: &mut Frame, state: &TrackerState, palette: &Palette, area: Rect) {
    let summary = state.summary();
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let values = [
        ("TOTAL", summary.total.to_string()),
        ("COMPLETED", summary.done.to_string()),
        ("PROGRESS", format!("{}%", summary.percent)),
    ];
    for ((label, value), tile) in values.into_iter().zip(tiles.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(
                label,
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                value,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
        ]);
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, *tile);
    }
}

fn draw_progress_bar(frame: &mut Frame, state: &TrackerState, palette: &Palette, area: Rect) {
    let summary = state.summary();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(palette.gauge).bg(Color::Reset))
        .percent(u16::from(summary.percent))
        .label(progress_label(summary.done, summary.total));
    frame.render_widget(gauge, area);
}

fn progress_label(done: usize, total: usize) -> String {
    format!("{done} of {total} questions completed")
}

fn filter_line(current: FilterMode, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Filter (f): ",
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD),
    )];
    for mode in FilterMode::iter() {
        let style = if mode == current {
            Style::default()
                .fg(Color::Black)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn draw_sections(
    frame: &mut Frame,
    state: &TrackerState,
    list_state: &mut ListState,
    palette: &Palette,
    area: Rect,
) {
    let body = |category: Category| {
        if state.expanded() == Some(category) {
            Constraint::Min(1)
        } else {
            Constraint::Length(0)
        }
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            body(Category::Common),
            Constraint::Length(1),
            body(Category::Unique),
        ])
        .split(area);

    for (category, header_area, body_area) in [
        (Category::Common, parts[0], parts[1]),
        (Category::Unique, parts[2], parts[3]),
    ] {
        frame.render_widget(
            Paragraph::new(section_header(state, category, palette)),
            header_area,
        );
        if state.expanded() != Some(category) {
            continue;
        }

        let accent = section_color(category, palette);
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(accent));
        let rows = state.visible_items(category);
        if rows.is_empty() {
            let empty = Paragraph::new(Span::styled(
                empty_message(state.filter()),
                Style::default()
                    .fg(palette.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
            .block(block);
            frame.render_widget(empty, body_area);
            continue;
        }

        let width = body_area.width.saturating_sub(3) as usize;
        let items: Vec<ListItem> = rows
            .iter()
            .map(|item| ListItem::new(item_line(item, category, width, palette)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.accent)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(list, body_area, list_state);
    }
}

fn section_color(category: Category, palette: &Palette) -> Color {
    match category {
        Category::Common => palette.common,
        Category::Unique => palette.unique,
    }
}

fn section_header(state: &TrackerState, category: Category, palette: &Palette) -> Line<'static> {
    let counts = state.section_counts(category);
    let chevron = if state.expanded() == Some(category) {
        "▾"
    } else {
        "▸"
    };
    let key = match category {
        Category::Common => "1",
        Category::Unique => "2",
    };
    Line::from(vec![
        Span::styled(
            format!("{chevron} {} ", category.icon()),
            Style::default().fg(section_color(category, palette)),
        ),
        Span::styled(
            category.title(),
            Style::default()
                .fg(section_color(category, palette))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/{} completed", counts.done, counts.total),
            Style::default().fg(palette.muted),
        ),
        Span::styled(format!("  [{key}]"), Style::default().fg(Color::DarkGray)),
    ])
}

fn empty_message(filter: FilterMode) -> &'static str {
    match filter {
        FilterMode::All => "No questions in this section.",
        FilterMode::Pending => "Nothing pending here. Nice work!",
        FilterMode::Done => "Nothing completed here yet.",
    }
}

fn item_line(item: &ItemView<'_>, category: Category, width: usize, palette: &Palette) -> Line<'static> {
    let checkbox = if item.completed { "[✓] " } else { "[ ] " };
    let badge = format!(" [{}]", category.badge());
    let sparkle = if item.completed { " ✨" } else { "" };
    let reserved = UnicodeWidthStr::width(checkbox)
        + UnicodeWidthStr::width(badge.as_str())
        + UnicodeWidthStr::width(sparkle)
        + 2;
    let text = truncate_to_width(item.text, width.saturating_sub(reserved));

    let (checkbox_style, text_style) = if item.completed {
        (
            Style::default()
                .fg(palette.done)
                .add_modifier(Modifier::BOLD),
            Style::default()
                .fg(palette.done)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            Style::default().fg(palette.muted),
            Style::default().fg(palette.text),
        )
    };

    let mut spans = vec![
        Span::styled(checkbox, checkbox_style),
        Span::styled(text, text_style),
        Span::styled(
            badge,
            Style::default()
                .fg(section_color(category, palette))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if item.completed {
        spans.push(Span::raw(sparkle));
    }
    Line::from(spans)
}

/// Cuts `text` on a grapheme boundary so it fits in `max` columns,
/// appending an ellipsis when anything was dropped.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w + 1 > max {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('…');
    out
}

fn footer_text(state: &TrackerState, palette: &Palette) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(
        FOOTER,
        Style::default().fg(palette.accent),
    ))];

    let mut keys = vec![Span::styled(
        "j/k move • Space toggle • f filter • 1/2/Tab sections • R reset • q quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(message) = &state.status_message {
        keys.push(Span::raw(" | "));
        keys.push(Span::styled(
            message.clone(),
            Style::default().fg(palette.accent),
        ));
    }
    lines.push(Line::from(keys));
    Text::from(lines)
}

fn render_overlay(frame: &mut Frame, state: &TrackerState, palette: &Palette) {
    match state.overlay() {
        Some(OverlayState::ConfirmReset) => {
            let area = centered_rect(60, 30, frame.size());
            frame.render_widget(Clear, area);
            let paragraph = Paragraph::new(vec![
                Line::from(Span::styled(
                    "🔄 Reset progress",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(RESET_PROMPT),
                Line::from(format!(
                    "{} completed question(s) will be cleared.",
                    state.summary().done
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "y / Enter to reset • n / Esc to cancel",
                    Style::default().fg(palette.muted),
                )),
            ])
            .block(
                Block::default()
                    .title("Confirm")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        None => {}
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::{AppConfig, ThemeName};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(state: &TrackerState) -> anyhow::Result<String> {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend)?;
        let palette = Palette::for_theme(ThemeName::Dark);
        let mut list_state = ListState::default();
        list_state.select(Some(state.selected()));
        terminal.draw(|frame| draw_app(frame, state, &mut list_state, &palette))?;
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn state() -> TrackerState {
        TrackerState::new(Catalog::builtin(), &AppConfig::default())
    }

    #[test]
    fn renders_stats_and_expanded_section() -> anyhow::Result<()> {
        let mut state = state();
        state.toggle("c0".parse()?);
        let screen = render(&state)?;
        assert!(screen.contains("TOTAL"));
        assert!(screen.contains("COMPLETED"));
        assert!(screen.contains("2%"));
        assert!(screen.contains("1 of 63 questions completed"));
        assert!(screen.contains("1/35 completed"));
        assert!(screen.contains("0/28 completed"));
        assert!(screen.contains("Explain Python List Methods"));
        assert!(!screen.contains("Python vs IPython"));
        Ok(())
    }

    #[test]
    fn collapsed_sections_hide_items() -> anyhow::Result<()> {
        let mut state = state();
        state.toggle_section(Category::Common);
        let screen = render(&state)?;
        assert!(screen.contains("Common Questions"));
        assert!(screen.contains("Unique Questions"));
        assert!(!screen.contains("Explain Python List Methods"));
        Ok(())
    }

    #[test]
    fn reset_overlay_is_drawn() -> anyhow::Result<()> {
        let mut state = state();
        state.request_reset();
        let screen = render(&state)?;
        assert!(screen.contains("Confirm"));
        assert!(screen.contains("y / Enter to reset"));
        Ok(())
    }

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("abc", 0), "");
        let cut = truncate_to_width("日本語のテキスト", 7);
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn badge_shows_sync_time() {
        let status = SyncStatus::Synced {
            at: time::macros::datetime!(2024-05-01 09:05:07 UTC),
        };
        assert_eq!(status_badge(&status), " ✅ Synced 09:05:07 ");
        assert_eq!(status_badge(&SyncStatus::Ready), " 💾 Ready ");
    }

    #[test]
    fn progress_label_counts() {
        assert_eq!(progress_label(3, 63), "3 of 63 questions completed");
    }
}
