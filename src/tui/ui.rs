//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! This module handles rendering the user interface including:
//! - Header with the scanned directory and active selectors
//! - Group list (groups that lost a file are drawn in the danger color)
//! - Member panel with human-readable sizes and paths
//! - Footer with the status line or available commands
//! - Confirmation dialog for deletions

use bytesize::ByteSize;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode};
use super::theme::Theme;

fn create_block_with_title<'a>(title: impl Into<Line<'a>>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .title(title)
}

/// Style for the highlighted row of a list.
fn highlight_style(theme: &Theme) -> Style {
    if *theme == Theme::monochrome() {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.inverted_fg)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    }
}

/// Render the TUI based on current application state.
///
/// # Arguments
///
/// * `frame` - The ratatui frame to render to
/// * `app` - The application state to render
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.mode() == AppMode::Confirming {
        render_confirm_dialog(frame, app, area);
    }
}

/// Render the header with directory, selectors and group count.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let registry = app.registry();
    let (by_name, by_size) = app.selectors();
    let check = |on: bool| if on { "[x]" } else { "[ ]" };

    let directory = registry
        .source_directory()
        .map(|d| d.to_string_lossy().into_owned())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled(
            "dupereview ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            truncate_path(&directory, area.width.saturating_sub(60) as usize),
            Style::default().fg(theme.normal),
        ),
        Span::styled(
            format!(
                "  {} name {} size  ",
                check(by_name),
                check(by_size)
            ),
            Style::default().fg(theme.secondary),
        ),
        Span::styled(
            format!(
                "{} groups, {} deleted",
                registry.group_count(),
                registry.deleted_paths().len()
            ),
            Style::default().fg(theme.dim),
        ),
    ]);

    let header = Paragraph::new(line)
        .block(create_block_with_title("").border_style(Style::default().fg(theme.primary)));
    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    if app.registry().is_empty() {
        let message = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from("No duplicates found."),
            Line::from(""),
            Line::from("Press r to rescan, n/s to change the comparison, q to quit."),
        ]))
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.theme().dim))
        .block(create_block_with_title("Duplicate Groups"));
        frame.render_widget(message, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_groups_list(frame, app, chunks[0]);
    render_members_list(frame, app, chunks[1]);
}

fn render_groups_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let registry = app.registry();

    let items: Vec<ListItem> = registry
        .groups()
        .iter()
        .map(|(key, group)| {
            let style = if registry.group_has_deletion(group) {
                Style::default().fg(theme.danger)
            } else {
                Style::default().fg(theme.normal)
            };
            ListItem::new(format!("{} [{}]", key, group.len())).style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(registry.cursor());

    let title = format!(
        "Duplicate Groups ({}/{})",
        registry.cursor().map_or(0, |c| c + 1),
        registry.group_count()
    );

    let list = List::new(items)
        .block(create_block_with_title(title).border_style(Style::default().fg(theme.primary)))
        .highlight_style(highlight_style(theme))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_members_list(frame: &mut Frame, app: &App, area: Rect) {
    let Some((key, group)) = app.current_group() else {
        return;
    };
    let theme = app.theme();
    let max_path_len = area.width.saturating_sub(18) as usize;

    let items: Vec<ListItem> = group
        .members()
        .iter()
        .map(|member| {
            let path = member.path.to_string_lossy();
            ListItem::new(format!(
                "{:>10}  {}",
                format_size(member.size),
                truncate_path(&path, max_path_len)
            ))
            .style(Style::default().fg(theme.normal))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.member_index()));

    let title = format!(
        "{} ({}/{}) - {} total",
        truncate_string(key.as_str(), area.width.saturating_sub(30) as usize),
        app.member_index() + 1,
        group.len(),
        format_size(group.total_size())
    );

    let list = List::new(items)
        .block(create_block_with_title(title).border_style(Style::default().fg(theme.secondary)))
        .highlight_style(highlight_style(theme))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    let line = match app.status() {
        Some(status) => {
            let color = if status.starts_with("Failed") || status.starts_with("Rescan failed") {
                theme.danger
            } else {
                theme.success
            };
            Line::from(Span::styled(status.to_string(), Style::default().fg(color)))
        }
        None => {
            let spans: Vec<Span> = footer_commands(app.mode())
                .iter()
                .flat_map(|(key, desc)| {
                    vec![
                        Span::styled(
                            format!("[{}]", key),
                            Style::default()
                                .fg(theme.secondary)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("{} ", desc), Style::default().fg(theme.normal)),
                    ]
                })
                .collect();
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(theme.dim)),
        );
    frame.render_widget(footer, area);
}

fn footer_commands(mode: AppMode) -> &'static [(&'static str, &'static str)] {
    match mode {
        AppMode::Confirming => &[("y", "Confirm"), ("n", "Cancel")],
        _ => &[
            ("j/k", "File"),
            ("J/K", "Group"),
            ("d", "Delete"),
            ("r", "Rescan"),
            ("n", "Name"),
            ("s", "Size"),
            ("q", "Quit"),
        ],
    }
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(member) = app.current_member() else {
        return;
    };
    let theme = app.theme();

    let dialog_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, dialog_area);

    let destination = if app.is_permanent() {
        "This file will be permanently deleted."
    } else {
        "This file will be moved to the system trash."
    };

    let path = member.path.to_string_lossy();
    let lines = vec![
        Line::from(Span::styled(
            "Confirm Deletion",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(truncate_path(
            &path,
            dialog_area.width.saturating_sub(4) as usize,
        )),
        Line::from(format_size(member.size)),
        Line::from(""),
        Line::from(Span::styled(destination, Style::default().fg(theme.secondary))),
        Line::from(""),
        Line::from(Span::styled(
            "[y/Enter] Confirm    [n/Esc] Cancel",
            Style::default().fg(theme.primary),
        )),
    ];

    let confirm = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(create_block_with_title("Confirm").border_style(Style::default().fg(theme.danger)));

    frame.render_widget(confirm, dialog_area);
}

/// Format a byte count as a human-readable size.
///
/// Uses IEC binary units (KiB, MiB, GiB) via the bytesize crate.
///
/// ```
/// use dupereview::tui::ui::format_size;
///
/// assert_eq!(format_size(1024), "1.0 KiB");
/// assert!(format_size(1024 * 1024).contains("MiB"));
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Truncate a string with ellipsis if it exceeds `max_len` characters.
///
/// ```
/// use dupereview::tui::ui::truncate_string;
///
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 8), "hello...");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Truncate a path with ellipsis, keeping the file name visible.
///
/// ```
/// use dupereview::tui::ui::truncate_path;
///
/// let long = "/very/long/path/to/some/deeply/nested/file.txt";
/// let truncated = truncate_path(long, 30);
/// assert!(truncated.ends_with("file.txt"));
/// assert!(truncated.contains("..."));
/// ```
#[must_use]
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    if max_len <= 6 {
        return truncate_string(path, max_len);
    }

    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        return truncate_string(path, max_len);
    }

    let head: String = path.chars().take(max_len - name_len - 4).collect();
    format!("{}.../{}", head, file_name)
}

/// Create a centered rectangle with given percentage of parent.
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

    #[test]
    fn test_truncate_string_unicode() {
        assert_eq!(truncate_string("ééééé", 5), "ééééé");
        assert_eq!(truncate_string("éééééé", 5), "éé...");
        assert_eq!(truncate_string("abcdef", 2), "..");
    }

    #[test]
    fn test_truncate_path_keeps_file_name() {
        let truncated = truncate_path("/a/b/c/d/e/f/g/report.pdf", 20);
        assert!(truncated.ends_with(".../report.pdf"));
        assert!(truncated.chars().count() <= 20);
    }

    #[test]
    fn test_truncate_path_short_unchanged() {
        assert_eq!(truncate_path("/x/y.txt", 50), "/x/y.txt");
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 20);
    }

    #[test]
    fn test_footer_commands_by_mode() {
        assert_eq!(footer_commands(AppMode::Confirming).len(), 2);
        assert!(footer_commands(AppMode::Reviewing)
            .iter()
            .any(|(k, _)| *k == "r"));
    }
}
