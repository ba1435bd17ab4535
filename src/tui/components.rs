//! Reusable TUI components.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{ListItem, Paragraph},
    Frame,
};

use crate::model::JournalEntry;
use crate::util::preview;

use super::theme::Theme;

/// A status bar with left and right aligned content.
pub struct StatusBar<'a> {
    left: Vec<Span<'a>>,
    right: Vec<Span<'a>>,
    style: Style,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(style: Style) -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            style,
        }
    }

    /// Add left-aligned content.
    pub fn left(mut self, spans: Vec<Span<'a>>) -> Self {
        self.left = spans;
        self
    }

    /// Add right-aligned content.
    pub fn right(mut self, spans: Vec<Span<'a>>) -> Self {
        self.right = spans;
        self
    }

    /// Render the status bar.
    pub fn render(self, f: &mut Frame, area: Rect) {
        let used: usize = self
            .left
            .iter()
            .chain(self.right.iter())
            .map(|s| s.content.chars().count())
            .sum();
        let padding = (area.width as usize).saturating_sub(used).max(1);

        let mut spans = self.left;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.extend(self.right);

        f.render_widget(Paragraph::new(Line::from(spans)).style(self.style), area);
    }
}

/// Two-line list row: date, then a content teaser.
pub fn entry_list_item(
    entry: &JournalEntry,
    theme: &Theme,
    preview_chars: usize,
    highlighted: bool,
) -> ListItem<'static> {
    let item = ListItem::new(vec![
        Line::from(Span::styled(entry.date.clone(), theme.muted_style())),
        Line::from(preview(&entry.content, preview_chars)),
    ]);
    if highlighted {
        item.style(theme.selection_style())
    } else {
        item
    }
}

/// Lines of the read-only entry view.
pub fn entry_view_lines(entry: &JournalEntry, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(entry.date.clone(), theme.muted_style())),
        Line::from(""),
    ];
    if let Some(prompt) = &entry.prompt {
        lines.push(Line::from(Span::styled(prompt.clone(), theme.prompt_style())));
        lines.push(Line::from(""));
    }
    lines.extend(entry.content.lines().map(|l| Line::from(l.to_string())));
    lines
}

/// Rect of `percent_x` by `percent_y` centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
