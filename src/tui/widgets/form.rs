//! Reusable form widget: labelled, bordered rows with inline errors.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::PLEASE_SELECT;

/// The input inside a [`FormRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInput<'a> {
    /// Free text. `lines > 1` wraps; `counter` shows `used/max` in the title.
    Text {
        value: &'a str,
        placeholder: &'a str,
        lines: u16,
        counter: Option<(usize, usize)>,
    },
    /// One choice out of a list; `None` renders the "Please Select" prompt.
    Select { selected: Option<&'a str> },
    /// Several independent checkboxes with a cursor.
    Checklist {
        items: Vec<(&'a str, bool)>,
        cursor: usize,
    },
    /// A single checkbox with text beside it.
    Checkbox { text: &'a str, checked: bool },
    /// A push button.
    Button { label: &'a str, enabled: bool },
}

/// One row of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow<'a> {
    pub label: &'a str,
    pub required: bool,
    pub input: RowInput<'a>,
    pub error: Option<String>,
}

impl<'a> FormRow<'a> {
    pub fn new(label: &'a str, required: bool, input: RowInput<'a>) -> Self {
        Self {
            label,
            required,
            input,
            error: None,
        }
    }

    /// Attaches an inline error message.
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Rendered height including borders.
    pub fn height(&self) -> u16 {
        let inner = match &self.input {
            RowInput::Text { lines, .. } => (*lines).max(1),
            RowInput::Checklist { items, .. } => u16::try_from(items.len()).unwrap_or(u16::MAX),
            RowInput::Select { .. } | RowInput::Checkbox { .. } | RowInput::Button { .. } => 1,
        };
        inner.saturating_add(2)
    }
}

/// Picks the rows to show so that `focus` is visible, showing as much as
/// possible above it.
pub fn visible_rows(heights: &[u16], focus: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let focus = focus.min(heights.len() - 1);

    let mut start = focus;
    let mut used = heights[focus];
    while start > 0 && used.saturating_add(heights[start - 1]) <= available {
        start -= 1;
        used += heights[start];
    }

    let mut end = focus + 1;
    while end < heights.len() && used.saturating_add(heights[end]) <= available {
        used += heights[end];
        end += 1;
    }
    start..end
}

/// Renders `rows` within `area`, scrolled so that `focus` is visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(rows: &[FormRow<'_>], focus: usize, frame: &mut Frame, area: Rect) {
    let heights: Vec<u16> = rows.iter().map(FormRow::height).collect();
    let range = visible_rows(&heights, focus, area.height);
    let constraints: Vec<Constraint> = heights[range.clone()]
        .iter()
        .map(|h| Constraint::Length(*h))
        .collect();
    let areas = Layout::vertical(constraints).split(area);

    for (slot, i) in range.enumerate() {
        draw_row(&rows[i], i == focus, frame, areas[slot]);
    }
}

#[mutants::skip]
fn draw_row(row: &FormRow<'_>, focused: bool, frame: &mut Frame, area: Rect) {
    let border_color = if row.error.is_some() {
        Color::Red
    } else if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let label = if row.required {
        format!("{} *", row.label)
    } else {
        row.label.to_string()
    };

    let mut block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let RowInput::Text {
        counter: Some((used, max)),
        ..
    } = row.input
    {
        block = block.title_top(Line::from(format!("{used}/{max}")).right_aligned());
    }

    let inner = block.inner(area);
    let dim = Style::default().fg(Color::DarkGray);
    let cursor = Span::styled("\u{2588}", Style::default().add_modifier(Modifier::SLOW_BLINK));

    let paragraph = match &row.input {
        RowInput::Text {
            value,
            placeholder,
            lines,
            ..
        } => {
            let mut spans = Vec::new();
            if value.is_empty() && !focused {
                spans.push(Span::styled(*placeholder, dim));
            } else {
                spans.push(Span::raw(*value));
            }
            if focused {
                spans.push(cursor);
            }
            let line = Line::from(spans);
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            if *lines > 1 {
                let needed = width.div_ceil(inner.width.max(1));
                let scroll = needed.saturating_sub(*lines);
                Paragraph::new(line)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0))
            } else {
                let scroll = width.saturating_sub(inner.width);
                Paragraph::new(line).scroll((0, scroll))
            }
        }
        RowInput::Select { selected } => {
            let text = match selected {
                Some(label) => Span::raw(*label),
                None => Span::styled(PLEASE_SELECT, dim),
            };
            let line = if focused {
                Line::from(vec![Span::raw("◀ "), text, Span::raw(" ▶")])
            } else {
                Line::from(text)
            };
            Paragraph::new(line)
        }
        RowInput::Checklist { items, cursor } => {
            let lines: Vec<Line> = items
                .iter()
                .enumerate()
                .map(|(i, (text, checked))| {
                    let mark = if *checked { "[x] " } else { "[ ] " };
                    let style = if focused && i == *cursor {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!("{mark}{text}"), style))
                })
                .collect();
            Paragraph::new(lines)
        }
        RowInput::Checkbox { text, checked } => {
            let mark = if *checked { "[x] " } else { "[ ] " };
            Paragraph::new(Line::from(format!("{mark}{text}")))
        }
        RowInput::Button { label, enabled } => {
            let style = match (*enabled, focused) {
                (false, _) => dim,
                (true, true) => Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            };
            Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
                .alignment(Alignment::Center)
        }
    };

    frame.render_widget(paragraph.block(block), area);

    // Error overlaps the bottom border of the row
    if let Some(ref err) = row.error {
        let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        let err_area = Rect {
            x: area.x + 2,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(error_line, err_area);
    }
}
