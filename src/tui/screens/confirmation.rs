//! Confirmation dialog shown over the form once a submission settles.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::content::ConfirmationContent;
use crate::model::Receipt;
use crate::tui::action::{Action, ScreenState};

const DIALOG_MAX_WIDTH: u16 = 90;
const DIALOG_MAX_HEIGHT: u16 = 32;

/// Centered rectangle the dialog occupies within `area`.
pub fn dialog_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(DIALOG_MAX_WIDTH);
    let height = area.height.saturating_sub(2).min(DIALOG_MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// The clickable close line: the last row inside the dialog border.
pub fn close_button_area(dialog: Rect) -> Rect {
    Rect {
        x: dialog.x.saturating_add(1),
        y: (dialog.y + dialog.height).saturating_sub(2),
        width: dialog.width.saturating_sub(2),
        height: 1,
    }
}

/// State for the confirmation dialog.
#[derive(Debug, Clone)]
pub struct ConfirmationState {
    receipt: Receipt,
    content: ConfirmationContent,
    report_failures: bool,
    scroll: u16,
}

impl ConfirmationState {
    pub fn new(receipt: Receipt, content: ConfirmationContent, report_failures: bool) -> Self {
        Self {
            receipt,
            content,
            report_failures,
            scroll: 0,
        }
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Whether the failure variant is shown instead of the thank-you message.
    pub fn shows_failure(&self) -> bool {
        self.report_failures && !self.receipt.delivered
    }

    pub fn title(&self) -> &'static str {
        if self.shows_failure() {
            ConfirmationContent::FAILURE_TITLE
        } else {
            ConfirmationContent::TITLE
        }
    }

    /// Dismisses on a left click on the close line or anywhere outside the dialog.
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> Action {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let position = Position::new(event.column, event.row);
                let dialog = dialog_area(area);
                if !dialog.contains(position) || close_button_area(dialog).contains(position) {
                    Action::Dismiss
                } else {
                    Action::None
                }
            }
            MouseEventKind::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = Vec::new();

        if !self.receipt.email.is_empty() {
            lines.push(Line::from(Span::styled(
                ConfirmationContent::EMAIL_HEADING,
                bold.fg(Color::Cyan),
            )));
            lines.push(Line::from(format!("To: {}", self.receipt.email)));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(self.receipt.full_name.as_str(), bold)));
        lines.push(Line::from(""));

        let failure = self.shows_failure();
        for language in &self.content.languages {
            let paragraphs = if failure {
                ConfirmationContent::failure(*language)
            } else {
                ConfirmationContent::thanks(*language)
            };
            for paragraph in paragraphs {
                lines.push(Line::from(*paragraph));
            }
            lines.push(Line::from(""));
        }

        if !failure {
            let signature = &self.content.signature;
            lines.push(Line::from(signature.closing.as_str()));
            lines.push(Line::from(Span::styled(signature.signer.as_str(), bold)));
            lines.push(Line::from(signature.title.as_str()));
            lines.push(Line::from(Span::styled(
                signature.contact.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }
}

impl ScreenState for ConfirmationState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => Action::Dismiss,
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            _ => Action::None,
        }
    }
}

/// Renders the dialog centered over whatever is already drawn in `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_confirmation(state: &ConfirmationState, frame: &mut Frame, area: Rect) {
    let dialog = dialog_area(area);
    let border = if state.shows_failure() {
        Color::Red
    } else {
        Color::Green
    };
    let block = Block::default()
        .title(format!(" {} ", state.title()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(dialog);
    frame.render_widget(Clear, dialog);
    frame.render_widget(block, dialog);

    let [content_area, _] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content = Paragraph::new(state.lines())
        .wrap(Wrap { trim: false })
        .scroll((state.scroll(), 0));
    frame.render_widget(content, content_area);

    let close = Paragraph::new(Span::styled(
        format!("[ {} ]", ConfirmationContent::CLOSE),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(close, close_button_area(dialog));
}
