//! Status bar widget: one line of kiosk session context.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Backend origin submissions are sent to.
    pub backend_origin: String,
    /// Submissions the backend confirmed this session.
    pub delivered: usize,
    /// Submissions that failed this session.
    pub failed: usize,
    /// Whether a submission is in flight.
    pub busy: bool,
}

/// Renders a one-line status bar.
///
/// Display format: `https://host  sent 3  failed 1  Submitting... / 送信中...`
/// The failure count turns red once non-zero; the busy marker only shows
/// while a submission is in flight.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let failed_style = if ctx.failed > 0 {
        Style::default().fg(Color::Red)
    } else {
        cyan
    };

    let mut spans = vec![
        Span::styled(ctx.backend_origin.clone(), cyan),
        Span::styled(format!("  sent {}", ctx.delivered), cyan),
        Span::styled(format!("  failed {}", ctx.failed), failed_style),
    ];
    if ctx.busy {
        spans.push(Span::styled(
            "  Submitting... / 送信中...",
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
