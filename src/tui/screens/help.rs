//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static REGISTRATION_KEYS: &[(&str, &str)] = &[
    ("Tab / ↓", "next field"),
    ("Shift-Tab / ↑", "previous field"),
    ("←/→", "change selection; move between interests"),
    ("Space", "next option; tick interest or consent"),
    ("Backspace", "delete last character"),
    ("Enter", "submit / 送信"),
    ("F2", "show or hide the privacy policy"),
    ("PgUp / PgDn", "scroll the privacy policy"),
];

static CONFIRMATION_KEYS: &[(&str, &str)] = &[
    ("Enter / Space / Esc", "close and start a new registration"),
    ("Mouse click", "close button or outside the dialog"),
    ("↑/↓", "scroll"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

static GLOBAL_KEYS: &[(&str, &str)] = &[("F1", "help"), ("Ctrl-C", "quit the kiosk")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top, returning to [`Screen::Registration`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Registration,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::Registration => "Registration",
        Screen::Confirmation => "Confirmation",
        Screen::Help => "Help",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<22}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let mut lines = match origin {
        Screen::Registration => build_section("Registration", REGISTRATION_KEYS),
        Screen::Confirmation => build_section("Confirmation", CONFIRMATION_KEYS),
        Screen::Help => build_section("Help", HELP_KEYS),
    };
    lines.extend(build_section("Everywhere", GLOBAL_KEYS));
    lines
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Help – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top_returning_to_registration() {
            let state = HelpState::default();
            assert_eq!(state.scroll(), 0);
            assert_eq!(state.origin(), Screen::Registration);
        }

        #[test]
        fn set_origin_stores_screen() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Confirmation);
            assert_eq!(state.origin(), Screen::Confirmation);
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn arrows_scroll_and_saturate() {
            let mut state = HelpState::new();
            assert_eq!(state.handle_key(press(KeyCode::Up)), Action::None);
            assert_eq!(state.scroll(), 0);
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn q_and_esc_return_to_origin() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Confirmation);
            assert_eq!(
                state.handle_key(press(KeyCode::Char('q'))),
                Action::Navigate(Screen::Confirmation)
            );
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::Confirmation)
            );
        }

        #[test]
        fn unknown_key_returns_none() {
            let mut state = HelpState::new();
            assert_eq!(state.handle_key(press(KeyCode::Char('x'))), Action::None);
        }

        #[test]
        fn reset_sets_scroll_to_zero() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.reset();
            assert_eq!(state.scroll(), 0);
        }
    }

    mod help_content_fn {
        use super::*;

        fn content_text(screen: Screen) -> String {
            help_content(screen)
                .into_iter()
                .flat_map(|l| l.spans.into_iter())
                .map(|s| s.content.into_owned())
                .collect()
        }

        #[test]
        fn every_screen_lists_global_keys() {
            for screen in [Screen::Registration, Screen::Confirmation, Screen::Help] {
                let text = content_text(screen);
                assert!(text.contains("Ctrl-C"), "{screen:?} missing Ctrl-C");
                assert!(text.contains("F1"), "{screen:?} missing F1");
            }
        }

        #[test]
        fn registration_excludes_confirmation_section() {
            let text = content_text(Screen::Registration);
            assert!(text.contains("privacy policy"));
            assert!(!text.contains("Confirmation"));
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push_str(buf[(x, y)].symbol());
                }
                s.push('\n');
            }
            s
        }

        fn render_help(state: &HelpState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_help(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn title_includes_origin_screen_name() {
            let mut state = HelpState::new();
            state.set_origin(Screen::Confirmation);
            let output = render_help(&state, 80, 30);
            assert!(output.contains("Help – Confirmation"));
            assert!(output.contains("close and start a new registration"));
        }

        #[test]
        fn footer_mentions_esc() {
            let output = render_help(&HelpState::new(), 80, 30);
            assert!(output.contains("q/Esc: back"));
        }
    }
}
