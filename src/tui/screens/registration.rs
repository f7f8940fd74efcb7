//! Registration screen: the bilingual form visitors fill in at the booth.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::content::{COMPANY_NAME, SUBTITLE_EN, SUBTITLE_JA, TAGLINE, privacy_notice};
use crate::model::{
    DesiredPosition, DesiredYear, Faculty, FieldKey, FieldUpdate, FormController, Gender,
    Interest, Receipt, SubmitStart, cycle_choice,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{FormRow, RowInput, draw_form};

/// Upper bound on the comments field, in characters.
pub const COMMENTS_MAX_CHARS: usize = 500;

/// Oldest age the age field accepts.
pub const AGE_MAX: u16 = 150;

pub const SUBMIT_LABEL: &str = "Submit / 送信";
pub const SUBMITTING_LABEL: &str = "Submitting... / 送信中...";

const PRIVACY_TITLE: &str = "Privacy Policy / プライバシーポリシー";

/// A focusable position on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(FieldKey),
    Submit,
}

/// Focus order, top to bottom.
static SLOTS: &[Slot] = &[
    Slot::Field(FieldKey::FirstName),
    Slot::Field(FieldKey::LastName),
    Slot::Field(FieldKey::Gender),
    Slot::Field(FieldKey::Faculty),
    Slot::Field(FieldKey::FacultyOther),
    Slot::Field(FieldKey::DesiredPosition),
    Slot::Field(FieldKey::DesiredYear),
    Slot::Field(FieldKey::Age),
    Slot::Field(FieldKey::Email),
    Slot::Field(FieldKey::EmailConfirm),
    Slot::Field(FieldKey::Interests),
    Slot::Field(FieldKey::Comments),
    Slot::Field(FieldKey::PrivacyConsent),
    Slot::Submit,
];

/// Returns `true` if `ch` may be appended to `current` in the field `key`.
///
/// Age takes digits only, no leading zero, up to [`AGE_MAX`]. Comments stop
/// at [`COMMENTS_MAX_CHARS`].
pub fn accepts_char(key: FieldKey, current: &str, ch: char) -> bool {
    if ch.is_control() {
        return false;
    }
    match key {
        FieldKey::Age => {
            if !ch.is_ascii_digit() || (current.is_empty() && ch == '0') {
                return false;
            }
            format!("{current}{ch}")
                .parse::<u16>()
                .is_ok_and(|age| age <= AGE_MAX)
        }
        FieldKey::Comments => current.chars().count() < COMMENTS_MAX_CHARS,
        _ => true,
    }
}

fn placeholder(key: FieldKey) -> &'static str {
    match key {
        FieldKey::Age => "e.g. 21",
        FieldKey::Email | FieldKey::EmailConfirm => "name@example.com",
        FieldKey::FacultyOther => "Your faculty / 学部名",
        _ => "",
    }
}

/// State for the registration screen.
#[derive(Debug, Clone, Default)]
pub struct RegistrationState {
    controller: FormController,
    focus: usize,
    interest_cursor: usize,
    privacy_open: bool,
    privacy_scroll: u16,
}

impl RegistrationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    #[cfg(test)]
    pub(crate) fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    /// Returns the focused slot.
    pub fn focus(&self) -> Slot {
        SLOTS[self.focus]
    }

    pub fn interest_cursor(&self) -> usize {
        self.interest_cursor
    }

    pub fn privacy_open(&self) -> bool {
        self.privacy_open
    }

    pub fn privacy_scroll(&self) -> u16 {
        self.privacy_scroll
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Settles the in-flight submission and returns the form to its initial state.
    pub fn finish_submit(&mut self, delivered: bool) -> Option<Receipt> {
        let receipt = self.controller.finish_submit(delivered)?;
        self.focus = 0;
        self.interest_cursor = 0;
        self.privacy_open = false;
        self.privacy_scroll = 0;
        Some(receipt)
    }

    /// The override slot only exists while "Other" is the selected faculty.
    fn is_available(&self, slot: Slot) -> bool {
        slot != Slot::Field(FieldKey::FacultyOther)
            || self.controller.draft().faculty == Some(Faculty::Other)
    }

    fn focus_next(&mut self) {
        let mut i = self.focus;
        loop {
            i = (i + 1) % SLOTS.len();
            if self.is_available(SLOTS[i]) {
                break;
            }
        }
        self.focus = i;
    }

    fn focus_prev(&mut self) {
        let mut i = self.focus;
        loop {
            i = (i + SLOTS.len() - 1) % SLOTS.len();
            if self.is_available(SLOTS[i]) {
                break;
            }
        }
        self.focus = i;
    }

    fn submit(&mut self) -> Action {
        match self.controller.begin_submit() {
            SubmitStart::Ready(record) => Action::Submit(record),
            SubmitStart::Invalid => {
                self.focus_first_error();
                Action::None
            }
            SubmitStart::Busy => Action::None,
        }
    }

    fn focus_first_error(&mut self) {
        let Some((key, _)) = self.controller.errors().iter().next() else {
            return;
        };
        if let Some(i) = SLOTS.iter().position(|s| *s == Slot::Field(key)) {
            self.focus = i;
        }
    }

    fn push_char(&mut self, key: FieldKey, ch: char) {
        let Some(current) = self.controller.draft().text(key) else {
            return;
        };
        if !accepts_char(key, current, ch) {
            return;
        }
        let mut value = current.to_string();
        value.push(ch);
        if let Some(update) = FieldUpdate::text(key, value) {
            self.controller.set_field(update);
        }
    }

    fn pop_char(&mut self, key: FieldKey) {
        let Some(current) = self.controller.draft().text(key) else {
            return;
        };
        if current.is_empty() {
            return;
        }
        let mut value = current.to_string();
        value.pop();
        if let Some(update) = FieldUpdate::text(key, value) {
            self.controller.set_field(update);
        }
    }

    /// Steps a select field through "Please Select" and its options.
    fn cycle_select(&mut self, key: FieldKey, forward: bool) {
        let draft = self.controller.draft();
        let update = match key {
            FieldKey::Gender => {
                FieldUpdate::Gender(cycle_choice(Gender::all(), draft.gender, forward))
            }
            FieldKey::Faculty => {
                FieldUpdate::Faculty(cycle_choice(Faculty::all(), draft.faculty, forward))
            }
            FieldKey::DesiredPosition => FieldUpdate::DesiredPosition(cycle_choice(
                DesiredPosition::all(),
                draft.desired_position,
                forward,
            )),
            FieldKey::DesiredYear => FieldUpdate::DesiredYear(cycle_choice(
                DesiredYear::all(),
                draft.desired_year,
                forward,
            )),
            _ => return,
        };
        self.controller.set_field(update);
    }

    fn move_interest_cursor(&mut self, forward: bool) {
        let len = Interest::all().len();
        self.interest_cursor = if forward {
            (self.interest_cursor + 1) % len
        } else {
            (self.interest_cursor + len - 1) % len
        };
    }

    fn handle_field_key(&mut self, key: FieldKey, code: KeyCode) {
        match key {
            FieldKey::Gender | FieldKey::Faculty | FieldKey::DesiredPosition | FieldKey::DesiredYear => {
                match code {
                    KeyCode::Left => self.cycle_select(key, false),
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_select(key, true),
                    _ => {}
                }
            }
            FieldKey::Interests => match code {
                KeyCode::Left => self.move_interest_cursor(false),
                KeyCode::Right => self.move_interest_cursor(true),
                KeyCode::Char(' ') => {
                    if let Some(interest) = Interest::all().get(self.interest_cursor) {
                        self.controller.toggle_interest(*interest);
                    }
                }
                _ => {}
            },
            FieldKey::PrivacyConsent => {
                if code == KeyCode::Char(' ') {
                    let consent = !self.controller.draft().privacy_consent;
                    self.controller.set_privacy_consent(consent);
                }
            }
            _ => match code {
                KeyCode::Char(ch) => self.push_char(key, ch),
                KeyCode::Backspace => self.pop_char(key),
                _ => {}
            },
        }
    }

    /// Builds the visible rows and the index of the focused one among them.
    fn rows(&self) -> (Vec<FormRow<'_>>, usize) {
        let draft = self.controller.draft();
        let errors = self.controller.errors();
        let mut rows = Vec::with_capacity(SLOTS.len());
        let mut focus = 0;

        for (i, slot) in SLOTS.iter().enumerate() {
            if !self.is_available(*slot) {
                continue;
            }
            if i == self.focus {
                focus = rows.len();
            }
            let row = match *slot {
                Slot::Submit => {
                    let busy = self.controller.is_busy();
                    FormRow::new(
                        "",
                        false,
                        RowInput::Button {
                            label: if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL },
                            enabled: !busy,
                        },
                    )
                }
                Slot::Field(key) => {
                    let input = match key {
                        FieldKey::Gender => RowInput::Select {
                            selected: draft.gender.map(|g| g.label()),
                        },
                        FieldKey::Faculty => RowInput::Select {
                            selected: draft.faculty.map(|f| f.label()),
                        },
                        FieldKey::DesiredPosition => RowInput::Select {
                            selected: draft.desired_position.map(|p| p.label()),
                        },
                        FieldKey::DesiredYear => RowInput::Select {
                            selected: draft.desired_year.map(|y| y.label()),
                        },
                        FieldKey::Interests => RowInput::Checklist {
                            items: Interest::all()
                                .iter()
                                .map(|i| (i.label(), draft.has_interest(*i)))
                                .collect(),
                            cursor: self.interest_cursor,
                        },
                        FieldKey::PrivacyConsent => RowInput::Checkbox {
                            text: key.label(),
                            checked: draft.privacy_consent,
                        },
                        FieldKey::Comments => RowInput::Text {
                            value: &draft.comments,
                            placeholder: "",
                            lines: 3,
                            counter: Some((draft.comments.chars().count(), COMMENTS_MAX_CHARS)),
                        },
                        _ => RowInput::Text {
                            value: draft.text(key).unwrap_or_default(),
                            placeholder: placeholder(key),
                            lines: 1,
                            counter: None,
                        },
                    };
                    let label = if key == FieldKey::PrivacyConsent {
                        "Privacy / 個人情報 (F2: read / 読む)"
                    } else {
                        key.label()
                    };
                    FormRow::new(label, key.required(), input)
                        .with_error(errors.get(key).map(|e| e.to_string()))
                }
            };
            rows.push(row);
        }
        (rows, focus)
    }
}

impl ScreenState for RegistrationState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        // Windows consoles report AltGr characters as Ctrl+Alt.
        let alt_gr_char = ctrl && alt && matches!(key.code, KeyCode::Char(_));
        if (ctrl || alt) && !alt_gr_char {
            return Action::None;
        }

        match key.code {
            KeyCode::F(2) => {
                self.privacy_open = !self.privacy_open;
                self.privacy_scroll = 0;
            }
            KeyCode::Esc if self.privacy_open => self.privacy_open = false,
            KeyCode::PageDown if self.privacy_open => {
                self.privacy_scroll = self.privacy_scroll.saturating_add(5);
            }
            KeyCode::PageUp if self.privacy_open => {
                self.privacy_scroll = self.privacy_scroll.saturating_sub(5);
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => return self.submit(),
            code => match self.focus() {
                Slot::Submit => {
                    if code == KeyCode::Char(' ') {
                        return self.submit();
                    }
                }
                Slot::Field(field) => self.handle_field_key(field, code),
            },
        }
        Action::None
    }
}

fn header_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            TAGLINE.join(" "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(SUBTITLE_EN),
        Line::from(SUBTITLE_JA),
    ]
}

fn privacy_lines() -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for section in privacy_notice() {
        lines.push(Line::from(Span::styled(section.heading, heading)));
        for paragraph in section.paragraphs {
            lines.push(Line::from(*paragraph));
            lines.push(Line::from(""));
        }
    }
    lines
}

/// Renders the registration screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_registration(state: &RegistrationState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {COMPANY_NAME} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(header_lines()).alignment(Alignment::Center),
        header_area,
    );

    let form_area = if state.privacy_open() {
        let [form_area, privacy_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body_area);
        let privacy_block = Block::default()
            .title(format!(" {PRIVACY_TITLE} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let privacy = Paragraph::new(privacy_lines())
            .block(privacy_block)
            .wrap(Wrap { trim: false })
            .scroll((state.privacy_scroll(), 0));
        frame.render_widget(privacy, privacy_area);
        form_area
    } else {
        body_area
    };

    let (rows, focus) = state.rows();
    draw_form(&rows, focus, frame, form_area);

    let footer = if state.privacy_open() {
        "PgUp/PgDn: scroll policy  F2/Esc: close policy  Tab: next field  Enter: submit"
    } else {
        "Tab/↑↓: field  ←/→/Space: choose  Enter: submit  F2: privacy  F1: help  Ctrl-C: quit"
    };
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}
