use std::fmt;

use super::choices::{DesiredPosition, DesiredYear, Faculty, Gender, Interest};

/// Identifies one field of a [`Draft`]; used as the [`ErrorMap`](super::ErrorMap) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    FirstName,
    LastName,
    Gender,
    Faculty,
    FacultyOther,
    DesiredPosition,
    DesiredYear,
    Age,
    Email,
    EmailConfirm,
    Interests,
    Comments,
    PrivacyConsent,
}

impl FieldKey {
    /// Bilingual label used by the form.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name / 名",
            Self::LastName => "Last Name / 姓",
            Self::Gender => "Gender / 性別",
            Self::Faculty => "Faculty / 学部",
            Self::FacultyOther => "If Other - Please Specify / その他の場合 - ご指定ください",
            Self::DesiredPosition => "Desired Position / 希望職種",
            Self::DesiredYear => "Desired Year to Work / 就職希望年度",
            Self::Age => "Age / 年齢",
            Self::Email => "Email Address / メールアドレス",
            Self::EmailConfirm => "Email Address (Confirmation) / メールアドレス（確認）",
            Self::Interests => "What are you interested in? / どのようなことに興味がありますか？",
            Self::Comments => "Let us know about you and stay in touch with our HR! / あなたについて教えてください",
            Self::PrivacyConsent => "I agree to the Privacy Policy / プライバシーポリシーに同意します",
        }
    }

    /// Whether the form marks this field as mandatory.
    pub fn required(self) -> bool {
        matches!(
            self,
            Self::FirstName
                | Self::LastName
                | Self::Gender
                | Self::Faculty
                | Self::DesiredPosition
                | Self::DesiredYear
                | Self::Interests
                | Self::PrivacyConsent
        )
    }
}

#[mutants::skip]
impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The in-progress registration held in memory until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub faculty: Option<Faculty>,
    /// Free text used when [`Faculty::Other`] is selected.
    pub faculty_other: String,
    pub desired_position: Option<DesiredPosition>,
    pub desired_year: Option<DesiredYear>,
    /// Digits only; bounded at the input layer.
    pub age: String,
    pub email: String,
    pub email_confirm: String,
    /// Selected interests in the order they were ticked.
    pub interests: Vec<Interest>,
    pub comments: String,
    pub privacy_consent: bool,
}

impl Draft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `interest` is currently selected.
    pub fn has_interest(&self, interest: Interest) -> bool {
        self.interests.contains(&interest)
    }

    /// Returns the text value of a free-text field, or `None` for select,
    /// list and boolean fields.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        let value = match key {
            FieldKey::FirstName => &self.first_name,
            FieldKey::LastName => &self.last_name,
            FieldKey::FacultyOther => &self.faculty_other,
            FieldKey::Age => &self.age,
            FieldKey::Email => &self.email,
            FieldKey::EmailConfirm => &self.email_confirm,
            FieldKey::Comments => &self.comments,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Overwrites one field.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::Gender(v) => self.gender = v,
            FieldUpdate::Faculty(v) => self.faculty = v,
            FieldUpdate::FacultyOther(v) => self.faculty_other = v,
            FieldUpdate::DesiredPosition(v) => self.desired_position = v,
            FieldUpdate::DesiredYear(v) => self.desired_year = v,
            FieldUpdate::Age(v) => self.age = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::EmailConfirm(v) => self.email_confirm = v,
            FieldUpdate::Comments(v) => self.comments = v,
        }
    }
}

/// A new value for a single draft field.
///
/// Interests and privacy consent have dedicated operations on the
/// controller and are not set through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Gender(Option<Gender>),
    Faculty(Option<Faculty>),
    FacultyOther(String),
    DesiredPosition(Option<DesiredPosition>),
    DesiredYear(Option<DesiredYear>),
    Age(String),
    Email(String),
    EmailConfirm(String),
    Comments(String),
}

impl FieldUpdate {
    /// Returns the field this update targets.
    pub fn key(&self) -> FieldKey {
        match self {
            Self::FirstName(_) => FieldKey::FirstName,
            Self::LastName(_) => FieldKey::LastName,
            Self::Gender(_) => FieldKey::Gender,
            Self::Faculty(_) => FieldKey::Faculty,
            Self::FacultyOther(_) => FieldKey::FacultyOther,
            Self::DesiredPosition(_) => FieldKey::DesiredPosition,
            Self::DesiredYear(_) => FieldKey::DesiredYear,
            Self::Age(_) => FieldKey::Age,
            Self::Email(_) => FieldKey::Email,
            Self::EmailConfirm(_) => FieldKey::EmailConfirm,
            Self::Comments(_) => FieldKey::Comments,
        }
    }

    /// Builds a text update for `key`, or `None` if `key` is not a text field.
    pub fn text(key: FieldKey, value: String) -> Option<Self> {
        let update = match key {
            FieldKey::FirstName => Self::FirstName(value),
            FieldKey::LastName => Self::LastName(value),
            FieldKey::FacultyOther => Self::FacultyOther(value),
            FieldKey::Age => Self::Age(value),
            FieldKey::Email => Self::Email(value),
            FieldKey::EmailConfirm => Self::EmailConfirm(value),
            FieldKey::Comments => Self::Comments(value),
            _ => return None,
        };
        Some(update)
    }
}
