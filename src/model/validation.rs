use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::choices::Faculty;
use super::draft::{Draft, FieldKey};

/// A failed validation rule. Messages are English / Japanese pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First Name is required / 名は必須です")]
    FirstNameRequired,
    #[error("Last Name is required / 姓は必須です")]
    LastNameRequired,
    #[error("Gender is required / 性別は必須です")]
    GenderRequired,
    #[error("Faculty is required / 学部は必須です")]
    FacultyRequired,
    #[error("Desired position is required / 希望職種は必須です")]
    DesiredPositionRequired,
    #[error("Desired year to work is required / 就職希望年度は必須です")]
    DesiredYearRequired,
    #[error("Please enter a valid email address / 有効なメールアドレスを入力してください")]
    InvalidEmail,
    #[error("Email confirmation is required / メールアドレス確認は必須です")]
    EmailConfirmRequired,
    #[error("Emails do not match / メールアドレスが一致しません")]
    EmailMismatch,
    #[error("Please enter email address first / まずメールアドレスを入力してください")]
    EmailConfirmWithoutEmail,
    #[error("Please select at least one interest / 少なくとも1つ選択してください")]
    InterestsRequired,
    #[error("Privacy policy consent is required / プライバシーポリシーへの同意が必要です")]
    PrivacyConsentRequired,
}

/// Field-keyed validation failures. A missing key means valid or not yet checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<FieldKey, ValidationError>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, error: ValidationError) {
        self.0.insert(key, error);
    }

    /// Removes the error for `key`, returning it if one was present.
    pub fn remove(&mut self, key: FieldKey) -> Option<ValidationError> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: FieldKey) -> Option<ValidationError> {
        self.0.get(&key).copied()
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, ValidationError)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid hardcoded regex"));

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validates the `local@domain.tld` shape: one `@`, a `.` after it, no whitespace.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Runs every rule against `draft` and collects the failures.
pub fn validate(draft: &Draft) -> ErrorMap {
    let mut errors = ErrorMap::new();

    if is_blank(&draft.first_name) {
        errors.insert(FieldKey::FirstName, ValidationError::FirstNameRequired);
    }
    if is_blank(&draft.last_name) {
        errors.insert(FieldKey::LastName, ValidationError::LastNameRequired);
    }
    if draft.gender.is_none() {
        errors.insert(FieldKey::Gender, ValidationError::GenderRequired);
    }
    let has_fixed_faculty = matches!(draft.faculty, Some(f) if f != Faculty::Other);
    if !has_fixed_faculty && is_blank(&draft.faculty_other) {
        errors.insert(FieldKey::Faculty, ValidationError::FacultyRequired);
    }
    if draft.desired_position.is_none() {
        errors.insert(
            FieldKey::DesiredPosition,
            ValidationError::DesiredPositionRequired,
        );
    }
    if draft.desired_year.is_none() {
        errors.insert(FieldKey::DesiredYear, ValidationError::DesiredYearRequired);
    }

    if !is_blank(&draft.email) {
        if let Err(e) = validate_email(&draft.email) {
            errors.insert(FieldKey::Email, e);
        }
        if is_blank(&draft.email_confirm) {
            errors.insert(FieldKey::EmailConfirm, ValidationError::EmailConfirmRequired);
        } else if draft.email != draft.email_confirm {
            errors.insert(FieldKey::EmailConfirm, ValidationError::EmailMismatch);
        }
    } else if !is_blank(&draft.email_confirm) {
        errors.insert(
            FieldKey::EmailConfirm,
            ValidationError::EmailConfirmWithoutEmail,
        );
    }

    if draft.interests.is_empty() {
        errors.insert(FieldKey::Interests, ValidationError::InterestsRequired);
    }
    if !draft.privacy_consent {
        errors.insert(
            FieldKey::PrivacyConsent,
            ValidationError::PrivacyConsentRequired,
        );
    }

    errors
}
