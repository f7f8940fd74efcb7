use std::fmt;

use serde::Serialize;

/// Placeholder shown by every select while nothing is chosen.
pub const PLEASE_SELECT: &str = "Please Select / 選択してください";

/// Applicant gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

static ALL_GENDERS: &[Gender] = &[
    Gender::Male,
    Gender::Female,
    Gender::Other,
    Gender::PreferNotToSay,
];

impl Gender {
    /// Returns the value sent to the backend.
    pub fn wire_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer_not_to_say",
        }
    }

    /// Returns the bilingual display label.
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male / 男性",
            Gender::Female => "Female / 女性",
            Gender::Other => "Other / その他",
            Gender::PreferNotToSay => "Prefer not to say / 回答しない",
        }
    }

    /// Returns all genders in display order.
    pub fn all() -> &'static [Gender] {
        ALL_GENDERS
    }
}

/// Faculty the applicant belongs to.
///
/// [`Faculty::Other`] activates the free-text override on the draft. Records
/// carry [`Faculty::wire_str`] rather than the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faculty {
    InformationTechnology,
    DigitalTechnology,
    BusinessAdministration,
    GlobalCommunication,
    InternationalCollege,
    ContinuedEducation,
    MastersCourse,
    Graduated,
    Other,
}

static ALL_FACULTIES: &[Faculty] = &[
    Faculty::InformationTechnology,
    Faculty::DigitalTechnology,
    Faculty::BusinessAdministration,
    Faculty::GlobalCommunication,
    Faculty::InternationalCollege,
    Faculty::ContinuedEducation,
    Faculty::MastersCourse,
    Faculty::Graduated,
    Faculty::Other,
];

impl Faculty {
    /// Returns the value sent to the backend.
    ///
    /// Fixed faculties are sent as their full label; `Other` is replaced by
    /// the override text when the record is built.
    pub fn wire_str(&self) -> &'static str {
        match self {
            Faculty::Other => "other",
            other => other.label(),
        }
    }

    /// Returns the bilingual display label.
    pub fn label(&self) -> &'static str {
        match self {
            Faculty::InformationTechnology => "IT / Information Technology / IT/情報技術学部",
            Faculty::DigitalTechnology => "Digital Technology / デジタルテクノロジー学部",
            Faculty::BusinessAdministration => "Business Administration / 経営学部",
            Faculty::GlobalCommunication => {
                "Global Communication / グローバルコミュニケーション学部"
            }
            Faculty::InternationalCollege => "TNIC / International College / TNIC/国際学院",
            Faculty::ContinuedEducation => "Continued Education / Adult Education / 社会人教育",
            Faculty::MastersCourse => "MA / Master's Course / MA/修士課程",
            Faculty::Graduated => "Graduated / 既卒",
            Faculty::Other => "Other / その他",
        }
    }

    /// Returns all faculties in display order, `Other` last.
    pub fn all() -> &'static [Faculty] {
        ALL_FACULTIES
    }
}

/// Position the applicant is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DesiredPosition {
    #[serde(rename = "Field Engineer")]
    FieldEngineer,
    #[serde(rename = "Software Engineer AI Related")]
    SoftwareEngineerAi,
}

static ALL_POSITIONS: &[DesiredPosition] = &[
    DesiredPosition::FieldEngineer,
    DesiredPosition::SoftwareEngineerAi,
];

impl DesiredPosition {
    /// Returns the value sent to the backend, which doubles as the label.
    pub fn wire_str(&self) -> &'static str {
        match self {
            DesiredPosition::FieldEngineer => "Field Engineer",
            DesiredPosition::SoftwareEngineerAi => "Software Engineer AI Related",
        }
    }

    pub fn label(&self) -> &'static str {
        self.wire_str()
    }

    pub fn all() -> &'static [DesiredPosition] {
        ALL_POSITIONS
    }
}

/// Year the applicant would like to start working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DesiredYear {
    #[serde(rename = "2026")]
    Y2026,
    #[serde(rename = "2027")]
    Y2027,
    #[serde(rename = "2028")]
    Y2028,
    #[serde(rename = "2029")]
    Y2029,
    #[serde(rename = "graduated")]
    Graduated,
    #[serde(rename = "others")]
    Others,
}

static ALL_YEARS: &[DesiredYear] = &[
    DesiredYear::Y2026,
    DesiredYear::Y2027,
    DesiredYear::Y2028,
    DesiredYear::Y2029,
    DesiredYear::Graduated,
    DesiredYear::Others,
];

impl DesiredYear {
    /// Returns the value sent to the backend.
    pub fn wire_str(&self) -> &'static str {
        match self {
            DesiredYear::Y2026 => "2026",
            DesiredYear::Y2027 => "2027",
            DesiredYear::Y2028 => "2028",
            DesiredYear::Y2029 => "2029",
            DesiredYear::Graduated => "graduated",
            DesiredYear::Others => "others",
        }
    }

    /// Returns the bilingual display label.
    pub fn label(&self) -> &'static str {
        match self {
            DesiredYear::Graduated => "Graduated / 既卒",
            DesiredYear::Others => "Others / その他",
            year => year.wire_str(),
        }
    }

    pub fn all() -> &'static [DesiredYear] {
        ALL_YEARS
    }
}

/// What the applicant is interested in. Labels are sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Interest {
    #[serde(rename = "Full-time Employment in Japan / 日本での正社員")]
    FullTimeInJapan,
    #[serde(rename = "Internship in Japan / 日本でのインターンシップ")]
    InternshipInJapan,
}

static ALL_INTERESTS: &[Interest] = &[Interest::FullTimeInJapan, Interest::InternshipInJapan];

impl Interest {
    pub fn label(&self) -> &'static str {
        match self {
            Interest::FullTimeInJapan => "Full-time Employment in Japan / 日本での正社員",
            Interest::InternshipInJapan => "Internship in Japan / 日本でのインターンシップ",
        }
    }

    pub fn all() -> &'static [Interest] {
        ALL_INTERESTS
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(
            #[mutants::skip]
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_as_label!(Gender, Faculty, DesiredPosition, DesiredYear, Interest);

/// Cycles an optional selection through `None` and every entry of `all`.
///
/// Forward order is `None, all[0], .., all[n-1], None`; backward is the reverse.
pub fn cycle_choice<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    if all.is_empty() {
        return None;
    }
    let position = current.and_then(|c| all.iter().position(|x| *x == c));
    match (position, forward) {
        (None, true) => all.first().copied(),
        (None, false) => all.last().copied(),
        (Some(i), true) => all.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => all.get(i - 1).copied(),
    }
}
