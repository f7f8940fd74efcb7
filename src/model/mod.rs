mod choices;
mod controller;
mod draft;
mod record;
mod validation;

pub use choices::{
    DesiredPosition, DesiredYear, Faculty, Gender, Interest, PLEASE_SELECT, cycle_choice,
};
pub use controller::{FormController, Receipt, SubmitOutcome, SubmitStart};
pub use draft::{Draft, FieldKey, FieldUpdate};
pub use record::{StampedSubmission, SubmissionRecord};
pub use validation::{ErrorMap, ValidationError, validate, validate_email};
