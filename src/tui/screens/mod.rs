//! TUI screen implementations.

pub mod confirmation;
pub mod help;
pub mod registration;

pub use confirmation::{ConfirmationState, draw_confirmation};
pub use help::{HelpState, draw_help};
pub use registration::{RegistrationState, Slot, draw_registration};
