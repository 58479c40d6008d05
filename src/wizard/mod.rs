//! Multi-step form machinery shared by every wizard

mod controller;
mod field;
mod list_editor;
mod validation;

pub use controller::{Step, StepBody, SubmitAttempt, SubmitPhase, Wizard};
pub use field::{FieldKind, FieldValue, FormField, FormValues};
pub use list_editor::ListEditor;
pub use validation::{DateWindow, Rule, ValidationContext};
