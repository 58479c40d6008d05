//! Form rendering module
//!
//! - `field_renderer`: single field with its validation message
//! - `wizard_form`: step progress, step body and the action panel

mod field_renderer;
mod wizard_form;

pub use field_renderer::{draw_field, field_height};
pub use wizard_form::draw_wizard;
