//! Built-in field input renderers (the basic field kinds).
//!
//! Each renderer turns a menu declaration plus the current stored value
//! into an [`embedkit_types::InputNode`] description. Widget-specific
//! extensions register their own complex kinds next to these through
//! `FieldRegistry::register_complex`.

mod choice;
mod group;
mod media;
mod number;
mod text;
mod toggle;

pub use choice::SelectField;
pub use group::GroupField;
pub use media::{ColorField, ImageField};
pub use number::{NumberField, SliderField};
pub use text::{TextAreaField, TextField};
pub use toggle::ToggleField;

use embedkit_core::{FieldRegistry, SchemaResult};

/// Register every basic field kind.
pub fn register_basic_fields(fields: &mut FieldRegistry) -> SchemaResult<()> {
    fields.register_basic(Box::new(TextField))?;
    fields.register_basic(Box::new(TextAreaField))?;
    fields.register_basic(Box::new(ToggleField))?;
    fields.register_basic(Box::new(NumberField))?;
    fields.register_basic(Box::new(SliderField))?;
    fields.register_basic(Box::new(SelectField))?;
    fields.register_basic(Box::new(ColorField))?;
    fields.register_basic(Box::new(ImageField))?;
    fields.register_basic(Box::new(GroupField))?;
    Ok(())
}
