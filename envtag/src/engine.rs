//! The populate engine: walks a record's fields and fills them in.

use crate::annotation::{is_skip, FieldAnnotation};
use crate::error::PopulateError;
use crate::fetch::TypeTag;
use crate::Populate;

/// Static description of one field, emitted by `#[derive(Populate)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    /// Field identifier
    pub name: &'static str,
    /// Raw `#[conf]` tag, `None` when the field has none
    pub tag: Option<&'static str>,
    /// Registry key of the declared type (one `Option` stripped), or the
    /// type as written when it has none
    pub type_name: &'static str,
    /// Declared type was `Option<T>`
    pub optional: bool,
    /// Field is visible outside the struct and may be written
    pub settable: bool,
}

/// Populate every annotated field of `target` from the environment.
///
/// Fields are visited in declaration order. The first error aborts the call;
/// fields before it keep the values already written.
///
/// # Errors
///
/// - [`PopulateError::UnsupportedType`] when an annotated field's type has
///   no registered fetcher
/// - [`PopulateError::Parse`] when a value or default does not convert
/// - [`PopulateError::NotUnicode`] when a variable holds non-Unicode data
pub fn populate<T: Populate>(target: &mut T) -> Result<(), PopulateError> {
    for (index, slot) in T::fields().iter().enumerate() {
        let Some(tag) = slot.tag else {
            tracing::debug!(field = slot.name, "no tag, skipping");
            continue;
        };
        if is_skip(tag) {
            tracing::debug!(field = slot.name, "skip tag, skipping");
            continue;
        }

        let annotation =
            FieldAnnotation::parse(tag, slot.type_name, slot.optional).with_prefix(T::PREFIX);

        let kind = TypeTag::from_type_name(slot.type_name).ok_or_else(|| {
            PopulateError::UnsupportedType {
                field: slot.name,
                type_name: slot.type_name.to_string(),
            }
        })?;

        if !slot.settable {
            tracing::debug!(field = slot.name, "field is not settable, skipping");
            continue;
        }

        let value = kind.fetcher(&annotation).fetch()?;
        target.assign(index, value)?;

        tracing::trace!(
            field = slot.name,
            variable = %annotation.variable_name,
            %kind,
            optional = annotation.optional,
            "field populated"
        );
    }

    Ok(())
}
