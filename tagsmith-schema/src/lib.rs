//! Field schemas and validation for Tagsmith.
//!
//! A [`FieldDescriptor`] is one entry of the static form definition:
//! type, constraints, and an optional visibility condition. Descriptors are
//! deserialized once from the configuration blob and never mutated.
//!
//! The validation engine is a set of pure functions: a descriptor plus a
//! value map to a [`ValidationResult`]. Invalid input is a normal return
//! value, never an error or panic.

mod descriptor;
mod validate;

pub use descriptor::{FieldCondition, FieldDescriptor, FieldType};
pub use validate::{
    validate_field, validate_field_with, validate_form, CustomRule, FormValidation,
    ValidationResult,
};
