use std::fmt;

use serde::Serialize;

use crate::Patch;

/// Upper bound, in characters, for names and customer strings.
pub const MAX_TEXT_LEN: usize = 100;

/// Constraint failure on one field of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every field error found in one payload, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Field-level checks for a decoded request body.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub(crate) fn check_text(errors: &mut ValidationErrors, field: &str, value: &str) {
    let len = value.chars().count();
    if len < 1 {
        errors.push(field, "String should have at least 1 character");
    } else if len > MAX_TEXT_LEN {
        errors.push(
            field,
            format!("String should have at most {} characters", MAX_TEXT_LEN),
        );
    }
}

pub(crate) fn check_quantity(errors: &mut ValidationErrors, field: &str, value: i64) {
    if value < 0 {
        errors.push(field, "Input should be greater than or equal to 0");
    }
}

pub(crate) fn check_price(errors: &mut ValidationErrors, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(field, "Input should be a finite number");
    } else if value < 0.0 {
        errors.push(field, "Input should be greater than or equal to 0");
    }
}

/// Runs `check` on a supplied value and rejects an explicit `null`.
pub(crate) fn check_patch<T>(
    errors: &mut ValidationErrors,
    field: &str,
    patch: &Patch<T>,
    check: impl FnOnce(&mut ValidationErrors, &str, &T),
) {
    match patch {
        Patch::Absent => {}
        Patch::Null => errors.push(field, "Field may not be null"),
        Patch::Value(value) => check(errors, field, value),
    }
}
