//! Client-side payload validation.
//!
//! Payload structs derive [`validator::Validate`]; this module turns the
//! derived error tree into a single [`CoreError::Validation`] message.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived validation rules for `value`.
///
/// Field messages are sorted so the combined message is stable.
pub fn check<T: Validate>(value: &T) -> Result<(), CoreError> {
    value
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
