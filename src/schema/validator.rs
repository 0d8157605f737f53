//! User validator
//!
//! Validation is a pure function of the candidate document:
//! - Checks run in a fixed order and stop at the first failure
//! - Strings must be non-empty, no trimming or coercion
//! - `age` must be an integral JSON number, `36.0` counts as integral
//! - Unknown fields pass through, `id` is discarded

use serde_json::{Map, Number, Value};

use super::errors::{ValidationError, ValidationResult};
use super::types::{UserDraft, AGE_MAX, AGE_MIN};

const FIRST_NAME: &str = "firstName";
const SECOND_NAME: &str = "secondName";
const AGE: &str = "age";
const CITY: &str = "city";
const ID: &str = "id";

/// Keys that never land in [`UserDraft::extra`].
const RESERVED_FIELDS: [&str; 5] = [ID, FIRST_NAME, SECOND_NAME, AGE, CITY];

/// Validates a candidate user document.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, in field order
/// `firstName`, `secondName`, `age`, `city`.
pub fn validate(candidate: &Value) -> ValidationResult<UserDraft> {
    let obj = candidate
        .as_object()
        .ok_or_else(ValidationError::not_an_object)?;

    let first_name = required_string(obj, FIRST_NAME)?;
    let second_name = required_string(obj, SECOND_NAME)?;
    let age = required_age(obj)?;
    let city = optional_string(obj, CITY)?;

    let extra = obj
        .iter()
        .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(UserDraft {
        first_name,
        second_name,
        age,
        city,
        extra,
    })
}

fn required_string(obj: &Map<String, Value>, field: &str) -> ValidationResult<String> {
    match obj.get(field) {
        Some(value) => non_empty_string(value, field),
        None => Err(ValidationError::required(field)),
    }
}

fn optional_string(obj: &Map<String, Value>, field: &str) -> ValidationResult<Option<String>> {
    obj.get(field)
        .map(|value| non_empty_string(value, field))
        .transpose()
}

fn non_empty_string(value: &Value, field: &str) -> ValidationResult<String> {
    match value {
        Value::String(s) if s.is_empty() => Err(ValidationError::empty(field)),
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::not_a_string(field)),
    }
}

fn required_age(obj: &Map<String, Value>) -> ValidationResult<u8> {
    match obj.get(AGE) {
        Some(Value::Number(n)) => age_from_number(n),
        Some(_) => Err(ValidationError::not_a_number(AGE)),
        None => Err(ValidationError::required(AGE)),
    }
}

fn age_from_number(n: &Number) -> ValidationResult<u8> {
    if let Some(i) = n.as_i64() {
        return age_in_range(i);
    }

    // Only integers beyond i64::MAX end up here
    if n.is_u64() {
        return Err(ValidationError::above_max(AGE, AGE_MAX));
    }

    let f = n
        .as_f64()
        .ok_or_else(|| ValidationError::not_a_number(AGE))?;
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(ValidationError::not_an_integer(AGE));
    }

    // Float to int casts saturate, which keeps out-of-range values out of range
    age_in_range(f as i64)
}

fn age_in_range(age: i64) -> ValidationResult<u8> {
    if age < AGE_MIN {
        return Err(ValidationError::below_min(AGE, AGE_MIN));
    }
    if age > AGE_MAX {
        return Err(ValidationError::above_max(AGE, AGE_MAX));
    }
    u8::try_from(age).map_err(|_| ValidationError::above_max(AGE, AGE_MAX))
}
