//! Per-field validation errors in the `{ "field": ["message", ...] }` shape.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Key used for errors that are not tied to one input field.
    pub const NON_FIELD: &'static str = "non_field_errors";

    pub fn new() -> Self { Self::default() }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn has(&self, field: &str) -> bool { self.0.contains_key(field) }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for m in messages {
                if !first { f.write_str("; ")?; }
                write!(f, "{}: {}", field, m)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Trimmed, non-blank text no longer than `max_chars`; records an error otherwise.
pub fn required_text(errors: &mut FieldErrors, field: &str, value: Option<&str>, max_chars: Option<usize>) -> Option<String> {
    let Some(raw) = value else {
        errors.add(field, REQUIRED);
        return None;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    if let Some(max) = max_chars {
        if trimmed.chars().count() > max {
            errors.add(field, format!("Ensure this field has no more than {} characters.", max));
            return None;
        }
    }
    Some(trimmed.to_string())
}

pub fn required<T>(errors: &mut FieldErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, REQUIRED);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_map() {
        let mut e = FieldErrors::new();
        e.add("password", "too short");
        e.add("password", "needs digit");
        e.add("email", "taken");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json, serde_json::json!({"email": ["taken"], "password": ["too short", "needs digit"]}));
        assert_eq!(e.to_string(), "email: taken; password: too short; password: needs digit");
    }

    #[test]
    fn required_text_trims_and_checks() {
        let mut e = FieldErrors::new();
        assert_eq!(required_text(&mut e, "a", Some("  hi "), Some(5)), Some("hi".to_string()));
        assert_eq!(required_text(&mut e, "b", None, None), None);
        assert_eq!(required_text(&mut e, "c", Some("   "), None), None);
        assert_eq!(required_text(&mut e, "d", Some("toolong"), Some(3)), None);
        assert_eq!(e.get("b"), Some(&[REQUIRED.to_string()][..]));
        assert_eq!(e.get("c"), Some(&[BLANK.to_string()][..]));
        assert!(e.get("d").unwrap()[0].contains("no more than 3"));
        assert!(!e.has("a"));
        assert!(e.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
