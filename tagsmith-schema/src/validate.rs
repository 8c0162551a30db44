//! The validation engine.
//!
//! Rule order per field: required first (short-circuits), then — for
//! non-empty values — type check, length bounds, pattern, numeric bounds,
//! and finally a caller-supplied custom rule. All failure messages are
//! collected; the first doubles as the primary error.

use crate::{FieldDescriptor, FieldType};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tagsmith_types::{FieldValue, FormData};

/// Per-field validation verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// The primary (first) failure message.
    pub message: Option<String>,
    /// Every violated rule's message, in evaluation order.
    pub violations: Vec<String>,
}

impl ValidationResult {
    /// A passing verdict.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            violations: Vec::new(),
        }
    }

    fn fail(violations: Vec<String>) -> Self {
        Self {
            valid: false,
            message: violations.first().cloned(),
            violations,
        }
    }
}

/// Whole-form verdict: valid iff every evaluated field is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub valid: bool,
    /// Primary error message per failing field.
    pub errors: BTreeMap<String, String>,
}

/// A caller-supplied predicate, run after the built-in rules.
/// Returns a failure message when the value is rejected.
pub type CustomRule<'a> = &'a dyn Fn(&FieldValue) -> Option<String>;

/// Validates one value against its descriptor.
pub fn validate_field(descriptor: &FieldDescriptor, value: &FieldValue) -> ValidationResult {
    validate_field_with(descriptor, value, None)
}

/// Validates one value against its descriptor plus an optional custom rule.
pub fn validate_field_with(
    descriptor: &FieldDescriptor,
    value: &FieldValue,
    custom: Option<CustomRule<'_>>,
) -> ValidationResult {
    if value.is_empty() {
        if descriptor.required {
            return ValidationResult::fail(vec!["This field is required".to_string()]);
        }
        return ValidationResult::ok();
    }

    let mut violations = Vec::new();
    let rendered = value.render();

    if let Some(message) = type_violation(descriptor, value, &rendered) {
        violations.push(message);
    }

    let char_count = rendered.chars().count();
    if let Some(min) = descriptor.min_length {
        if char_count < min {
            violations.push(format!("Must be at least {min} characters"));
        }
    }
    if let Some(max) = descriptor.max_length {
        if char_count > max {
            violations.push(format!("Must be at most {max} characters"));
        }
    }

    // An unparsable configured pattern is a configuration bug; the check is
    // skipped rather than failing every value.
    if let Some(pattern) = &descriptor.pattern {
        if let Ok(re) = Regex::new(pattern) {
            if !re.is_match(&rendered) {
                violations.push("Does not match the required format".to_string());
            }
        }
    }

    if let Some(n) = numeric_value(value) {
        if let Some(min) = descriptor.min {
            if n < min {
                violations.push(format!("Must be at least {}", format_bound(min)));
            }
        }
        if let Some(max) = descriptor.max {
            if n > max {
                violations.push(format!("Must be at most {}", format_bound(max)));
            }
        }
    }

    if let Some(rule) = custom {
        if let Some(message) = rule(value) {
            violations.push(message);
        }
    }

    if violations.is_empty() {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(violations)
    }
}

/// Validates every visible descriptor against the form data.
///
/// Missing values are treated as empty; descriptors whose visibility
/// condition is unmet are skipped entirely.
pub fn validate_form(form: &FormData, descriptors: &[FieldDescriptor]) -> FormValidation {
    let empty = FieldValue::Text(String::new());
    let mut errors = BTreeMap::new();

    for descriptor in descriptors {
        if !descriptor.is_visible(form) {
            continue;
        }
        let value = form.get(&descriptor.name).unwrap_or(&empty);
        let result = validate_field(descriptor, value);
        if !result.valid {
            if let Some(message) = result.message {
                errors.insert(descriptor.name.clone(), message);
            }
        }
    }

    FormValidation {
        valid: errors.is_empty(),
        errors,
    }
}

// ── Type-specific checks ─────────────────────────────────────────

fn type_violation(
    descriptor: &FieldDescriptor,
    value: &FieldValue,
    rendered: &str,
) -> Option<String> {
    match descriptor.field_type {
        FieldType::Text | FieldType::Textarea => None,
        FieldType::Url => {
            // Structural check: unparsable URLs fail outright, not just on a
            // pattern mismatch.
            let ok = url::Url::parse(rendered)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                .unwrap_or(false);
            (!ok).then(|| "Must be a valid URL".to_string())
        }
        FieldType::Email => {
            (!email_re().is_match(rendered)).then(|| "Must be a valid email address".to_string())
        }
        FieldType::Number => {
            numeric_value(value).is_none().then(|| "Must be a number".to_string())
        }
        FieldType::Select => match &descriptor.options {
            Some(options) if !options.iter().any(|o| o == rendered) => {
                Some("Must be one of the listed options".to_string())
            }
            _ => None,
        },
        FieldType::Checkbox => match value {
            FieldValue::Flag(_) => None,
            _ if rendered == "true" || rendered == "false" => None,
            _ => Some("Must be a checkbox value".to_string()),
        },
        FieldType::Color => {
            (!color_re().is_match(rendered)).then(|| "Must be a hex color".to_string())
        }
        FieldType::Date => NaiveDate::parse_from_str(rendered, "%Y-%m-%d")
            .is_err()
            .then(|| "Must be a date in YYYY-MM-DD format".to_string()),
    }
}

fn numeric_value(value: &FieldValue) -> Option<f64> {
    value
        .as_number()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn format_bound(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Conventional fallback email shape: something@something.tld.
fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex")
    })
}
