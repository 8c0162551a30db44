use serde::{Deserialize, Serialize};
use tagsmith_types::FormData;

/// Describes one form input: its type, constraints, and visibility.
///
/// Loaded once from the field-definition configuration blob. Constraint
/// fields that do not apply to a type are simply absent in the JSON
/// representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique field key, e.g. `og_title`.
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Minimum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Numeric upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regex the rendered value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Allowed values. Only meaningful when the type is Select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Visibility rule; a hidden field is skipped by form validation and
    /// excluded from generation snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<FieldCondition>,
}

impl FieldDescriptor {
    fn simple(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            pattern: None,
            options: None,
            condition: None,
        }
    }

    /// Shorthand for a single-line text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldType::Text)
    }

    /// Shorthand for a multi-line text field.
    pub fn textarea(name: &str) -> Self {
        Self::simple(name, FieldType::Textarea)
    }

    /// Shorthand for a URL field.
    pub fn url(name: &str) -> Self {
        Self::simple(name, FieldType::Url)
    }

    /// Shorthand for an email field.
    pub fn email(name: &str) -> Self {
        Self::simple(name, FieldType::Email)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number)
    }

    /// Shorthand for a select field with fixed options.
    pub fn select(name: &str, options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Self::simple(name, FieldType::Select)
        }
    }

    /// Shorthand for a checkbox field.
    pub fn checkbox(name: &str) -> Self {
        Self::simple(name, FieldType::Checkbox)
    }

    /// Shorthand for a color field (`#RGB` / `#RRGGBB`).
    pub fn color(name: &str) -> Self {
        Self::simple(name, FieldType::Color)
    }

    /// Shorthand for a date field (`YYYY-MM-DD`).
    pub fn date(name: &str) -> Self {
        Self::simple(name, FieldType::Date)
    }

    /// Marks the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets text length bounds.
    #[must_use]
    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Sets numeric bounds.
    #[must_use]
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets a regex the rendered value must match.
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Makes visibility depend on another field's value.
    #[must_use]
    pub fn visible_when(mut self, field: &str, value: &str) -> Self {
        self.condition = Some(FieldCondition {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Whether this field is currently visible given the form data.
    ///
    /// Fields without a condition are always visible.
    #[must_use]
    pub fn is_visible(&self, form: &FormData) -> bool {
        match &self.condition {
            Some(cond) => cond.is_met(form),
            None => true,
        }
    }
}

/// The input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Url,
    Email,
    Number,
    Select,
    Checkbox,
    Color,
    Date,
}

/// A conditional-visibility rule: the named field must hold exactly the
/// expected value (compared on the rendered string form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    /// The controlling field.
    pub field: String,
    /// The value the controlling field must hold.
    pub value: String,
}

impl FieldCondition {
    /// Whether the condition is satisfied by the given form data.
    #[must_use]
    pub fn is_met(&self, form: &FormData) -> bool {
        form.get(&self.field)
            .is_some_and(|v| v.render() == self.value)
    }
}
