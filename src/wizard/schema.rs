//! Step schemas and field validation
//!
//! A [`Schema`] lists the fields a step accepts. Each field has a kind (the
//! format it must match) and a requirement. Conditional requirements only
//! ever look at the record being validated, never at other steps.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::form::{is_absent, StepData};

/// The 26 Swiss canton abbreviations
pub const CANTONS: &[&str] = &[
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH",
];

/// Format a date must be entered in
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MSG_REQUIRED: &str = "This field is required";
const MSG_UNKNOWN: &str = "Unknown field";

/// What a field's value must look like
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free text up to a maximum number of characters
    Text { max_len: usize },
    /// E-mail address
    Email,
    /// Swiss postal code (NPA), four digits between 1000 and 9699
    SwissPostalCode,
    /// Swiss phone number, national or international notation
    SwissPhone,
    /// Calendar date in `YYYY-MM-DD`
    Date,
    /// http or https URL
    Url,
    /// Yes/no answer
    Boolean,
    /// Checkbox that must be ticked
    Accepted,
    /// Whole number within an inclusive range
    Integer { min: i64, max: i64 },
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
    /// List of nested records, each validated against its own schema
    Records { schema: Box<Schema>, min_items: usize },
}

/// When a field must be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    /// Required only when the named boolean field of the same record is `true`
    RequiredWhen(&'static str),
}

/// A single field of a step schema
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
}

impl FieldRule {
    /// A field that must always be answered
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Required,
        }
    }

    /// A field that may be left empty
    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::Optional,
        }
    }

    /// A field required only when `flag` is `true` in the same record
    pub fn required_when(name: &'static str, kind: FieldKind, flag: &'static str) -> Self {
        Self {
            name,
            kind,
            requirement: Requirement::RequiredWhen(flag),
        }
    }

    fn is_required(&self, data: &StepData) -> bool {
        match self.requirement {
            Requirement::Required => true,
            Requirement::Optional => false,
            Requirement::RequiredWhen(flag) => matches!(data.get(flag), Some(Value::Bool(true))),
        }
    }
}

/// Checks spanning two fields of the same record
#[derive(Debug, Clone)]
pub enum CrossCheck {
    /// `field` must not be an earlier date than `earlier`
    DateNotBefore {
        field: &'static str,
        earlier: &'static str,
    },
}

/// Validation rules for one step's record
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldRule>,
    checks: Vec<CrossCheck>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field rule
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Add a cross-field check
    pub fn check(mut self, check: CrossCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Field rules in declaration order
    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    /// Names of the fields that are always required
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|rule| rule.requirement == Requirement::Required)
            .map(|rule| rule.name)
            .collect()
    }

    /// Validate a record against this schema
    pub fn validate(&self, data: &StepData) -> StepValidation {
        let mut errors = BTreeMap::new();
        self.collect_errors(data, "", &mut errors);
        StepValidation::from_errors(errors)
    }

    fn collect_errors(&self, data: &StepData, prefix: &str, errors: &mut BTreeMap<String, String>) {
        for name in data.keys() {
            if !self.fields.iter().any(|rule| rule.name == name.as_str()) {
                errors.insert(format!("{prefix}{name}"), MSG_UNKNOWN.to_string());
            }
        }

        for rule in &self.fields {
            let path = format!("{prefix}{}", rule.name);
            let value = data.get(rule.name);

            if is_absent(value) {
                if rule.is_required(data) {
                    errors.insert(path, MSG_REQUIRED.to_string());
                }
                continue;
            }

            if let Some(value) = value {
                check_value(&rule.kind, value, &path, errors);
            }
        }

        for check in &self.checks {
            match check {
                CrossCheck::DateNotBefore { field, earlier } => {
                    let path = format!("{prefix}{field}");
                    if errors.contains_key(&path) {
                        continue;
                    }
                    if let (Some(later), Some(first)) = (date_of(data, field), date_of(data, earlier))
                    {
                        if later < first {
                            errors.insert(path, format!("Must not be before {earlier}"));
                        }
                    }
                }
            }
        }
    }
}

fn date_of(data: &StepData, field: &str) -> Option<NaiveDate> {
    data.get(field)
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
}

fn check_value(kind: &FieldKind, value: &Value, path: &str, errors: &mut BTreeMap<String, String>) {
    let problem = match kind {
        FieldKind::Text { max_len } => match value.as_str() {
            Some(s) if s.trim().chars().count() > *max_len => {
                Some(format!("Must be at most {max_len} characters"))
            }
            Some(_) => None,
            None => Some("Must be text".to_string()),
        },
        FieldKind::Email => text_matching(value, email_re(), "Enter a valid e-mail address"),
        FieldKind::SwissPostalCode => match value.as_str() {
            Some(s) if is_swiss_postal_code(s) => None,
            _ => Some("Enter a valid Swiss postal code (4 digits)".to_string()),
        },
        FieldKind::SwissPhone => match value.as_str() {
            Some(s) if is_swiss_phone(s) => None,
            _ => Some("Enter a valid Swiss phone number".to_string()),
        },
        FieldKind::Date => match value.as_str() {
            Some(s) if NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).is_ok() => None,
            _ => Some("Enter a date as YYYY-MM-DD".to_string()),
        },
        FieldKind::Url => text_matching(value, url_re(), "Enter a valid http(s) URL"),
        FieldKind::Boolean => match value {
            Value::Bool(_) => None,
            _ => Some("Must be yes or no".to_string()),
        },
        FieldKind::Accepted => match value {
            Value::Bool(true) => None,
            _ => Some("Must be accepted".to_string()),
        },
        FieldKind::Integer { min, max } => match value.as_i64() {
            Some(n) if n < *min || n > *max => Some(format!("Must be between {min} and {max}")),
            Some(_) => None,
            None => Some("Must be a whole number".to_string()),
        },
        FieldKind::Choice(options) => match value.as_str() {
            Some(s) if options.contains(&s) => None,
            _ => Some(format!("Must be one of: {}", options.join(", "))),
        },
        FieldKind::Records { schema, min_items } => match value.as_array() {
            Some(items) if items.len() < *min_items => {
                Some(format!("Add at least {min_items} entry"))
            }
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item.as_object() {
                        Some(record) => {
                            schema.collect_errors(record, &format!("{item_path}."), errors)
                        }
                        None => {
                            errors.insert(item_path, "Must be a record".to_string());
                        }
                    }
                }
                None
            }
            None => Some("Must be a list".to_string()),
        },
    };

    if let Some(message) = problem {
        errors.insert(path.to_string(), message);
    }
}

fn text_matching(value: &Value, re: &Regex, message: &str) -> Option<String> {
    match value.as_str() {
        Some(s) if re.is_match(s.trim()) => None,
        _ => Some(message.to_string()),
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://[^\s/?#]+\.[^\s/?#]+(?:[/?#]\S*)?$").expect("url pattern"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\+41|0041|0)[1-9][0-9]{8}$").expect("phone pattern"))
}

/// Check a Swiss postal code (NPA)
pub fn is_swiss_postal_code(raw: &str) -> bool {
    let raw = raw.trim();
    raw.len() == 4
        && raw.chars().all(|c| c.is_ascii_digit())
        && raw
            .parse::<u16>()
            .map(|code| (1000..=9699).contains(&code))
            .unwrap_or(false)
}

/// Check a Swiss phone number
///
/// Spaces, dots, dashes and parentheses are ignored, so `079 123 45 67`,
/// `+41 79 123 45 67` and `0041791234567` are all accepted.
pub fn is_swiss_phone(raw: &str) -> bool {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '(' | ')'))
        .collect();
    phone_re().is_match(&compact)
}

/// Outcome of validating one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidation {
    pub valid: bool,
    /// Field path -> message. Nested records use `list[index].field`.
    pub errors: BTreeMap<String, String>,
}

impl StepValidation {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }

    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Message for a field, if it failed
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

impl fmt::Display for StepValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "valid");
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
