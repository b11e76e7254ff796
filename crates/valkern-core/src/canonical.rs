//! Canonical string codec.
//!
//! A value with a canonical form renders as a fixed positional template:
//! one zero-padded, fixed-width decimal group per integer key field, joined
//! by a single delimiter. For a three-group identifier with widths 3, 3, 4
//! and `-` the grammar is exactly `DDD-DDD-DDDD`.
//!
//! Parsing validates the whole input against the template before extracting
//! anything. A prefix match is a failure: `123-123` is not a partial
//! `DDD-DDD-DDDD`. The extracted groups then go through the type's normal
//! validating constructor.

use crate::error::{CoreError, SchemaError};
use crate::field::{FieldKind, FieldValue, ValueType};

/// Widest group that still fits in an `i64`.
pub const MAX_GROUP_WIDTH: usize = 18;

/// Fixed-width positional template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    widths: &'static [usize],
    delimiter: char,
}

impl Template {
    pub const fn new(widths: &'static [usize], delimiter: char) -> Self {
        Self { widths, delimiter }
    }

    pub const fn widths(&self) -> &'static [usize] {
        self.widths
    }

    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    pub const fn group_count(&self) -> usize {
        self.widths.len()
    }

    /// Length in bytes of every string matching the template.
    pub fn encoded_len(&self) -> usize {
        let digits: usize = self.widths.iter().sum();
        digits + self.widths.len().saturating_sub(1) * self.delimiter.len_utf8()
    }

    /// Human-readable grammar, e.g. `DDD-DDD-DDDD`.
    pub fn pattern(&self) -> String {
        self.widths
            .iter()
            .map(|w| "D".repeat(*w))
            .collect::<Vec<_>>()
            .join(&self.delimiter.to_string())
    }

    /// Largest value group `index` can hold, or `None` if there is no such
    /// group.
    pub fn max_value(&self, index: usize) -> Option<i64> {
        let width = *self.widths.get(index)?;
        let width = u32::try_from(width.min(MAX_GROUP_WIDTH)).ok()?;
        Some(10i64.pow(width) - 1)
    }

    /// Check that `value` fits group `index`.
    ///
    /// Constructors call this so that every constructible value formats to a
    /// string its own parser accepts.
    pub fn check_group(&self, index: usize, field: &'static str, value: i64) -> Result<(), CoreError> {
        let max = self.max_value(index).ok_or_else(|| CoreError::InvalidField {
            field,
            reason: format!("no canonical group {}", index),
        })?;
        if !(0..=max).contains(&value) {
            return Err(CoreError::InvalidField {
                field,
                reason: format!("{} is outside 0..={}", value, max),
            });
        }
        Ok(())
    }

    /// Render groups into the canonical string.
    pub fn render(&self, groups: &[i64]) -> String {
        let mut out = String::with_capacity(self.encoded_len());
        for (i, (value, width)) in groups.iter().zip(self.widths).enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            out.push_str(&format!("{:0width$}", value, width = *width));
        }
        out
    }

    /// Validate `input` against the full template and extract its groups.
    pub fn split(&self, input: &str) -> Result<Vec<i64>, CoreError> {
        let malformed = |reason: String| CoreError::MalformedInput {
            input: input.to_string(),
            reason,
        };

        if input.len() != self.encoded_len() {
            return Err(malformed(format!(
                "expected {} ({} bytes), got {} bytes",
                self.pattern(),
                self.encoded_len(),
                input.len()
            )));
        }

        let mut groups = Vec::with_capacity(self.widths.len());
        let mut rest = input;
        for (i, width) in self.widths.iter().enumerate() {
            if i > 0 {
                rest = rest
                    .strip_prefix(self.delimiter)
                    .ok_or_else(|| malformed(format!("expected {:?} before group {}", self.delimiter, i)))?;
            }
            let digits = rest
                .get(..*width)
                .filter(|g| g.bytes().all(|b| b.is_ascii_digit()))
                .ok_or_else(|| malformed(format!("group {} must be {} ASCII digits", i, width)))?;
            let value = digits
                .parse::<i64>()
                .map_err(|e| malformed(format!("group {}: {}", i, e)))?;
            groups.push(value);
            rest = &rest[*width..];
        }

        if !rest.is_empty() {
            return Err(malformed("trailing characters".into()));
        }
        Ok(groups)
    }
}

/// A value type with a canonical string form.
pub trait CanonicalForm: ValueType {
    const TEMPLATE: Template;

    /// Build a value from parsed groups, in key-field order.
    ///
    /// Must go through the same validation as every other constructor.
    fn from_groups(groups: &[i64]) -> Result<Self, CoreError>;
}

/// Canonical string of a value.
///
/// # Panics
///
/// If [`try_format`] fails: the declaration does not pass
/// [`validate_template`], or a key field does not fit its group. Values
/// whose constructors apply [`Template::check_group`] never panic.
pub fn format<T: CanonicalForm>(value: &T) -> String {
    match try_format(value) {
        Ok(text) => text,
        Err(e) => panic!("{} has no canonical form: {}", T::TYPE_NAME, e),
    }
}

/// Canonical string of a value, checking the declaration and every group.
///
/// Fails with `Schema` when the template does not fit the key fields and
/// with `InvalidField` when a value is out of its group's range. Nothing
/// is rendered unless every group fits.
pub fn try_format<T: CanonicalForm>(value: &T) -> Result<String, CoreError> {
    validate_template::<T>()?;
    let mut groups = Vec::with_capacity(T::TEMPLATE.group_count());
    for (index, field) in T::KEY_FIELDS.iter().enumerate() {
        let n = match field.read(value) {
            FieldValue::Int(n) => n,
            other => {
                return Err(CoreError::InvalidField {
                    field: field.name(),
                    reason: format!("{:?} is not an integer group", other),
                })
            }
        };
        T::TEMPLATE.check_group(index, field.name(), n)?;
        groups.push(n);
    }
    Ok(T::TEMPLATE.render(&groups))
}

/// Parse a canonical string.
///
/// Fails with `MalformedInput` unless the whole input matches the template,
/// and with `Schema` when the template does not fit the key fields.
pub fn parse<T: CanonicalForm>(input: &str) -> Result<T, CoreError> {
    validate_template::<T>()?;
    let groups = T::TEMPLATE.split(input)?;
    T::from_groups(&groups)
}

/// Check that a template fits its type's key fields.
pub fn validate_template<T: CanonicalForm>() -> Result<(), SchemaError> {
    let template = T::TEMPLATE;
    let invalid = |reason: String| SchemaError::InvalidTemplate {
        domain: T::TYPE_NAME,
        reason,
    };

    if template.delimiter.is_ascii_digit() || !template.delimiter.is_ascii() {
        return Err(invalid(format!(
            "delimiter {:?} must be ASCII and not a digit",
            template.delimiter
        )));
    }
    if let Some(w) = template
        .widths
        .iter()
        .find(|w| **w == 0 || **w > MAX_GROUP_WIDTH)
    {
        return Err(invalid(format!(
            "group width {} is outside 1..={}",
            w, MAX_GROUP_WIDTH
        )));
    }
    if template.group_count() != T::KEY_FIELDS.len() {
        return Err(SchemaError::TemplateMismatch {
            domain: T::TYPE_NAME,
            reason: format!(
                "{} groups for {} key fields",
                template.group_count(),
                T::KEY_FIELDS.len()
            ),
        });
    }
    if let Some(field) = T::KEY_FIELDS.iter().find(|f| f.kind() != FieldKind::Int) {
        return Err(SchemaError::TemplateMismatch {
            domain: T::TYPE_NAME,
            reason: format!("key field {} is not an integer", field.name()),
        });
    }
    Ok(())
}
