//! `PhoneNumber`: a three-group numeric identifier wired through every
//! kernel contract.
//!
//! Canonical form is exactly `DDD-DDD-DDDD`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::canonical::{self, CanonicalForm, Template};
use crate::equality::{equals, ForeignRepresentation};
use crate::error::CoreError;
use crate::field::{KeyField, ValueType};
use crate::hash::{hash, HashCache};
use crate::ordering::{compare, OrderStep, Ordered};

/// Area code, prefix and line number.
#[derive(Clone)]
pub struct PhoneNumber {
    area_code: u16,
    prefix: u16,
    line_num: u16,
    hash: HashCache,
}

impl PhoneNumber {
    /// Build a phone number, rejecting groups that do not fit `DDD-DDD-DDDD`.
    pub fn new(area_code: u16, prefix: u16, line_num: u16) -> Result<Self, CoreError> {
        let template = Self::TEMPLATE;
        template.check_group(0, "area_code", area_code.into())?;
        template.check_group(1, "prefix", prefix.into())?;
        template.check_group(2, "line_num", line_num.into())?;
        Ok(Self {
            area_code,
            prefix,
            line_num,
            hash: HashCache::new(),
        })
    }

    pub fn area_code(&self) -> u16 {
        self.area_code
    }

    pub fn prefix(&self) -> u16 {
        self.prefix
    }

    pub fn line_num(&self) -> u16 {
        self.line_num
    }

    /// Parse `DDD-DDD-DDDD`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        canonical::parse(input)
    }
}

impl ValueType for PhoneNumber {
    const TYPE_NAME: &'static str = "PhoneNumber";
    const KEY_FIELDS: &'static [KeyField<Self>] = &[
        KeyField::int("area_code", |p| p.area_code.into()),
        KeyField::int("prefix", |p| p.prefix.into()),
        KeyField::int("line_num", |p| p.line_num.into()),
    ];

    fn hash_cache(&self) -> Option<&HashCache> {
        Some(&self.hash)
    }
}

impl Ordered for PhoneNumber {
    const ORDER: &'static [OrderStep<Self>] = &[
        OrderStep::int("area_code", |p| p.area_code.into()),
        OrderStep::int("prefix", |p| p.prefix.into()),
        OrderStep::int("line_num", |p| p.line_num.into()),
    ];
}

impl CanonicalForm for PhoneNumber {
    const TEMPLATE: Template = Template::new(&[3, 3, 4], '-');

    fn from_groups(groups: &[i64]) -> Result<Self, CoreError> {
        let group = |index: usize, field: &'static str| -> Result<u16, CoreError> {
            let raw = groups.get(index).copied().ok_or_else(|| CoreError::InvalidField {
                field,
                reason: "missing group".into(),
            })?;
            u16::try_from(raw).map_err(|e| CoreError::InvalidField {
                field,
                reason: e.to_string(),
            })
        };
        Self::new(
            group(0, "area_code")?,
            group(1, "prefix")?,
            group(2, "line_num")?,
        )
    }
}

impl ForeignRepresentation<str> for PhoneNumber {
    /// True when `raw` is the canonical form of a number equal to this one.
    fn equals_ignoring_foreign_representation(&self, raw: &str) -> bool {
        Self::parse(raw).is_ok_and(|other| equals(self, &other))
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(hash(self));
    }
}

impl PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical::format(self))
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneNumber({})", self)
    }
}

impl FromStr for PhoneNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
