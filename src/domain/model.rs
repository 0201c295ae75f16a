use crate::utils::error::{EnrollError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl FromStr for Gender {
    type Err = EnrollError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(EnrollError::validation(
                "gender",
                format!("must be one of male, female, other (got {:?})", s),
            )),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

/// One participant's stored intake data plus an optional group tag.
///
/// The persisted form uses camelCase keys and never carries `group`: a
/// grouping is an ephemeral view computed per session, not a stored fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRecord {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attachment_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub group: Option<Group>,
}

/// Intake form values before a record is constructed from them.
#[derive(Debug, Clone)]
pub struct EnrollmentInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: i64,
    pub gender: Gender,
    pub attachment_name: Option<String>,
}

impl Validate for EnrollmentInput {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("phone", &self.phone)?;
        validate_non_empty_string("email", &self.email)?;
        validate_range("age", self.age, MIN_AGE, MAX_AGE)?;
        Ok(())
    }
}

/// Two-way partition of a roster snapshot, held in memory only.
#[derive(Debug, Clone, Default)]
pub struct GroupAssignment {
    pub group_a: Vec<EnrollmentRecord>,
    pub group_b: Vec<EnrollmentRecord>,
}

impl GroupAssignment {
    pub fn is_empty(&self) -> bool {
        self.group_a.is_empty() && self.group_b.is_empty()
    }

    pub fn len(&self) -> usize {
        self.group_a.len() + self.group_b.len()
    }
}
