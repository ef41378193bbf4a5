use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::{DomainError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Trainer,
    Attendee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Trainer => write!(f, "trainer"),
            UserRole::Attendee => write!(f, "attendee"),
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainer" => Ok(UserRole::Trainer),
            "attendee" => Ok(UserRole::Attendee),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// An authenticated user, as handed over by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }

        Ok(Self {
            id,
            name: name.into(),
            role,
        })
    }

    pub fn is_trainer(&self) -> bool {
        self.role == UserRole::Trainer
    }
}
