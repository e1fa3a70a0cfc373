//! Staff Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Staff UUID
pub type StaffUuid = TypedUuid<StaffMember>;

/// Name given to the fallback cashier.
pub const DEFAULT_STAFF_NAME: &str = "Demo Employee";

/// Role given to the fallback cashier.
pub const DEFAULT_STAFF_ROLE: &str = "Cashier";

/// Role and employment status, stored together as one JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHistory {
    pub role: String,
    pub active: bool,
}

/// Someone who can ring up orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub uuid: Option<StaffUuid>,
    pub name: String,
    pub hired_on: Date,
    pub work_history: WorkHistory,
}

impl StaffMember {
    /// An active, unsaved staff member.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>, hired_on: Date) -> Self {
        Self {
            uuid: None,
            name: name.into(),
            hired_on,
            work_history: WorkHistory {
                role: role.into(),
                active: true,
            },
        }
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.work_history.role
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.work_history.active
    }
}
