//! # Access Control
//!
//! Two-tier policy over a single admin identity:
//!
//! | Operation | Policy |
//! |-----------|--------|
//! | `addFoodEntry`, `getFoodEntries` | self-only: `caller == target` |
//! | `getUserDailyCalorieThreshold`, `setUserDailyCalorieThreshold` | admin-only |
//! | `getEntriesLastTwoWeeks`, `getAverageCalories` | admin-only |
//!
//! The admin gets no implicit self-service rights over other users' ledgers,
//! and users get no admin rights over their own configuration.

use super::errors::DiaryError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

/// Privileged operations checked by the access controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Append to the caller's ledger.
    AddFoodEntry,
    /// Read the caller's ledger.
    GetFoodEntries,
    /// Two-week entry counts.
    GetEntriesLastTwoWeeks,
    /// Overwrite a user's threshold.
    SetUserDailyCalorieThreshold,
    /// Read a user's threshold.
    GetUserDailyCalorieThreshold,
    /// N-day average calories.
    GetAverageCalories,
}

/// Who may perform an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Only the target itself.
    SelfOnly,
    /// Only the admin identity.
    AdminOnly,
}

impl Operation {
    /// Every operation, for exhaustive policy tests.
    pub const ALL: [Operation; 6] = [
        Operation::AddFoodEntry,
        Operation::GetFoodEntries,
        Operation::GetEntriesLastTwoWeeks,
        Operation::SetUserDailyCalorieThreshold,
        Operation::GetUserDailyCalorieThreshold,
        Operation::GetAverageCalories,
    ];

    /// The policy governing this operation.
    #[must_use]
    pub const fn policy(self) -> AccessPolicy {
        match self {
            Self::AddFoodEntry | Self::GetFoodEntries => AccessPolicy::SelfOnly,
            Self::GetEntriesLastTwoWeeks
            | Self::SetUserDailyCalorieThreshold
            | Self::GetUserDailyCalorieThreshold
            | Self::GetAverageCalories => AccessPolicy::AdminOnly,
        }
    }

    /// Name as exposed at the boundary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddFoodEntry => "addFoodEntry",
            Self::GetFoodEntries => "getFoodEntries",
            Self::GetEntriesLastTwoWeeks => "getEntriesLastTwoWeeks",
            Self::SetUserDailyCalorieThreshold => "setUserDailyCalorieThreshold",
            Self::GetUserDailyCalorieThreshold => "getUserDailyCalorieThreshold",
            Self::GetAverageCalories => "getAverageCalories",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates caller/target pairs against the policy table.
///
/// The admin identity is fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct AccessController {
    admin: Address,
}

impl AccessController {
    /// Create a controller for the given admin.
    #[must_use]
    pub const fn new(admin: Address) -> Self {
        Self { admin }
    }

    /// The admin identity.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns true if `caller` is the admin.
    #[must_use]
    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.admin
    }

    /// Check whether `caller` may perform `operation` against `target`.
    pub fn authorize(
        &self,
        caller: &Address,
        target: &Address,
        operation: Operation,
    ) -> Result<(), DiaryError> {
        let allowed = match operation.policy() {
            AccessPolicy::SelfOnly => caller == target,
            AccessPolicy::AdminOnly => self.is_admin(caller),
        };

        if allowed {
            Ok(())
        } else {
            Err(DiaryError::Forbidden {
                caller: *caller,
                operation,
            })
        }
    }
}
