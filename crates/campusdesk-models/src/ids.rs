//! Strongly-typed ID newtypes for backend entities.
//!
//! The backend keys every record with a positive integer. Wrapping each in its
//! own newtype prevents passing a `ProgramId` where a `CohortId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_models::ids::{DepartmentId, ProgramId};
//!
//! fn load(id: DepartmentId) { /* ... */ }
//!
//! load(DepartmentId::new(7));     // OK
//! // load(ProgramId::new(7));     // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed integer ID newtype.
///
/// Generated types serialize transparently as JSON integers and display as
/// the bare number, so they drop straight into URL paths and query strings.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// ID of a college (tenant).
    CollegeId
);

define_id!(
    /// ID of a department within a college.
    DepartmentId
);

define_id!(
    /// ID of an academic program offered by a department.
    ProgramId
);

define_id!(
    /// ID of a cohort (yearly intake) of a program.
    CohortId
);

define_id!(
    /// ID of a class section within a cohort.
    ClassId
);

define_id!(UserId);

define_id!(AlertId);

define_id!(GroupId);
