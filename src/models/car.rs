//! Car models for database operations.
//!
//! A car is identified by a store-assigned id and a registration number,
//! and carries one of three workshop statuses.

use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

// ============================================================================
// Enums
// ============================================================================

/// Workshop status of a car.
///
/// Stored and serialised as the upper-case literal (`ENTRY`, `IN_SERVICE`,
/// `COMPLETED`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    /// Car has arrived at the garage
    Entry,
    /// Car is being worked on
    InService,
    /// Car is ready for pickup
    Completed,
}

impl CarStatus {
    /// Statuses a car may be moved to by a status update.
    pub const UPDATE_TARGETS: [CarStatus; 2] = [CarStatus::InService, CarStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Entry => "ENTRY",
            CarStatus::InService => "IN_SERVICE",
            CarStatus::Completed => "COMPLETED",
        }
    }

    /// Whether this status is a valid target for a status update.
    ///
    /// `ENTRY` is only ever set when a car is added.
    pub fn is_update_target(&self) -> bool {
        Self::UPDATE_TARGETS.contains(self)
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values are: ENTRY, IN_SERVICE, COMPLETED",
            self.0
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for CarStatus {
    type Err = UnknownStatus;

    /// Parses the exact upper-case literal. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRY" => Ok(CarStatus::Entry),
            "IN_SERVICE" => Ok(CarStatus::InService),
            "COMPLETED" => Ok(CarStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl ToSql<Text, Pg> for CarStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for CarStatus {
    fn from_sql(bytes: <Pg as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse::<CarStatus>()
            .map_err(|e| format!("Unrecognized car status: {}", e.0).into())
    }
}

// ============================================================================
// Car
// ============================================================================

/// Car model for reading from database
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Car {
    pub id: i32,
    pub registration_number: String,
    pub status: CarStatus,
}

/// NewCar model for inserting new records
#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::cars)]
pub struct NewCar {
    pub registration_number: String,
    pub status: CarStatus,
}
