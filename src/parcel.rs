use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParcelError;

/// Lifecycle marker for a parcel.
///
/// The table stores the status as free text; this enum is the validated view
/// used at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    Registered,
    Sent,
    Delivered,
}

impl ParcelStatus {
    pub const REGISTERED: &'static str = "registered";
    pub const SENT: &'static str = "sent";
    pub const DELIVERED: &'static str = "delivered";

    pub fn as_str(self) -> &'static str {
        match self {
            ParcelStatus::Registered => Self::REGISTERED,
            ParcelStatus::Sent => Self::SENT,
            ParcelStatus::Delivered => Self::DELIVERED,
        }
    }

    /// Forward progression `registered -> sent -> delivered`.
    pub fn next(self) -> Option<ParcelStatus> {
        match self {
            ParcelStatus::Registered => Some(ParcelStatus::Sent),
            ParcelStatus::Sent => Some(ParcelStatus::Delivered),
            ParcelStatus::Delivered => None,
        }
    }
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParcelStatus {
    type Err = ParcelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::REGISTERED => Ok(ParcelStatus::Registered),
            Self::SENT => Ok(ParcelStatus::Sent),
            Self::DELIVERED => Ok(ParcelStatus::Delivered),
            other => Err(ParcelError::UnknownStatus(other.to_string())),
        }
    }
}

/// A row of the `parcel` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by the store on insert; ignored by [`crate::ParcelStore::add`].
    pub number: i64,
    pub client: i64,
    pub status: String,
    pub address: String,
    /// RFC3339 timestamp.
    pub created_at: String,
}

impl Parcel {
    /// Builds an unsaved parcel (number 0).
    pub fn new(
        client: i64,
        status: ParcelStatus,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: status.as_str().to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    pub fn parsed_status(&self) -> Result<ParcelStatus, ParcelError> {
        self.status.parse()
    }
}
