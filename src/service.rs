//! Caller-side conventions on top of [`ParcelStore`]: timestamps on
//! registration and forward-only status progression.

use chrono::{SecondsFormat, Utc};

use crate::error::{ParcelError, Result};
use crate::parcel::{Parcel, ParcelStatus};
use crate::sqlite::ParcelStore;

#[derive(Debug, Clone, Copy)]
pub struct ParcelService<'conn> {
    store: ParcelStore<'conn>,
}

impl<'conn> ParcelService<'conn> {
    pub fn new(store: ParcelStore<'conn>) -> Self {
        Self { store }
    }

    /// Stores a new `registered` parcel stamped with the current UTC time.
    pub fn register(&self, client: i64, address: &str) -> Result<Parcel> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut parcel = Parcel::new(client, ParcelStatus::Registered, address, created_at);
        parcel.number = self.store.add(&parcel)?;
        tracing::info!(number = parcel.number, client, "parcel registered");
        Ok(parcel)
    }

    pub fn client_parcels(&self, client: i64) -> Result<Vec<Parcel>> {
        self.store.get_by_client(client)
    }

    /// Moves the parcel one step along `registered -> sent -> delivered`.
    pub fn next_status(&self, number: i64) -> Result<ParcelStatus> {
        let parcel = self.store.get(number)?;
        let next = parcel
            .parsed_status()
            .ok()
            .and_then(ParcelStatus::next)
            .ok_or_else(|| ParcelError::InvalidTransition {
                number,
                status: parcel.status.clone(),
            })?;
        self.store.set_status(number, next.as_str())?;
        tracing::info!(number, status = %next, "parcel status advanced");
        Ok(next)
    }

    /// Returns false when the parcel is missing or no longer `registered`.
    pub fn change_address(&self, number: i64, address: &str) -> Result<bool> {
        let applied = self.store.set_address(number, address)? > 0;
        if !applied {
            tracing::warn!(number, "address change skipped: parcel missing or not registered");
        }
        Ok(applied)
    }

    /// Returns false when the parcel is missing or no longer `registered`.
    pub fn delete(&self, number: i64) -> Result<bool> {
        let removed = self.store.delete(number)? > 0;
        if !removed {
            tracing::warn!(number, "delete skipped: parcel missing or not registered");
        }
        Ok(removed)
    }
}
