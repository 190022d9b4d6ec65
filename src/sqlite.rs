use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{ParcelError, Result};
use crate::parcel::{Parcel, ParcelStatus};
use crate::schema::parcel_table;

const SELECT_BY_NUMBER: &str =
    "SELECT number, client, status, address, created_at FROM parcel WHERE number = :number";
const SELECT_BY_CLIENT: &str = "SELECT number, client, status, address, created_at FROM parcel \
     WHERE client = :client ORDER BY number";

/// Typed accessors over the `parcel` table.
///
/// Borrows the caller's connection; holds no other state. Every method is a
/// single statement, so atomicity is whatever SQLite gives one statement.
#[derive(Debug, Clone, Copy)]
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Creates the `parcel` table if it does not exist yet.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(&parcel_table().create_sql())?;
        tracing::info!("parcel schema ready");
        Ok(())
    }

    /// Inserts `parcel` and returns the number assigned to it.
    ///
    /// `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO parcel (client, status, address, created_at) \
             VALUES (:client, :status, :address, :created_at)",
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status,
                ":address": parcel.address,
                ":created_at": parcel.created_at,
            },
        )?;
        let number = self.conn.last_insert_rowid();
        tracing::debug!(number, client = parcel.client, "parcel added");
        Ok(number)
    }

    /// Fails with [`ParcelError::NotFound`] when no row has `number`.
    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(SELECT_BY_NUMBER, named_params! { ":number": number }, parcel_from_row)
            .optional()?
            .ok_or(ParcelError::NotFound(number))
    }

    /// All parcels of `client` in insertion order; empty when there are none.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(SELECT_BY_CLIENT)?;
        let rows = stmt.query_map(named_params! { ":client": client }, parcel_from_row)?;
        let parcels = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(client, count = parcels.len(), "parcels loaded");
        Ok(parcels)
    }

    /// Overwrites the status without validating the value or the transition.
    ///
    /// Returns the number of affected rows (0 when `number` does not exist).
    pub fn set_status(&self, number: i64, status: &str) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number",
            named_params! { ":status": status, ":number": number },
        )?;
        tracing::debug!(number, status, affected, "parcel status set");
        Ok(affected)
    }

    /// Overwrites the address only while the parcel is `registered`.
    ///
    /// A guard miss is not an error: the call returns `Ok(0)` both for an
    /// unknown number and for a parcel past `registered`.
    pub fn set_address(&self, number: i64, address: &str) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE parcel SET address = :address WHERE number = :number AND status = :status",
            named_params! {
                ":address": address,
                ":number": number,
                ":status": ParcelStatus::REGISTERED,
            },
        )?;
        tracing::debug!(number, affected, "parcel address set");
        Ok(affected)
    }

    /// Deletes the parcel only while it is `registered`. Same `Ok(0)` rules
    /// as [`ParcelStore::set_address`].
    pub fn delete(&self, number: i64) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM parcel WHERE number = :number AND status = :status",
            named_params! { ":number": number, ":status": ParcelStatus::REGISTERED },
        )?;
        tracing::debug!(number, affected, "parcel deleted");
        Ok(affected)
    }
}

fn parcel_from_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get(0)?,
        client: row.get(1)?,
        status: row.get(2)?,
        address: row.get(3)?,
        created_at: row.get(4)?,
    })
}
