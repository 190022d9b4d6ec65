use std::collections::HashSet;

use anyhow::Result;
use parcel_store::{Parcel, ParcelError, ParcelStatus, ParcelStore, ParcelStoreConfig};
use rusqlite::Connection;
use tempfile::NamedTempFile;

// Helper function to create an in-memory database for testing
fn create_test_db() -> Result<Connection> {
    Ok(ParcelStoreConfig::in_memory().open()?)
}

// Helper function to create a temporary file-based database
fn create_temp_db() -> Result<(Connection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let conn = ParcelStoreConfig::new(temp_file.path()).open()?;
    Ok((conn, temp_file))
}

fn test_parcel() -> Parcel {
    Parcel::new(1000, ParcelStatus::Registered, "test", "2024-03-01T10:00:00Z")
}

#[test]
fn test_add_get_delete() -> Result<()> {
    let (conn, _file) = create_temp_db()?;
    let store = ParcelStore::new(&conn);
    let mut parcel = test_parcel();

    let number = store.add(&parcel)?;
    assert!(number > 0);
    parcel.number = number;

    let stored = store.get(number)?;
    assert_eq!(stored, parcel);

    assert_eq!(store.delete(number)?, 1);
    let err = store.get(number).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, ParcelError::NotFound(n) if n == number));
    Ok(())
}

#[test]
fn test_numbers_are_not_reused() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);

    let first = store.add(&test_parcel())?;
    store.delete(first)?;
    let second = store.add(&test_parcel())?;
    assert!(second > first);
    Ok(())
}

#[test]
fn test_set_address() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;

    assert_eq!(store.set_address(number, "new test address")?, 1);
    assert_eq!(store.get(number)?.address, "new test address");
    Ok(())
}

#[test]
fn test_set_address_ignored_after_registered() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;
    store.set_status(number, ParcelStatus::SENT)?;

    // Guard miss still reports success; only the row count tells.
    assert_eq!(store.set_address(number, "elsewhere")?, 0);
    assert_eq!(store.get(number)?.address, "test");
    Ok(())
}

#[test]
fn test_delete_ignored_after_registered() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;
    store.set_status(number, ParcelStatus::DELIVERED)?;
    let before = store.get(number)?;

    assert_eq!(store.delete(number)?, 0);
    assert_eq!(store.get(number)?, before);
    Ok(())
}

#[test]
fn test_mutations_on_unknown_number_are_silent() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);

    // Indistinguishable from a status guard miss.
    assert_eq!(store.set_status(42, ParcelStatus::SENT)?, 0);
    assert_eq!(store.set_address(42, "nowhere")?, 0);
    assert_eq!(store.delete(42)?, 0);
    assert!(store.get(42).unwrap_err().is_not_found());
    Ok(())
}

#[test]
fn test_set_status() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);
    let number = store.add(&test_parcel())?;

    assert_eq!(store.set_status(number, ParcelStatus::SENT)?, 1);
    assert_eq!(store.get(number)?.status, "sent");

    // No validation of the value.
    store.set_status(number, "lost in transit")?;
    let stored = store.get(number)?;
    assert_eq!(stored.status, "lost in transit");
    assert!(stored.parsed_status().is_err());
    Ok(())
}

#[test]
fn test_get_by_client() -> Result<()> {
    let conn = create_test_db()?;
    let store = ParcelStore::new(&conn);

    let mut expected = Vec::new();
    for i in 0..3 {
        let mut parcel = test_parcel();
        parcel.client = 7;
        parcel.address = format!("address {i}");
        parcel.number = store.add(&parcel)?;
        expected.push(parcel);

        let mut other = test_parcel();
        other.client = 8;
        store.add(&other)?;
    }

    let stored = store.get_by_client(7)?;
    assert_eq!(stored, expected);

    let numbers: HashSet<i64> = store.get_by_client(8)?.iter().map(|p| p.number).collect();
    assert_eq!(numbers.len(), 3);
    assert!(expected.iter().all(|p| !numbers.contains(&p.number)));

    assert!(store.get_by_client(9)?.is_empty());
    Ok(())
}

#[test]
fn test_reopen_keeps_rows() -> Result<()> {
    let temp_file = NamedTempFile::new()?;
    let config = ParcelStoreConfig::new(temp_file.path());

    let number = {
        let conn = config.open()?;
        ParcelStore::new(&conn).add(&test_parcel())?
    };

    let conn = config.open()?;
    assert_eq!(ParcelStore::new(&conn).get(number)?.address, "test");
    Ok(())
}

#[test]
fn test_storage_error_without_table() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    let store = ParcelStore::new(&conn);

    let err = store.add(&test_parcel()).unwrap_err();
    assert!(matches!(err, ParcelError::Storage(_)));
    assert!(matches!(store.get(1), Err(ParcelError::Storage(_))));
    Ok(())
}
