//! Shared test utilities for unit tests across the crate.

use chrono::NaiveDate;
use rusqlite::Connection;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::dates::StayDates;
use crate::money::Money;
use crate::room::{Category, NewRoom, RoomId};

/// Creates a temporary test database that lives for the rest of the test.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the database's lifetime.
    std::mem::forget(dir);

    db
}

/// Inserts a clean Premium/Moremi room at 400.00 a night.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn insert_test_room(conn: &Connection, number: &str) -> RoomId {
    let room = NewRoom::new(number, Category::Premium, "Moremi").unwrap();
    Database::insert_room(conn, &room, Money::from_major(400)).unwrap()
}

/// A day in June 2024.
///
/// # Panics
///
/// Panics on an invalid day.
#[must_use]
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

/// A June 2024 stay.
///
/// # Panics
///
/// Panics unless `to > from`.
#[must_use]
pub fn stay(from: u32, to: u32) -> StayDates {
    StayDates::new(d(from), d(to)).unwrap()
}
