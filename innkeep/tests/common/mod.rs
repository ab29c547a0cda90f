//! Common test utilities for integration tests.
//!
//! Helpers for opening throwaway properties and seeding them with rooms and
//! bookings.

use chrono::NaiveDate;
use innkeep::database::{Database, DatabaseConfig};
use innkeep::{BookingOptions, Category, Config, FrontDesk, NewRoom, ReservationId, RoomId, StayDates};

/// Opens a database in a temporary directory that outlives the test.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"));
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// A desk over a fresh database with the default configuration.
#[allow(dead_code)]
pub fn create_test_desk() -> FrontDesk {
    create_desk_with(&Config::default())
}

/// A desk over a fresh database with `config`.
#[allow(dead_code)]
pub fn create_desk_with(config: &Config) -> FrontDesk {
    FrontDesk::new(create_test_database(), config).unwrap()
}

/// A day in June 2024.
#[allow(dead_code)]
pub fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

/// A June 2024 stay from `from` to `to`.
#[allow(dead_code)]
pub fn stay(from: u32, to: u32) -> StayDates {
    StayDates::new(june(from), june(to)).unwrap()
}

/// Adds a Premium/Moremi room (400.00 a night).
#[allow(dead_code)]
pub fn add_room(desk: &mut FrontDesk, number: &str) -> RoomId {
    add_room_of(desk, number, Category::Premium, "Moremi")
}

/// Adds a room of the given kind.
#[allow(dead_code)]
pub fn add_room_of(
    desk: &mut FrontDesk,
    number: &str,
    category: Category,
    room_type: &str,
) -> RoomId {
    let room = NewRoom::new(number, category, room_type).unwrap();
    desk.create_room(room)
        .unwrap()
        .room_id()
        .expect("room should have been created")
}

/// Books `room` for a June stay at the default price.
#[allow(dead_code)]
pub fn book(desk: &mut FrontDesk, guest: &str, room: RoomId, from: u32, to: u32) -> ReservationId {
    desk.create_reservation(BookingOptions::new(guest, room, stay(from, to)))
        .unwrap()
        .reservation_id
        .expect("reservation should have been created")
}
