//! `SQLite` storage for rooms, reservations and the revenue ledger.
//!
//! [`Database`] owns one connection. CRUD is exposed as associated functions
//! taking `&rusqlite::Connection`, so the same call works on
//! [`Database::connection`] or on a transaction from
//! [`Database::begin_transaction`].
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::{Category, Money, NewRoom};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! let room = NewRoom::new("101", Category::Premium, "Moremi").unwrap();
//! Database::insert_room(&tx, &room, Money::from_major(400)).unwrap();
//! tx.commit().unwrap();
//!
//! for room in Database::list_rooms(db.connection()).unwrap() {
//!     println!("{} {}", room.number, room.housekeeping);
//! }
//! ```

mod config;
mod connection;
mod ledger;
pub mod migrations;
mod operations;
mod reservations;
mod rooms;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use reservations::ReservationFilter;
pub use rooms::RoomBookingCounts;
pub use schema::{APPEND_ONLY_TRIGGER_MESSAGE, CURRENT_SCHEMA_VERSION, OVERLAP_TRIGGER_MESSAGE};

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
