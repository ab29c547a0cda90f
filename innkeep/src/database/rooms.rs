//! Room inventory storage.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::money::Money;
use crate::room::{HousekeepingStatus, NewRoom, Occupancy, Room, RoomId};

use super::connection::Database;
use super::operations::{enum_column, optional, systemtime_to_unix_secs};

const ROOM_COLUMNS: &str = "id, number, category, room_type, nightly_rate, housekeeping, \
                            occupancy, assigned_staff";

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (number, category, room_type, nightly_rate, housekeeping, occupancy, assigned_staff)
    VALUES (?1, ?2, ?3, ?4, ?5, 'vacant', ?6)
";

const UPDATE_ROOM: &str = r"
    UPDATE rooms
    SET number = ?2, category = ?3, room_type = ?4, nightly_rate = ?5,
        housekeeping = ?6, assigned_staff = ?7
    WHERE id = ?1 AND retired_at IS NULL
";

/// Reads a row selected with [`ROOM_COLUMNS`].
fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: RoomId::new(row.get(0)?),
        number: row.get(1)?,
        category: enum_column(row, 2)?,
        room_type: row.get(3)?,
        nightly_rate: Money::from_minor(row.get(4)?),
        housekeeping: enum_column(row, 5)?,
        occupancy: enum_column(row, 6)?,
        assigned_staff: row.get(7)?,
    })
}

/// How many reservations reference a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomBookingCounts {
    /// Confirmed or checked-in reservations.
    pub active: usize,
    /// All reservations, terminal ones included.
    pub total: usize,
}

impl Database {
    /// Inserts a live room priced at `nightly_rate`, initially vacant.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the number is
    /// already used by another live room.
    pub fn insert_room(conn: &Connection, room: &NewRoom, nightly_rate: Money) -> Result<RoomId> {
        conn.execute(
            INSERT_ROOM,
            params![
                room.number,
                room.category.as_str(),
                room.room_type,
                nightly_rate.minor(),
                room.housekeeping.as_str(),
                room.assigned_staff,
            ],
        )?;
        Ok(RoomId::new(conn.last_insert_rowid()))
    }

    /// Overwrites the editable attributes of a live room.
    ///
    /// Occupancy is left alone; only [`Database::set_occupancy`] moves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_room(conn: &Connection, room: &Room) -> Result<bool> {
        let rows = conn.execute(
            UPDATE_ROOM,
            params![
                room.id.value(),
                room.number,
                room.category.as_str(),
                room.room_type,
                room.nightly_rate.minor(),
                room.housekeeping.as_str(),
                room.assigned_staff,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Fetches a live room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ? AND retired_at IS NULL");
        optional(conn.query_row(&sql, [id.value()], row_to_room))
    }

    /// Fetches a live room by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_room_by_number(conn: &Connection, number: &str) -> Result<Option<Room>> {
        let sql =
            format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE number = ? AND retired_at IS NULL");
        optional(conn.query_row(&sql, [number.trim()], row_to_room))
    }

    /// Lists live rooms ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let sql = format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE retired_at IS NULL \
             ORDER BY length(number), number"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Sets the housekeeping axis of a live room.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_housekeeping(
        conn: &Connection,
        id: RoomId,
        status: HousekeepingStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET housekeeping = ?2 WHERE id = ?1 AND retired_at IS NULL",
            params![id.value(), status.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Sets the occupancy axis of a live room.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_occupancy(conn: &Connection, id: RoomId, occupancy: Occupancy) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET occupancy = ?2 WHERE id = ?1 AND retired_at IS NULL",
            params![id.value(), occupancy.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Records or clears the staff assignment of a live room.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_assigned_staff(conn: &Connection, id: RoomId, staff: Option<&str>) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE rooms SET assigned_staff = ?2 WHERE id = ?1 AND retired_at IS NULL",
            params![id.value(), staff],
        )?;
        Ok(rows > 0)
    }

    /// Counts the reservations that reference a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_booking_counts(conn: &Connection, id: RoomId) -> Result<RoomBookingCounts> {
        let (active, total): (i64, i64) = conn.query_row(
            r"SELECT
                  COALESCE(SUM(status IN ('confirmed', 'checked_in')), 0),
                  COUNT(*)
              FROM reservations WHERE room_id = ?",
            [id.value()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(RoomBookingCounts {
            active: usize::try_from(active).unwrap_or(0),
            total: usize::try_from(total).unwrap_or(0),
        })
    }

    /// Hides a room from the inventory while keeping its row for history.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn retire_room(conn: &Connection, id: RoomId, at: SystemTime) -> Result<bool> {
        let at = systemtime_to_unix_secs(at)?;
        let rows = conn.execute(
            "UPDATE rooms SET retired_at = ?2 WHERE id = ?1 AND retired_at IS NULL",
            params![id.value(), at],
        )?;
        Ok(rows > 0)
    }

    /// Removes a room row. Fails on the foreign key if anything references it.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_room(conn: &Connection, id: RoomId) -> Result<bool> {
        let rows = conn.execute("DELETE FROM rooms WHERE id = ?", [id.value()])?;
        Ok(rows > 0)
    }

    /// Returns the room number of any room, retired or live.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_number_any(conn: &Connection, id: RoomId) -> Result<Option<String>> {
        Ok(conn
            .query_row("SELECT number FROM rooms WHERE id = ?", [id.value()], |row| {
                row.get(0)
            })
            .optional()?)
    }
}
