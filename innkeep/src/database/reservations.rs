//! Reservation storage.

use std::time::SystemTime;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::dates::{DateRange, StayDates};
use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
use crate::room::RoomId;

use super::connection::Database;
use super::operations::{
    date_column, date_to_sql, enum_column, optional, systemtime_to_unix_secs,
    unix_secs_to_systemtime,
};

const RESERVATION_COLUMNS: &str =
    "id, guest_name, room_id, check_in, check_out, status, total_amount, created_at";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations (guest_name, room_id, check_in, check_out, status, total_amount, created_at)
    VALUES (?1, ?2, ?3, ?4, 'confirmed', ?5, ?6)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET guest_name = ?2, room_id = ?3, check_in = ?4, check_out = ?5,
        status = ?6, total_amount = ?7
    WHERE id = ?1
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, guest_name, room_id, check_in, check_out, status, total_amount, created_at
    FROM reservations
    WHERE (?1 IS NULL OR room_id = ?1)
      AND (?2 IS NULL OR status = ?2)
      AND (?3 IS NULL OR guest_name LIKE '%' || ?3 || '%')
      AND (?4 IS NULL OR (check_in <= ?4 AND ?4 < check_out))
    ORDER BY check_in, id
";

const SELECT_OVERLAPPING: &str = r"
    SELECT id, guest_name, room_id, check_in, check_out, status, total_amount, created_at
    FROM reservations
    WHERE room_id = ?1
      AND status IN ('confirmed', 'checked_in')
      AND check_in < ?3
      AND ?2 < check_out
      AND (?4 IS NULL OR id <> ?4)
    ORDER BY check_in
";

const SELECT_IN_RANGE: &str = r"
    SELECT id, guest_name, room_id, check_in, check_out, status, total_amount, created_at
    FROM reservations
    WHERE status <> 'cancelled'
      AND check_in <= ?2
      AND ?1 < check_out
    ORDER BY room_id, check_in
";

/// Reads a row selected with [`RESERVATION_COLUMNS`].
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let check_in = date_column(row, 3)?;
    let check_out = date_column(row, 4)?;
    let stay = StayDates::new(check_in, check_out).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        guest_name: row.get(1)?,
        room_id: RoomId::new(row.get(2)?),
        stay,
        status: enum_column(row, 5)?,
        total_amount: Money::from_minor(row.get(6)?),
        created_at: unix_secs_to_systemtime(row.get(7)?),
    })
}

/// Criteria for [`Database::list_reservations`]. Unset fields match all.
///
/// # Examples
///
/// ```
/// use innkeep::database::ReservationFilter;
/// use innkeep::ReservationStatus;
///
/// let filter = ReservationFilter::default().with_status(ReservationStatus::Confirmed);
/// assert!(filter.room.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only this room.
    pub room: Option<RoomId>,
    /// Only this status.
    pub status: Option<ReservationStatus>,
    /// Guest name contains this text (case-insensitive for ASCII).
    pub guest: Option<String>,
    /// Only stays occupying the room on this night.
    pub active_on: Option<NaiveDate>,
}

impl ReservationFilter {
    /// Restricts to one room.
    #[must_use]
    pub const fn with_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to guests whose name contains `guest`.
    #[must_use]
    pub fn with_guest(mut self, guest: impl Into<String>) -> Self {
        self.guest = Some(guest.into());
        self
    }

    /// Restricts to stays that hold the room on `date`.
    #[must_use]
    pub const fn active_on(mut self, date: NaiveDate) -> Self {
        self.active_on = Some(date);
        self
    }
}

/// Maps the overlap trigger's abort to [`Error::Overlap`].
fn map_overlap(err: rusqlite::Error, room: RoomId, stay: &StayDates) -> Error {
    let is_overlap = matches!(
        &err,
        rusqlite::Error::SqliteFailure(e, Some(msg))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains(super::schema::OVERLAP_TRIGGER_MESSAGE)
    );
    if is_overlap {
        Error::Overlap {
            room,
            details: format!("another active reservation holds part of {stay}"),
        }
    } else {
        err.into()
    }
}

impl Database {
    /// Inserts a Confirmed reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overlap`] if the store's overlap trigger fires, or
    /// any other database error.
    pub fn insert_reservation(
        conn: &Connection,
        booking: &NewReservation,
        created_at: SystemTime,
    ) -> Result<ReservationId> {
        let created = systemtime_to_unix_secs(created_at)?;
        conn.execute(
            INSERT_RESERVATION,
            params![
                booking.guest_name,
                booking.room_id.value(),
                date_to_sql(booking.stay.check_in()),
                date_to_sql(booking.stay.check_out()),
                booking.total_amount.minor(),
                created,
            ],
        )
        .map_err(|e| map_overlap(e, booking.room_id, &booking.stay))?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Overwrites a reservation's mutable attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overlap`] if the store's overlap trigger fires, or
    /// any other database error.
    pub fn update_reservation(conn: &Connection, reservation: &Reservation) -> Result<bool> {
        let rows = conn
            .execute(
                UPDATE_RESERVATION,
                params![
                    reservation.id.value(),
                    reservation.guest_name,
                    reservation.room_id.value(),
                    date_to_sql(reservation.stay.check_in()),
                    date_to_sql(reservation.stay.check_out()),
                    reservation.status.as_str(),
                    reservation.total_amount.minor(),
                ],
            )
            .map_err(|e| map_overlap(e, reservation.room_id, &reservation.stay))?;
        Ok(rows > 0)
    }

    /// Sets a reservation's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_reservation_status(
        conn: &Connection,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET status = ?2 WHERE id = ?1",
            params![id.value(), status.as_str()],
        )?;
        Ok(rows > 0)
    }

    /// Sets a reservation's agreed total.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_agreed_amount(conn: &Connection, id: ReservationId, amount: Money) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET total_amount = ?2 WHERE id = ?1",
            params![id.value(), amount.minor()],
        )?;
        Ok(rows > 0)
    }

    /// Fetches one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
        optional(conn.query_row(&sql, [id.value()], row_to_reservation))
    }

    /// Lists reservations matching `filter`, ordered by check-in.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let rows = stmt
            .query_map(
                params![
                    filter.room.map(RoomId::value),
                    filter.status.map(ReservationStatus::as_str),
                    filter.guest.as_deref().map(str::trim),
                    filter.active_on.map(date_to_sql),
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Active reservations on `room` sharing a night with `stay`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping(
        conn: &Connection,
        room: RoomId,
        stay: &StayDates,
        exclude: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(SELECT_OVERLAPPING)?;
        let rows = stmt
            .query_map(
                params![
                    room.value(),
                    date_to_sql(stay.check_in()),
                    date_to_sql(stay.check_out()),
                    exclude.map(ReservationId::value),
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Non-cancelled reservations touching any day of `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_in_range(conn: &Connection, range: &DateRange) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(SELECT_IN_RANGE)?;
        let rows = stmt
            .query_map(
                params![date_to_sql(range.start()), date_to_sql(range.end())],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, d, insert_test_room, stay};

    fn booking(room: RoomId, from: u32, to: u32) -> NewReservation {
        NewReservation::new("Test Guest", room, stay(from, to), Money::from_major(100)).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");

        let id = Database::insert_reservation(conn, &booking(room, 1, 4), SystemTime::now())
            .unwrap();
        let r = Database::get_reservation(conn, id).unwrap().unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(r.stay, stay(1, 4));
        assert_eq!(r.total_amount, Money::from_major(100));
        assert!(Database::get_reservation(conn, ReservationId::new(999))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_trigger_rejects_overlapping_insert() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");
        Database::insert_reservation(conn, &booking(room, 1, 5), SystemTime::now()).unwrap();

        let err = Database::insert_reservation(conn, &booking(room, 4, 6), SystemTime::now())
            .unwrap_err();
        assert!(matches!(err, Error::Overlap { room: r, .. } if r == room));

        // Back-to-back is fine.
        Database::insert_reservation(conn, &booking(room, 5, 8), SystemTime::now()).unwrap();
    }

    #[test]
    fn test_trigger_ignores_inactive_rows() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");
        let first =
            Database::insert_reservation(conn, &booking(room, 1, 5), SystemTime::now()).unwrap();
        Database::set_reservation_status(conn, first, ReservationStatus::Cancelled).unwrap();

        Database::insert_reservation(conn, &booking(room, 2, 4), SystemTime::now()).unwrap();
    }

    #[test]
    fn test_trigger_rejects_reactivating_into_overlap() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");
        let first =
            Database::insert_reservation(conn, &booking(room, 1, 5), SystemTime::now()).unwrap();
        Database::set_reservation_status(conn, first, ReservationStatus::Cancelled).unwrap();
        Database::insert_reservation(conn, &booking(room, 2, 4), SystemTime::now()).unwrap();

        let mut revived = Database::get_reservation(conn, first).unwrap().unwrap();
        revived.status = ReservationStatus::Confirmed;
        assert!(matches!(
            Database::update_reservation(conn, &revived),
            Err(Error::Overlap { .. })
        ));
    }

    #[test]
    fn test_find_overlapping_excludes_self() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");
        let id =
            Database::insert_reservation(conn, &booking(room, 1, 5), SystemTime::now()).unwrap();

        assert_eq!(
            Database::find_overlapping(conn, room, &stay(3, 7), None)
                .unwrap()
                .len(),
            1
        );
        assert!(Database::find_overlapping(conn, room, &stay(3, 7), Some(id))
            .unwrap()
            .is_empty());
        assert!(Database::find_overlapping(conn, room, &stay(5, 7), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_list_with_filters() {
        let db = create_test_database();
        let conn = db.connection();
        let a = insert_test_room(conn, "1");
        let b = insert_test_room(conn, "2");
        Database::insert_reservation(conn, &booking(a, 1, 3), SystemTime::now()).unwrap();
        let ada = NewReservation::new("Ada Lovelace", b, stay(2, 6), Money::ZERO).unwrap();
        Database::insert_reservation(conn, &ada, SystemTime::now()).unwrap();

        let all = Database::list_reservations(conn, &ReservationFilter::default()).unwrap();
        assert_eq!(all.len(), 2);

        let in_b =
            Database::list_reservations(conn, &ReservationFilter::default().with_room(b)).unwrap();
        assert_eq!(in_b.len(), 1);

        let named =
            Database::list_reservations(conn, &ReservationFilter::default().with_guest("ada"))
                .unwrap();
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].guest_name, "Ada Lovelace");

        let on_third =
            Database::list_reservations(conn, &ReservationFilter::default().active_on(d(3)))
                .unwrap();
        assert_eq!(on_third.len(), 1);
        assert_eq!(on_third[0].room_id, b);
    }

    #[test]
    fn test_reservations_in_range_skips_cancelled() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "1");
        let kept =
            Database::insert_reservation(conn, &booking(room, 1, 3), SystemTime::now()).unwrap();
        let dropped =
            Database::insert_reservation(conn, &booking(room, 3, 6), SystemTime::now()).unwrap();
        Database::set_reservation_status(conn, dropped, ReservationStatus::Cancelled).unwrap();

        let range = DateRange::new(d(2), d(4)).unwrap();
        let found = Database::reservations_in_range(conn, &range).unwrap();
        assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), vec![kept]);
    }
}
