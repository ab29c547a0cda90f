//! Revenue ledger storage. Rows are only ever inserted.

use std::time::SystemTime;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::money::Money;
use crate::reservation::ReservationId;
use crate::revenue::{NewRevenueEntry, RevenueEntry, RevenueEntryId};
use crate::room::RoomId;

use super::connection::Database;
use super::operations::{systemtime_to_unix_secs, unix_secs_to_systemtime};

const INSERT_REVENUE: &str = r"
    INSERT INTO revenue_entries (room_id, reservation_id, amount, description, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const LIST_REVENUE: &str = r"
    SELECT id, room_id, reservation_id, amount, description, created_at
    FROM revenue_entries
    WHERE (?1 IS NULL OR reservation_id = ?1)
    ORDER BY id
";

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<RevenueEntry> {
    Ok(RevenueEntry {
        id: RevenueEntryId::new(row.get(0)?),
        room_id: RoomId::new(row.get(1)?),
        reservation_id: ReservationId::new(row.get(2)?),
        amount: Money::from_minor(row.get(3)?),
        description: row.get(4)?,
        created_at: unix_secs_to_systemtime(row.get(5)?),
    })
}

impl Database {
    /// Appends one ledger entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a second entry for
    /// the same reservation.
    pub fn append_revenue(
        conn: &Connection,
        entry: &NewRevenueEntry,
        created_at: SystemTime,
    ) -> Result<RevenueEntryId> {
        conn.execute(
            INSERT_REVENUE,
            params![
                entry.room_id.value(),
                entry.reservation_id.value(),
                entry.amount.minor(),
                entry.description,
                systemtime_to_unix_secs(created_at)?,
            ],
        )?;
        Ok(RevenueEntryId::new(conn.last_insert_rowid()))
    }

    /// All ledger entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_revenue(conn: &Connection) -> Result<Vec<RevenueEntry>> {
        Self::query_revenue(conn, None)
    }

    /// Ledger entries for one reservation (zero or one).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn revenue_for_reservation(
        conn: &Connection,
        reservation: ReservationId,
    ) -> Result<Vec<RevenueEntry>> {
        Self::query_revenue(conn, Some(reservation))
    }

    fn query_revenue(
        conn: &Connection,
        reservation: Option<ReservationId>,
    ) -> Result<Vec<RevenueEntry>> {
        let mut stmt = conn.prepare(LIST_REVENUE)?;
        let entries = stmt
            .query_map([reservation.map(ReservationId::value)], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, insert_test_room, stay};
    use crate::reservation::NewReservation;

    fn seed(conn: &Connection) -> (RoomId, ReservationId) {
        let room = insert_test_room(conn, "101");
        let booking = NewReservation::new("Guest", room, stay(1, 3), Money::from_major(800)).unwrap();
        let id = Database::insert_reservation(conn, &booking, SystemTime::now()).unwrap();
        (room, id)
    }

    fn entry(room: RoomId, reservation: ReservationId) -> NewRevenueEntry {
        NewRevenueEntry {
            room_id: room,
            reservation_id: reservation,
            amount: Money::from_major(800),
            description: "check-in".into(),
        }
    }

    #[test]
    fn test_append_and_list() {
        let db = create_test_database();
        let conn = db.connection();
        let (room, res) = seed(conn);

        let id = Database::append_revenue(conn, &entry(room, res), SystemTime::now()).unwrap();
        let all = Database::list_revenue(conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].amount, Money::from_major(800));
        assert_eq!(Database::revenue_for_reservation(conn, res).unwrap().len(), 1);
    }

    #[test]
    fn test_one_entry_per_reservation() {
        let db = create_test_database();
        let conn = db.connection();
        let (room, res) = seed(conn);
        Database::append_revenue(conn, &entry(room, res), SystemTime::now()).unwrap();
        assert!(Database::append_revenue(conn, &entry(room, res), SystemTime::now()).is_err());
    }

    #[test]
    fn test_entries_cannot_be_updated_or_deleted() {
        let db = create_test_database();
        let conn = db.connection();
        let (room, res) = seed(conn);
        Database::append_revenue(conn, &entry(room, res), SystemTime::now()).unwrap();

        let update = conn
            .execute("UPDATE revenue_entries SET amount = 1", [])
            .unwrap_err();
        assert!(update.to_string().contains("append-only"));

        let delete = conn.execute("DELETE FROM revenue_entries", []).unwrap_err();
        assert!(delete.to_string().contains("append-only"));
        assert_eq!(Database::list_revenue(conn).unwrap().len(), 1);
    }
}
