//! Availability search and the tape chart.
//!
//! Both are read-only projections of rooms and reservations, recomputed on
//! every call.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::Database;
use crate::dates::{DateRange, StayDates};
use crate::error::Result;
use crate::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::room::{Category, HousekeepingStatus, Occupancy, Room, RoomId};

/// Filters for [`find_available_rooms`].
///
/// # Examples
///
/// ```
/// use innkeep::{AvailabilityQuery, Category};
///
/// let query = AvailabilityQuery::new()
///     .in_category(Category::Premium)
///     .of_type("Moremi");
/// assert_eq!(query.category, Some(Category::Premium));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityQuery {
    /// Only rooms in this category.
    pub category: Option<Category>,
    /// Only rooms of this type (case-insensitive).
    pub room_type: Option<String>,
    /// The reservation being edited; its own room is always offered.
    pub exclude_reservation: Option<ReservationId>,
    /// Only rooms with no active booking sharing a night with this stay.
    pub stay: Option<StayDates>,
}

impl AvailabilityQuery {
    /// A query matching every clean room.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to a category.
    #[must_use]
    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to a room type.
    #[must_use]
    pub fn of_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    /// Offers the room held by `reservation` whatever its status.
    #[must_use]
    pub fn excluding(mut self, reservation: ReservationId) -> Self {
        self.exclude_reservation = Some(reservation);
        self
    }

    /// Requires the room to be free for `stay`.
    #[must_use]
    pub fn free_for(mut self, stay: StayDates) -> Self {
        self.stay = Some(stay);
        self
    }

    fn matches_kind(&self, room: &Room) -> bool {
        self.category.map_or(true, |c| c == room.category)
            && self
                .room_type
                .as_deref()
                .map_or(true, |t| room.room_type.eq_ignore_ascii_case(t.trim()))
    }
}

/// Live, clean rooms matching `query`, in room-number order.
///
/// The room already held by `query.exclude_reservation` is included even if
/// it is not clean. With `query.stay` set, rooms with an overlapping
/// Confirmed or CheckedIn reservation (other than the excluded one) are
/// left out.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn find_available_rooms(conn: &Connection, query: &AvailabilityQuery) -> Result<Vec<Room>> {
    let held_room = match query.exclude_reservation {
        Some(id) => Database::get_reservation(conn, id)?.map(|r| r.room_id),
        None => None,
    };

    let mut available = Vec::new();
    for room in Database::list_rooms(conn)? {
        let held = held_room == Some(room.id);
        if !(room.housekeeping.is_ready() || held) || !query.matches_kind(&room) {
            continue;
        }
        if let Some(ref stay) = query.stay {
            if !Database::find_overlapping(conn, room.id, stay, query.exclude_reservation)?
                .is_empty()
            {
                continue;
            }
        }
        available.push(room);
    }
    Ok(available)
}

/// The reservation occupying `room` on `date`, if any.
///
/// Cancelled reservations are ignored. When a finished stay and an active
/// one both cover the date, the active one wins.
#[must_use]
pub fn reservation_at(
    reservations: &[Reservation],
    room: RoomId,
    date: NaiveDate,
) -> Option<&Reservation> {
    let mut covering = reservations.iter().filter(|r| {
        r.room_id == room && r.status != ReservationStatus::Cancelled && r.stay.contains(date)
    });
    let first = covering.next()?;
    if first.status.is_active() {
        return Some(first);
    }
    covering.find(|r| r.status.is_active()).or(Some(first))
}

/// One booked cell of the tape chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellBooking {
    /// The reservation holding the room that night.
    pub reservation_id: ReservationId,
    /// Its guest.
    pub guest_name: String,
    /// Its status.
    pub status: ReservationStatus,
    /// `true` on the reservation's check-in date.
    pub is_start: bool,
}

/// One day of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapeCell {
    /// The calendar day.
    pub date: NaiveDate,
    /// The booking that night, if any.
    pub booking: Option<CellBooking>,
}

/// One room's line of the tape chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapeRow {
    /// Room id.
    pub room_id: RoomId,
    /// Room number.
    pub number: String,
    /// Room category.
    pub category: Category,
    /// Room type.
    pub room_type: String,
    /// Current housekeeping status.
    pub housekeeping: HousekeepingStatus,
    /// Current occupancy.
    pub occupancy: Occupancy,
    /// One cell per day of the range.
    pub cells: Vec<TapeCell>,
}

/// A date × room grid of bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapeChart {
    /// The days covered, in order.
    pub dates: Vec<NaiveDate>,
    /// One row per room, in the order the rooms were given.
    pub rows: Vec<TapeRow>,
}

/// Projects `reservations` onto a grid of `rooms` × `range`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{project_grid, DateRange};
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
/// ).unwrap();
/// let chart = project_grid(&[], &[], &range);
/// assert_eq!(chart.dates.len(), 7);
/// assert!(chart.rows.is_empty());
/// ```
#[must_use]
pub fn project_grid(rooms: &[Room], reservations: &[Reservation], range: &DateRange) -> TapeChart {
    let dates: Vec<NaiveDate> = range.into_iter().collect();
    let rows = rooms
        .iter()
        .map(|room| TapeRow {
            room_id: room.id,
            number: room.number.clone(),
            category: room.category,
            room_type: room.room_type.clone(),
            housekeeping: room.housekeeping,
            occupancy: room.occupancy,
            cells: dates
                .iter()
                .map(|&date| TapeCell {
                    date,
                    booking: reservation_at(reservations, room.id, date).map(|r| CellBooking {
                        reservation_id: r.id,
                        guest_name: r.guest_name.clone(),
                        status: r.status,
                        is_start: r.stay.check_in() == date,
                    }),
                })
                .collect(),
        })
        .collect();
    TapeChart { dates, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, d, insert_test_room, stay};
    use crate::money::Money;
    use crate::reservation::NewReservation;
    use crate::room::HousekeepingStatus;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn reservation(id: i64, room: i64, from: u32, to: u32, status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(id),
            guest_name: format!("Guest {id}"),
            room_id: RoomId::new(room),
            stay: stay(from, to),
            status,
            total_amount: Money::from_major(100),
            created_at: UNIX_EPOCH,
        }
    }

    fn room(id: i64, number: &str) -> Room {
        Room {
            id: RoomId::new(id),
            number: number.into(),
            category: Category::Premium,
            room_type: "Moremi".into(),
            nightly_rate: Money::from_major(400),
            housekeeping: HousekeepingStatus::Clean,
            occupancy: Occupancy::Vacant,
            assigned_staff: None,
        }
    }

    #[test]
    fn test_spanning_booking_marks_start_only_on_first_day() {
        let rooms = [room(1, "101")];
        let reservations = [reservation(7, 1, 1, 3, ReservationStatus::Confirmed)];
        let chart = project_grid(&rooms, &reservations, &DateRange::new(d(1), d(2)).unwrap());

        let cells = &chart.rows[0].cells;
        assert_eq!(cells.len(), 2);
        let first = cells[0].booking.as_ref().unwrap();
        let second = cells[1].booking.as_ref().unwrap();
        assert_eq!(first.reservation_id, ReservationId::new(7));
        assert_eq!(second.reservation_id, ReservationId::new(7));
        assert!(first.is_start);
        assert!(!second.is_start);
    }

    #[test]
    fn test_check_out_day_is_free_and_cancelled_hidden() {
        let reservations = [
            reservation(1, 1, 1, 3, ReservationStatus::Confirmed),
            reservation(2, 1, 4, 6, ReservationStatus::Cancelled),
        ];
        assert!(reservation_at(&reservations, RoomId::new(1), d(2)).is_some());
        assert!(reservation_at(&reservations, RoomId::new(1), d(3)).is_none());
        assert!(reservation_at(&reservations, RoomId::new(1), d(4)).is_none());
        assert!(reservation_at(&reservations, RoomId::new(2), d(1)).is_none());
    }

    #[test]
    fn test_active_booking_preferred_over_finished_one() {
        let reservations = [
            reservation(1, 1, 1, 5, ReservationStatus::CheckedOut),
            reservation(2, 1, 3, 6, ReservationStatus::Confirmed),
        ];
        let found = reservation_at(&reservations, RoomId::new(1), d(4)).unwrap();
        assert_eq!(found.id, ReservationId::new(2));
    }

    #[test]
    fn test_available_rooms_are_clean_and_filtered() {
        let db = create_test_database();
        let conn = db.connection();
        let clean = insert_test_room(conn, "101");
        let dirty = insert_test_room(conn, "102");
        Database::set_housekeeping(conn, dirty, HousekeepingStatus::Dirty).unwrap();

        let rooms = find_available_rooms(conn, &AvailabilityQuery::new()).unwrap();
        assert_eq!(rooms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![clean]);

        let none = find_available_rooms(conn, &AvailabilityQuery::new().in_category(Category::Kings))
            .unwrap();
        assert!(none.is_empty());

        let by_type =
            find_available_rooms(conn, &AvailabilityQuery::new().of_type("MOREMI")).unwrap();
        assert_eq!(by_type.len(), 1);
    }

    #[test]
    fn test_excluded_reservation_keeps_its_room() {
        let db = create_test_database();
        let conn = db.connection();
        let room = insert_test_room(conn, "101");
        let booking = NewReservation::new("Guest", room, stay(1, 4), Money::ZERO).unwrap();
        let id = Database::insert_reservation(conn, &booking, SystemTime::now()).unwrap();
        Database::set_housekeeping(conn, room, HousekeepingStatus::Inspect).unwrap();

        let query = AvailabilityQuery::new().free_for(stay(2, 3));
        assert!(find_available_rooms(conn, &query).unwrap().is_empty());

        let rooms = find_available_rooms(conn, &query.excluding(id)).unwrap();
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_date_aware_search_drops_booked_rooms() {
        let db = create_test_database();
        let conn = db.connection();
        let booked = insert_test_room(conn, "101");
        let free = insert_test_room(conn, "102");
        let booking = NewReservation::new("Guest", booked, stay(1, 4), Money::ZERO).unwrap();
        Database::insert_reservation(conn, &booking, SystemTime::now()).unwrap();

        let rooms = find_available_rooms(conn, &AvailabilityQuery::new().free_for(stay(3, 5)))
            .unwrap();
        assert_eq!(rooms.iter().map(|r| r.id).collect::<Vec<_>>(), vec![free]);

        let rooms = find_available_rooms(conn, &AvailabilityQuery::new().free_for(stay(4, 5)))
            .unwrap();
        assert_eq!(rooms.len(), 2);
    }
}
