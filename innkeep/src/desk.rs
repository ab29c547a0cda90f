//! The front desk: one entry point for every property operation.
//!
//! [`FrontDesk`] owns the database handle and the effective rate catalog.
//! Each mutating call plans and executes inside one `IMMEDIATE`
//! transaction; reads go straight to the connection.

use chrono::NaiveDate;

use crate::availability::{self, AvailabilityQuery, TapeChart};
use crate::catalog::RateCatalog;
use crate::config::Config;
use crate::database::{Database, ReservationFilter};
use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::money::Money;
use crate::operations::{
    run_in_transaction, AmendOptions, AmendPlan, AssignStaffPlan, BookingOptions, BookingPlan,
    CancelPlan, CheckInOptions, CheckInPlan, CheckOutPlan, CreateRoomPlan, DeleteRoomPlan,
    ExecutionResult, ImportRoomsPlan, PatchRoomPlan, RoomPatch, SetHousekeepingPlan,
    UpdateRoomOptions, UpdateRoomPlan,
};
use crate::pricing::{compute_quote, PricingQuote, QuoteRequest};
use crate::reservation::{Reservation, ReservationId};
use crate::revenue::{LedgerSummary, RevenueEntry};
use crate::room::{HousekeepingStatus, NewRoom, Room, RoomId};

/// Property operations over one database.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::ConfigBuilder;
/// use innkeep::database::{Database, DatabaseConfig};
/// use innkeep::{Category, FrontDesk, NewRoom};
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let mut desk = FrontDesk::new(db, &config).unwrap();
///
/// let room = NewRoom::new("101", Category::Premium, "Moremi").unwrap();
/// let result = desk.create_room(room).unwrap();
/// println!("created room {:?}", result.room_id());
/// ```
pub struct FrontDesk {
    db: Database,
    catalog: RateCatalog,
    strict_discounts: bool,
    dry_run: bool,
}

impl FrontDesk {
    /// Creates a desk using the catalog and discount policy from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured room types are invalid.
    pub fn new(db: Database, config: &Config) -> Result<Self> {
        Ok(Self {
            db,
            catalog: config.rate_catalog()?,
            strict_discounts: config.strict_discounts(),
            dry_run: false,
        })
    }

    /// Plans mutations without applying them.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The effective rate catalog.
    #[must_use]
    pub const fn catalog(&self) -> &RateCatalog {
        &self.catalog
    }

    /// The underlying database.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    // Room inventory

    /// Adds a room priced from the catalog.
    ///
    /// # Errors
    ///
    /// See [`CreateRoomPlan::build_plan`].
    pub fn create_room(&mut self, room: NewRoom) -> Result<ExecutionResult> {
        let planner = CreateRoomPlan::new(room, &self.catalog);
        run_in_transaction(&mut self.db, "create room", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Overwrites a room, re-deriving the rate unless `rate_override`.
    ///
    /// The stored occupancy is kept whatever `room.occupancy` says.
    ///
    /// # Errors
    ///
    /// See [`UpdateRoomPlan::build_plan`].
    pub fn update_room(&mut self, room: Room, rate_override: bool) -> Result<ExecutionResult> {
        let options = UpdateRoomOptions::new(room).with_rate_override(rate_override);
        let planner = UpdateRoomPlan::new(options, &self.catalog);
        run_in_transaction(&mut self.db, "update room", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Applies a partial edit to the room as stored inside the transaction.
    ///
    /// # Errors
    ///
    /// See [`PatchRoomPlan::build_plan`].
    pub fn patch_room(&mut self, room: RoomId, patch: RoomPatch) -> Result<ExecutionResult> {
        let planner = PatchRoomPlan::new(room, patch, &self.catalog);
        run_in_transaction(&mut self.db, "update room", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Removes or retires a room; see [`ExecutionResult::deleted`].
    ///
    /// # Errors
    ///
    /// Returns `Conflict` while the room has active reservations.
    pub fn delete_room(&mut self, room: RoomId) -> Result<ExecutionResult> {
        let planner = DeleteRoomPlan::new(room);
        run_in_transaction(&mut self.db, "delete room", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Sets a room's housekeeping status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room.
    pub fn set_housekeeping_status(
        &mut self,
        room: RoomId,
        status: HousekeepingStatus,
    ) -> Result<ExecutionResult> {
        let planner = SetHousekeepingPlan::new(room, status);
        run_in_transaction(&mut self.db, "set housekeeping", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Records (or with `None` clears) a room's staff assignment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room or a validation error for a
    /// blank staff id.
    pub fn assign_staff(&mut self, room: RoomId, staff: Option<String>) -> Result<ExecutionResult> {
        let planner = AssignStaffPlan::new(room, staff);
        run_in_transaction(&mut self.db, "assign staff", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Adds many rooms in one transaction.
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry; nothing is imported in that case.
    pub fn import_rooms(&mut self, rooms: Vec<NewRoom>) -> Result<ExecutionResult> {
        let planner = ImportRoomsPlan::new(rooms, &self.catalog);
        run_in_transaction(&mut self.db, "import rooms", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    // Reservations

    /// Books a room.
    ///
    /// # Errors
    ///
    /// See [`BookingPlan::build_plan`].
    pub fn create_reservation(&mut self, booking: BookingOptions) -> Result<ExecutionResult> {
        let planner = BookingPlan::new(booking);
        run_in_transaction(&mut self.db, "create reservation", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Applies an amendment.
    ///
    /// # Errors
    ///
    /// See [`AmendPlan::build_plan`].
    pub fn update_reservation(
        &mut self,
        reservation: ReservationId,
        amendment: AmendOptions,
    ) -> Result<ExecutionResult> {
        let planner = AmendPlan::new(reservation, amendment);
        run_in_transaction(&mut self.db, "update reservation", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Cancels a reservation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for a checked-out stay.
    pub fn cancel_reservation(&mut self, reservation: ReservationId) -> Result<ExecutionResult> {
        let planner = CancelPlan::new(reservation);
        run_in_transaction(&mut self.db, "cancel reservation", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    // Stays

    /// Checks a Confirmed reservation in.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the reservation is Confirmed, or
    /// `Transaction` if any write fails (nothing is applied).
    pub fn check_in(
        &mut self,
        reservation: ReservationId,
        final_amount: Option<Money>,
    ) -> Result<ExecutionResult> {
        let planner =
            CheckInPlan::new(CheckInOptions::new(reservation).with_final_amount(final_amount));
        run_in_transaction(&mut self.db, "check-in", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    /// Checks a CheckedIn reservation out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the reservation is CheckedIn, or
    /// `Transaction` if any write fails (nothing is applied).
    pub fn check_out(&mut self, reservation: ReservationId) -> Result<ExecutionResult> {
        let planner = CheckOutPlan::new(reservation);
        run_in_transaction(&mut self.db, "check-out", self.dry_run, |conn| {
            planner.build_plan(conn)
        })
    }

    // Queries

    /// Prices a stay in `room`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room.
    pub fn compute_quote(
        &self,
        room: RoomId,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        discount: bool,
        entered: Option<Money>,
    ) -> Result<PricingQuote> {
        let room = self.room(room)?;
        let mut request = QuoteRequest::new(room.nightly_rate).capped(self.strict_discounts);
        request.check_in = check_in;
        request.check_out = check_out;
        if discount {
            request = request.with_discount(entered);
        }
        Ok(compute_quote(&request))
    }

    /// Rooms that can be offered; see [`availability::find_available_rooms`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find_available_rooms(&self, query: &AvailabilityQuery) -> Result<Vec<Room>> {
        availability::find_available_rooms(self.db.connection(), query)
    }

    /// Every live room against every day of `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn tape_chart(&self, range: &DateRange) -> Result<TapeChart> {
        let conn = self.db.connection();
        let rooms = Database::list_rooms(conn)?;
        let reservations = Database::reservations_in_range(conn, range)?;
        Ok(availability::project_grid(&rooms, &reservations, range))
    }

    /// One live room.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown or retired room.
    pub fn room(&self, id: RoomId) -> Result<Room> {
        Database::get_room(self.db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("room {id}")))
    }

    /// A live room by its number.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no live room has that number.
    pub fn room_by_number(&self, number: &str) -> Result<Room> {
        Database::find_room_by_number(self.db.connection(), number)?
            .ok_or_else(|| Error::not_found(format!("room number '{}'", number.trim())))
    }

    /// All live rooms in room-number order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn rooms(&self) -> Result<Vec<Room>> {
        Database::list_rooms(self.db.connection())
    }

    /// One reservation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub fn reservation(&self, id: ReservationId) -> Result<Reservation> {
        Database::get_reservation(self.db.connection(), id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// Reservations matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        Database::list_reservations(self.db.connection(), filter)
    }

    /// Every revenue entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn ledger(&self) -> Result<Vec<RevenueEntry>> {
        Database::list_revenue(self.db.connection())
    }

    /// Count and total of the revenue ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn ledger_summary(&self) -> Result<LedgerSummary> {
        Ok(LedgerSummary::of(&self.ledger()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, d, stay};
    use crate::error::ErrorKind;
    use crate::reservation::ReservationStatus;
    use crate::room::{Category, Occupancy};

    fn desk() -> FrontDesk {
        FrontDesk::new(create_test_database(), &Config::default()).unwrap()
    }

    fn add_room(desk: &mut FrontDesk, number: &str) -> RoomId {
        let room = NewRoom::new(number, Category::Premium, "Moremi").unwrap();
        desk.create_room(room).unwrap().room_id().unwrap()
    }

    #[test]
    fn test_full_stay() {
        let mut desk = desk();
        let room = add_room(&mut desk, "101");
        let id = desk
            .create_reservation(BookingOptions::new("Ada", room, stay(10, 15)))
            .unwrap()
            .reservation_id
            .unwrap();

        let result = desk.check_in(id, None).unwrap();
        assert!(result.revenue_entry_id.is_some());
        assert_eq!(desk.room(room).unwrap().occupancy, Occupancy::Occupied);

        desk.check_out(id).unwrap();
        let room = desk.room(room).unwrap();
        assert_eq!(room.occupancy, Occupancy::Vacant);
        assert_eq!(room.housekeeping, HousekeepingStatus::Dirty);
        assert_eq!(desk.reservation(id).unwrap().status, ReservationStatus::CheckedOut);

        let summary = desk.ledger_summary().unwrap();
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.total, Money::from_major(2000));
    }

    #[test]
    fn test_quote_uses_room_rate() {
        let mut desk = desk();
        let room = add_room(&mut desk, "101");
        let quote = desk
            .compute_quote(room, Some(d(10)), Some(d(15)), true, Some(Money::from_major(1800)))
            .unwrap();
        assert_eq!(quote.base_price, Money::from_major(2000));
        assert_eq!(quote.discount_value, Money::from_major(200));

        let plain = desk
            .compute_quote(room, Some(d(10)), Some(d(15)), false, Some(Money::from_major(1)))
            .unwrap();
        assert_eq!(plain.final_amount, plain.base_price);
    }

    #[test]
    fn test_strict_discounts_cap_at_base() {
        let config = Config {
            strict_discounts: Some(true),
            ..Default::default()
        };
        let mut desk = FrontDesk::new(create_test_database(), &config).unwrap();
        let room = add_room(&mut desk, "101");
        let quote = desk
            .compute_quote(room, Some(d(1)), Some(d(2)), true, Some(Money::from_major(900)))
            .unwrap();
        assert_eq!(quote.final_amount, Money::from_major(400));
    }

    #[test]
    fn test_dry_run_leaves_store_untouched() {
        let mut desk = desk().dry_run(true);
        let room = NewRoom::new("101", Category::Premium, "Moremi").unwrap();
        let result = desk.create_room(room).unwrap();
        assert!(result.dry_run);
        assert!(desk.rooms().unwrap().is_empty());
    }

    #[test]
    fn test_delete_after_cancel() {
        let mut desk = desk();
        let room = add_room(&mut desk, "101");
        let id = desk
            .create_reservation(BookingOptions::new("Ada", room, stay(1, 3)))
            .unwrap()
            .reservation_id
            .unwrap();

        let err = desk.delete_room(room).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        desk.cancel_reservation(id).unwrap();
        let result = desk.delete_room(room).unwrap();
        assert_eq!(
            result.deleted,
            Some(crate::operations::DeleteOutcome::Retired)
        );
        assert_eq!(desk.room(room).unwrap_err().kind(), ErrorKind::NotFound);

        // The number is free again and the history still resolves.
        add_room(&mut desk, "101");
        assert_eq!(desk.reservation(id).unwrap().room_id, room);
    }
}
