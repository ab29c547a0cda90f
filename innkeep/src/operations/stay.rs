//! Check-in and check-out planning.
//!
//! Each transition touches the reservation, its room and (at check-in) the
//! revenue ledger. The plans list every one of those writes so that
//! [`run_in_transaction`](super::executor::run_in_transaction) can apply them
//! all or none.

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::{validate_amount, ReservationId, ReservationStatus};
use crate::revenue::NewRevenueEntry;
use crate::room::{HousekeepingStatus, Occupancy};

use super::booking::require_reservation;
use super::inventory::require_room;
use super::plan::{OperationPlan, PlanAction};

/// Options for a check-in.
#[derive(Debug, Clone, Copy)]
pub struct CheckInOptions {
    /// The arriving reservation.
    pub reservation: ReservationId,
    /// Amount settled at the desk; defaults to the agreed total.
    pub final_amount: Option<Money>,
}

impl CheckInOptions {
    /// Checks in at the agreed total.
    #[must_use]
    pub const fn new(reservation: ReservationId) -> Self {
        Self {
            reservation,
            final_amount: None,
        }
    }

    /// Sets the settled amount.
    #[must_use]
    pub const fn with_final_amount(mut self, amount: Option<Money>) -> Self {
        self.final_amount = amount;
        self
    }
}

/// Plans a check-in: the reservation becomes CheckedIn, the room Occupied,
/// and a positive final amount is recognised in the ledger.
///
/// Housekeeping is left alone; a room that is not Clean only produces a
/// warning.
pub struct CheckInPlan {
    options: CheckInOptions,
}

impl CheckInPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(options: CheckInOptions) -> Self {
        Self { options }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidTransition` unless the reservation is
    /// Confirmed, or a validation error for a negative amount.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = require_reservation(conn, self.options.reservation)?;
        if reservation.status != ReservationStatus::Confirmed {
            return Err(Error::InvalidTransition {
                reservation: reservation.id,
                from: reservation.status,
                action: "check in".into(),
            });
        }

        let amount = self
            .options
            .final_amount
            .unwrap_or(reservation.total_amount);
        validate_amount("final_amount", amount)?;
        let room = require_room(conn, reservation.room_id)?;

        let mut plan = OperationPlan::new(format!(
            "Check in {} to room {}",
            reservation.guest_name, room.number
        ))
        .add_action(PlanAction::SetReservationStatus {
            reservation: reservation.id,
            status: ReservationStatus::CheckedIn,
        })
        .add_action(PlanAction::SetAgreedAmount {
            reservation: reservation.id,
            amount,
        })
        .add_action(PlanAction::SetOccupancy {
            room: room.id,
            occupancy: Occupancy::Occupied,
        });

        if amount.is_positive() {
            plan = plan.add_action(PlanAction::AppendRevenue(NewRevenueEntry {
                room_id: room.id,
                reservation_id: reservation.id,
                amount,
                description: format!(
                    "Room {} check-in for {} ({} nights)",
                    room.number,
                    reservation.guest_name,
                    reservation.stay.nights()
                ),
            }));
        } else {
            plan = plan.add_warning(format!(
                "reservation {} checked in at no charge; nothing recorded in the ledger",
                reservation.id
            ));
        }

        if !room.housekeeping.is_ready() {
            plan = plan.add_warning(format!(
                "room {} is {}, not clean",
                room.number, room.housekeeping
            ));
        }
        if room.occupancy == Occupancy::Occupied {
            plan = plan.add_warning(format!("room {} is already marked occupied", room.number));
        }
        Ok(plan)
    }
}

/// Plans a check-out: the reservation becomes CheckedOut and the room
/// Vacant and Dirty. The ledger is not touched.
pub struct CheckOutPlan {
    reservation: ReservationId,
}

impl CheckOutPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(reservation: ReservationId) -> Self {
        Self { reservation }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, or `InvalidTransition` unless the reservation is
    /// CheckedIn.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = require_reservation(conn, self.reservation)?;
        if reservation.status != ReservationStatus::CheckedIn {
            return Err(Error::InvalidTransition {
                reservation: reservation.id,
                from: reservation.status,
                action: "check out".into(),
            });
        }
        let room = require_room(conn, reservation.room_id)?;

        Ok(OperationPlan::new(format!(
            "Check out {} from room {}",
            reservation.guest_name, room.number
        ))
        .add_action(PlanAction::SetReservationStatus {
            reservation: reservation.id,
            status: ReservationStatus::CheckedOut,
        })
        .add_action(PlanAction::SetOccupancy {
            room: room.id,
            occupancy: Occupancy::Vacant,
        })
        .add_action(PlanAction::SetHousekeeping {
            room: room.id,
            status: HousekeepingStatus::Dirty,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, insert_test_room, stay};
    use crate::database::Database;
    use crate::error::ErrorKind;
    use crate::reservation::NewReservation;
    use std::time::SystemTime;

    fn confirmed(db: &Database, amount: Money) -> ReservationId {
        let room = insert_test_room(db.connection(), "101");
        let booking = NewReservation::new("Ada", room, stay(1, 4), amount).unwrap();
        Database::insert_reservation(db.connection(), &booking, SystemTime::now()).unwrap()
    }

    #[test]
    fn test_check_in_plan_actions() {
        let db = create_test_database();
        let id = confirmed(&db, Money::from_major(1200));
        let plan = CheckInPlan::new(CheckInOptions::new(id))
            .build_plan(db.connection())
            .unwrap();

        assert_eq!(plan.len(), 4);
        match &plan.actions[3] {
            PlanAction::AppendRevenue(entry) => {
                assert_eq!(entry.amount, Money::from_major(1200));
                assert_eq!(entry.description, "Room 101 check-in for Ada (3 nights)");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_check_in_final_amount_overrides_total() {
        let db = create_test_database();
        let id = confirmed(&db, Money::from_major(1200));
        let plan = CheckInPlan::new(
            CheckInOptions::new(id).with_final_amount(Some(Money::from_major(1000))),
        )
        .build_plan(db.connection())
        .unwrap();
        assert!(plan.actions.contains(&PlanAction::SetAgreedAmount {
            reservation: id,
            amount: Money::from_major(1000),
        }));
    }

    #[test]
    fn test_zero_amount_skips_ledger() {
        let db = create_test_database();
        let id = confirmed(&db, Money::ZERO);
        let plan = CheckInPlan::new(CheckInOptions::new(id))
            .build_plan(db.connection())
            .unwrap();
        assert_eq!(plan.len(), 3);
        assert!(!plan
            .actions
            .iter()
            .any(|a| matches!(a, PlanAction::AppendRevenue(_))));
    }

    #[test]
    fn test_check_in_rejects_negative_amount() {
        let db = create_test_database();
        let id = confirmed(&db, Money::from_major(100));
        let err = CheckInPlan::new(
            CheckInOptions::new(id).with_final_amount(Some(Money::from_minor(-500))),
        )
        .build_plan(db.connection())
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_check_in_requires_confirmed() {
        let db = create_test_database();
        let id = confirmed(&db, Money::from_major(100));
        Database::set_reservation_status(db.connection(), id, ReservationStatus::CheckedIn)
            .unwrap();
        let err = CheckInPlan::new(CheckInOptions::new(id))
            .build_plan(db.connection())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_check_out_requires_checked_in() {
        let db = create_test_database();
        let id = confirmed(&db, Money::from_major(100));
        let err = CheckOutPlan::new(id)
            .build_plan(db.connection())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);

        Database::set_reservation_status(db.connection(), id, ReservationStatus::CheckedIn)
            .unwrap();
        let plan = CheckOutPlan::new(id).build_plan(db.connection()).unwrap();
        assert!(plan.actions.iter().any(|a| matches!(
            a,
            PlanAction::SetHousekeeping {
                status: HousekeepingStatus::Dirty,
                ..
            }
        )));
        assert!(!plan
            .actions
            .iter()
            .any(|a| matches!(a, PlanAction::AppendRevenue(_))));
    }
}
