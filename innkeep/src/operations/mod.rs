//! Front-desk operations using the plan-execute pattern.
//!
//! Every mutation is split into two phases:
//! 1. **Planning**: read the current state, validate the request and list
//!    the store writes it needs as an [`OperationPlan`].
//! 2. **Execution**: [`PlanExecutor`] applies those writes in order.
//!
//! [`run_in_transaction`] runs both phases inside one `IMMEDIATE`
//! transaction, which is how [`FrontDesk`](crate::FrontDesk) runs every
//! operation. Dry-run stops after planning.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::operations::{run_in_transaction, BookingOptions, BookingPlan};
//! use innkeep::{RoomId, StayDates};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let stay = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
//! ).unwrap();
//! let planner = BookingPlan::new(BookingOptions::new("Mma Ramotswe", RoomId::new(1), stay));
//!
//! let result = run_in_transaction(&mut db, "book", false, |conn| planner.build_plan(conn)).unwrap();
//! println!("reservation {:?}", result.reservation_id);
//! ```

pub mod booking;
pub mod executor;
pub mod init;
pub mod inventory;
pub mod plan;
pub mod stay;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use booking::{AmendOptions, AmendPlan, BookingOptions, BookingPlan, CancelPlan};
pub use executor::{run_in_transaction, DeleteOutcome, ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use inventory::{
    AssignStaffPlan, CreateRoomPlan, DeleteRoomPlan, ImportRoomsPlan, PatchRoomPlan, RoomPatch,
    SetHousekeepingPlan, UpdateRoomOptions, UpdateRoomPlan,
};
pub use plan::{OperationPlan, PlanAction};
pub use stay::{CheckInOptions, CheckInPlan, CheckOutPlan};
