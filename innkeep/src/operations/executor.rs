//! Plan execution engine.
//!
//! [`PlanExecutor`] applies a plan's actions to a connection in order.
//! [`run_in_transaction`] wraps planning and execution in one `IMMEDIATE`
//! transaction so the plan's reads and the writes that follow are serialised
//! against other writers, and a failure leaves nothing behind.

use std::time::SystemTime;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::{Error, ErrorKind, Result};
use crate::reservation::ReservationId;
use crate::revenue::RevenueEntryId;
use crate::room::RoomId;

use super::plan::{OperationPlan, PlanAction};

/// What deleting a room did to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The row is gone; nothing ever referenced it.
    Removed,
    /// The room is hidden with its history intact; its number can be reused.
    Retired,
}

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Rooms inserted, in plan order. Empty in dry-run.
    pub rooms_created: Vec<RoomId>,

    /// The reservation inserted, if any. `None` in dry-run.
    pub reservation_id: Option<ReservationId>,

    /// The ledger entry appended, if any. `None` in dry-run.
    pub revenue_entry_id: Option<RevenueEntryId>,

    /// How a deleted room was disposed of.
    pub deleted: Option<DeleteOutcome>,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            rooms_created: Vec::new(),
            reservation_id: None,
            revenue_entry_id: None,
            deleted: plan.actions.iter().find_map(|action| match action {
                PlanAction::DeleteRoom(_) => Some(DeleteOutcome::Removed),
                PlanAction::RetireRoom(_) => Some(DeleteOutcome::Retired),
                _ => None,
            }),
        }
    }

    /// The first room created, for single-room operations.
    #[must_use]
    pub fn room_id(&self) -> Option<RoomId> {
        self.rooms_created.first().copied()
    }
}

/// Executes operation plans against a connection or open transaction.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig};
/// use innkeep::operations::{OperationPlan, PlanAction, PlanExecutor};
/// use innkeep::{Occupancy, RoomId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let plan = OperationPlan::new("Vacate room 1").add_action(PlanAction::SetOccupancy {
///     room: RoomId::new(1),
///     occupancy: Occupancy::Vacant,
/// });
///
/// let tx = db.begin_transaction().unwrap();
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(result.success);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode: the plan is reported, not applied.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns the first error any action raises. Actions already applied
    /// are not undone here; run inside a transaction for atomicity.
    pub fn execute(&mut self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::from_plan(plan, self.dry_run);
        if self.dry_run {
            return Ok(result);
        }

        let now = SystemTime::now();
        for action in &plan.actions {
            log::debug!("{}", action.description());
            self.execute_action(action, now, &mut result)?;
        }
        Ok(result)
    }

    fn execute_action(
        &self,
        action: &PlanAction,
        now: SystemTime,
        result: &mut ExecutionResult,
    ) -> Result<()> {
        let conn = self.conn;
        let applied = match action {
            PlanAction::CreateRoom { room, nightly_rate } => {
                result
                    .rooms_created
                    .push(Database::insert_room(conn, room, *nightly_rate)?);
                true
            }
            PlanAction::UpdateRoom(room) => Database::update_room(conn, room)?,
            PlanAction::DeleteRoom(id) => Database::delete_room(conn, *id)?,
            PlanAction::RetireRoom(id) => Database::retire_room(conn, *id, now)?,
            PlanAction::SetHousekeeping { room, status } => {
                Database::set_housekeeping(conn, *room, *status)?
            }
            PlanAction::SetOccupancy { room, occupancy } => {
                Database::set_occupancy(conn, *room, *occupancy)?
            }
            PlanAction::AssignStaff { room, staff } => {
                Database::set_assigned_staff(conn, *room, staff.as_deref())?
            }
            PlanAction::CreateReservation(booking) => {
                result.reservation_id = Some(Database::insert_reservation(conn, booking, now)?);
                true
            }
            PlanAction::UpdateReservation(reservation) => {
                Database::update_reservation(conn, reservation)?
            }
            PlanAction::SetReservationStatus {
                reservation,
                status,
            } => Database::set_reservation_status(conn, *reservation, *status)?,
            PlanAction::SetAgreedAmount {
                reservation,
                amount,
            } => Database::set_agreed_amount(conn, *reservation, *amount)?,
            PlanAction::AppendRevenue(entry) => {
                result.revenue_entry_id = Some(Database::append_revenue(conn, entry, now)?);
                true
            }
        };

        if applied {
            Ok(())
        } else {
            Err(Error::not_found(format!(
                "target of '{}' disappeared during execution",
                action.description()
            )))
        }
    }
}

/// Plans and executes one operation atomically.
///
/// `build` runs inside an `IMMEDIATE` transaction; an error from it is
/// returned as is. In dry-run mode the transaction is rolled back after
/// planning. Otherwise the plan is executed and committed; if either step
/// fails everything is rolled back and the failure is reported as
/// [`Error::Transaction`], unless it is already a domain rejection.
///
/// # Errors
///
/// Returns [`Error::LockTimeout`] if the write lock cannot be taken, any
/// error from `build`, or the execution failure described above.
pub fn run_in_transaction<F>(
    db: &mut Database,
    operation: &str,
    dry_run: bool,
    build: F,
) -> Result<ExecutionResult>
where
    F: FnOnce(&Connection) -> Result<OperationPlan>,
{
    let tx = db.begin_transaction()?;
    let conn: &Connection = &tx;
    let plan = build(conn)?;
    log::debug!(
        "planned {operation}: {} ({} actions)",
        plan.description,
        plan.len()
    );
    for warning in &plan.warnings {
        log::warn!("{warning}");
    }

    if dry_run {
        let result = PlanExecutor::new(conn).dry_run().execute(&plan)?;
        tx.rollback()?;
        return Ok(result);
    }

    let executed = PlanExecutor::new(conn).execute(&plan);
    match executed {
        Ok(result) => {
            tx.commit().map_err(|e| abort(operation, e.into()))?;
            log::info!("{operation}: {}", plan.description);
            Ok(result)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback() {
                log::warn!("rollback of {operation} failed: {rollback}");
            }
            log::warn!("{operation} rolled back: {err}");
            Err(abort(operation, err))
        }
    }
}

/// Wraps store failures; domain rejections keep their own kind.
fn abort(operation: &str, err: Error) -> Error {
    match err.kind() {
        ErrorKind::Validation
        | ErrorKind::Overlap
        | ErrorKind::InvalidTransition
        | ErrorKind::Conflict
        | ErrorKind::NotFound
        | ErrorKind::Transaction
        | ErrorKind::LockTimeout => err,
        ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Io => Error::Transaction {
            operation: operation.to_string(),
            details: err.to_string(),
        },
    }
}
