//! Plan types for front-desk operations.
//!
//! A plan describes every store write an operation will make, in order,
//! without making any of them.

use crate::money::Money;
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
use crate::revenue::NewRevenueEntry;
use crate::room::{HousekeepingStatus, NewRoom, Occupancy, Room, RoomId};

/// A single store write to be performed during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Insert a live, vacant room.
    CreateRoom {
        /// The validated room, type spelled as in the catalog.
        room: NewRoom,
        /// Rate resolved from the catalog.
        nightly_rate: Money,
    },

    /// Overwrite a room's attributes.
    UpdateRoom(Room),

    /// Remove a room row that nothing references.
    DeleteRoom(RoomId),

    /// Hide a room whose history must be kept.
    RetireRoom(RoomId),

    /// Change the cleanliness axis.
    SetHousekeeping {
        /// Target room.
        room: RoomId,
        /// New status.
        status: HousekeepingStatus,
    },

    /// Change the residence axis.
    SetOccupancy {
        /// Target room.
        room: RoomId,
        /// New occupancy.
        occupancy: Occupancy,
    },

    /// Record or clear the staff assignment.
    AssignStaff {
        /// Target room.
        room: RoomId,
        /// Staff id, or `None` to clear.
        staff: Option<String>,
    },

    /// Insert a Confirmed reservation.
    CreateReservation(NewReservation),

    /// Overwrite a reservation's guest, room, dates and amount.
    UpdateReservation(Reservation),

    /// Move a reservation to a new status.
    SetReservationStatus {
        /// Target reservation.
        reservation: ReservationId,
        /// New status.
        status: ReservationStatus,
    },

    /// Replace the agreed total.
    SetAgreedAmount {
        /// Target reservation.
        reservation: ReservationId,
        /// New total.
        amount: Money,
    },

    /// Append one ledger entry.
    AppendRevenue(NewRevenueEntry),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateRoom { room, nightly_rate } => format!(
                "Create room {} ({} {}) at {nightly_rate} a night",
                room.number, room.category, room.room_type
            ),
            Self::UpdateRoom(room) => format!(
                "Update room {} ({} {}, {} a night)",
                room.number, room.category, room.room_type, room.nightly_rate
            ),
            Self::DeleteRoom(id) => format!("Remove room {id}"),
            Self::RetireRoom(id) => format!("Retire room {id} from the inventory"),
            Self::SetHousekeeping { room, status } => {
                format!("Mark room {room} as {status}")
            }
            Self::SetOccupancy { room, occupancy } => {
                format!("Mark room {room} as {occupancy}")
            }
            Self::AssignStaff { room, staff } => match staff {
                Some(staff) => format!("Assign {staff} to room {room}"),
                None => format!("Clear staff assignment of room {room}"),
            },
            Self::CreateReservation(r) => format!(
                "Book room {} for {} ({}, {})",
                r.room_id, r.guest_name, r.stay, r.total_amount
            ),
            Self::UpdateReservation(r) => format!(
                "Update reservation {} for {} (room {}, {}, {})",
                r.id, r.guest_name, r.room_id, r.stay, r.total_amount
            ),
            Self::SetReservationStatus {
                reservation,
                status,
            } => format!("Set reservation {reservation} to {status}"),
            Self::SetAgreedAmount {
                reservation,
                amount,
            } => format!("Set agreed amount of reservation {reservation} to {amount}"),
            Self::AppendRevenue(entry) => format!(
                "Record revenue of {} for reservation {}",
                entry.amount, entry.reservation_id
            ),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates an empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Check in reservation 7");
    /// assert_eq!(plan.description, "Check in reservation 7");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::operations::{OperationPlan, PlanAction};
    /// use innkeep::{HousekeepingStatus, RoomId};
    ///
    /// let plan = OperationPlan::new("Turn down room 1").add_action(PlanAction::SetHousekeeping {
    ///     room: RoomId::new(1),
    ///     status: HousekeepingStatus::Inspect,
    /// });
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
