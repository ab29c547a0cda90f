//! Room inventory planning.
//!
//! Room numbers must be unique among live rooms and every room type must
//! belong to its category in the rate catalog. Rates come from the catalog
//! unless an update explicitly overrides them.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::catalog::RateCatalog;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::money::Money;
use crate::room::{require_text, Category, HousekeepingStatus, NewRoom, Room, RoomId};

use super::plan::{OperationPlan, PlanAction};

/// Fetches a live room or reports it missing.
pub(crate) fn require_room(conn: &Connection, id: RoomId) -> Result<Room> {
    Database::get_room(conn, id)?.ok_or_else(|| Error::not_found(format!("room {id}")))
}

/// Fails if a live room other than `except` uses `number`.
fn ensure_number_free(conn: &Connection, number: &str, except: Option<RoomId>) -> Result<()> {
    match Database::find_room_by_number(conn, number)? {
        Some(existing) if Some(existing.id) != except => Err(Error::validation(
            "number",
            format!("room number '{number}' is already in use"),
        )),
        _ => Ok(()),
    }
}

/// Normalises `room` and spells its type the way the catalog does.
fn canonical_room(room: NewRoom, catalog: &RateCatalog) -> Result<(NewRoom, Money)> {
    let mut room = room.normalised()?;
    let entry = catalog.resolve(room.category, &room.room_type)?;
    room.room_type.clone_from(&entry.name);
    Ok((room, entry.rate))
}

/// Plans adding one room.
///
/// # Examples
///
/// ```no_run
/// use innkeep::database::{Database, DatabaseConfig};
/// use innkeep::operations::CreateRoomPlan;
/// use innkeep::{Category, NewRoom, RateCatalog};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let catalog = RateCatalog::default();
/// let room = NewRoom::new("101", Category::Premium, "moremi").unwrap();
///
/// let plan = CreateRoomPlan::new(room, &catalog)
///     .build_plan(db.connection())
///     .unwrap();
/// assert_eq!(plan.len(), 1);
/// ```
pub struct CreateRoomPlan<'a> {
    room: NewRoom,
    catalog: &'a RateCatalog,
}

impl<'a> CreateRoomPlan<'a> {
    /// Creates a planner for `room`.
    #[must_use]
    pub const fn new(room: NewRoom, catalog: &'a RateCatalog) -> Self {
        Self { room, catalog }
    }

    /// Validates the room against the catalog and the live inventory.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank number, a type outside the
    /// category, or a number already in use.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let (room, nightly_rate) = canonical_room(self.room.clone(), self.catalog)?;
        ensure_number_free(conn, &room.number, None)?;

        Ok(OperationPlan::new(format!("Add room {}", room.number))
            .add_action(PlanAction::CreateRoom { room, nightly_rate }))
    }
}

/// Options for an update-room operation.
#[derive(Debug, Clone)]
pub struct UpdateRoomOptions {
    /// The room's new attributes; `id` selects the room.
    pub room: Room,
    /// Keep `room.nightly_rate` instead of re-deriving it from the catalog.
    pub rate_override: bool,
}

impl UpdateRoomOptions {
    /// Updates `room`, re-deriving its rate.
    #[must_use]
    pub const fn new(room: Room) -> Self {
        Self {
            room,
            rate_override: false,
        }
    }

    /// Sets whether the supplied rate is kept.
    #[must_use]
    pub const fn with_rate_override(mut self, rate_override: bool) -> Self {
        self.rate_override = rate_override;
        self
    }
}

/// Plans a room update.
pub struct UpdateRoomPlan<'a> {
    options: UpdateRoomOptions,
    catalog: &'a RateCatalog,
}

impl<'a> UpdateRoomPlan<'a> {
    /// Creates a planner.
    #[must_use]
    pub const fn new(options: UpdateRoomOptions, catalog: &'a RateCatalog) -> Self {
        Self { options, catalog }
    }

    /// Re-validates the room, excluding itself from the uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown or retired room, or a validation
    /// error for the same rules as creation, or a non-positive overridden
    /// rate.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let mut room = self.options.room.clone();
        let current = require_room(conn, room.id)?;
        // Occupancy belongs to check-in and check-out.
        room.occupancy = current.occupancy;

        room.number = require_text("number", &room.number)?;
        room.room_type = require_text("room_type", &room.room_type)?;
        room.assigned_staff = room
            .assigned_staff
            .as_deref()
            .map(|s| require_text("assigned_staff", s))
            .transpose()?;

        let entry = self.catalog.resolve(room.category, &room.room_type)?;
        room.room_type.clone_from(&entry.name);
        ensure_number_free(conn, &room.number, Some(room.id))?;

        let mut plan = OperationPlan::new(format!("Update room {}", current.number));
        if self.options.rate_override {
            if !room.nightly_rate.is_positive() {
                return Err(Error::validation(
                    "nightly_rate",
                    format!("overridden rate {} must be positive", room.nightly_rate),
                ));
            }
            if room.nightly_rate != entry.rate {
                plan = plan.add_warning(format!(
                    "room {} priced at {} instead of the catalog rate {}",
                    room.number, room.nightly_rate, entry.rate
                ));
            }
        } else {
            room.nightly_rate = entry.rate;
        }

        if room == current {
            return Ok(plan.add_warning(format!("room {} is unchanged", room.number)));
        }
        Ok(plan.add_action(PlanAction::UpdateRoom(room)))
    }
}

/// A partial room edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPatch {
    /// New room number.
    pub number: Option<String>,
    /// New category.
    pub category: Option<Category>,
    /// New room type.
    pub room_type: Option<String>,
    /// New housekeeping status.
    pub housekeeping: Option<HousekeepingStatus>,
    /// `Some(None)` clears the assignment.
    pub assigned_staff: Option<Option<String>>,
    /// Overridden nightly rate.
    pub nightly_rate: Option<Money>,
}

impl RoomPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.category.is_none()
            && self.room_type.is_none()
            && self.housekeeping.is_none()
            && self.assigned_staff.is_none()
            && self.nightly_rate.is_none()
    }

    fn apply_to(&self, room: &mut Room) {
        if let Some(number) = &self.number {
            room.number.clone_from(number);
        }
        if let Some(category) = self.category {
            room.category = category;
        }
        if let Some(room_type) = &self.room_type {
            room.room_type.clone_from(room_type);
        }
        if let Some(status) = self.housekeeping {
            room.housekeeping = status;
        }
        if let Some(staff) = &self.assigned_staff {
            room.assigned_staff.clone_from(staff);
        }
        if let Some(rate) = self.nightly_rate {
            room.nightly_rate = rate;
        }
    }
}

/// Plans a partial room edit against the room as stored when the plan runs.
///
/// An explicit rate is kept as an override; otherwise the rate is
/// re-derived from the catalog.
pub struct PatchRoomPlan<'a> {
    room: RoomId,
    patch: RoomPatch,
    catalog: &'a RateCatalog,
}

impl<'a> PatchRoomPlan<'a> {
    /// Creates a planner.
    #[must_use]
    pub const fn new(room: RoomId, patch: RoomPatch, catalog: &'a RateCatalog) -> Self {
        Self {
            room,
            patch,
            catalog,
        }
    }

    /// Merges the patch into the stored room, then validates it like
    /// [`UpdateRoomPlan::build_plan`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown or retired room, or any error of
    /// [`UpdateRoomPlan::build_plan`].
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let mut room = require_room(conn, self.room)?;
        self.patch.apply_to(&mut room);
        let rate_override = self.patch.nightly_rate.is_some();
        UpdateRoomPlan::new(
            UpdateRoomOptions::new(room).with_rate_override(rate_override),
            self.catalog,
        )
        .build_plan(conn)
    }
}

/// Plans removing a room from the inventory.
///
/// Rooms with active bookings are refused. Rooms with only terminal history
/// are retired; rooms nobody ever booked are removed outright.
pub struct DeleteRoomPlan {
    room: RoomId,
}

impl DeleteRoomPlan {
    /// Creates a planner for `room`.
    #[must_use]
    pub const fn new(room: RoomId) -> Self {
        Self { room }
    }

    /// Decides between refusing, retiring and removing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room, or `Conflict` when a
    /// Confirmed or CheckedIn reservation references it.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let room = require_room(conn, self.room)?;
        let counts = Database::room_booking_counts(conn, room.id)?;

        if counts.active > 0 {
            return Err(Error::Conflict {
                details: format!(
                    "room {} has {} active reservation(s); cancel or complete them first",
                    room.number, counts.active
                ),
            });
        }

        let plan = OperationPlan::new(format!("Delete room {}", room.number));
        if counts.total > 0 {
            Ok(plan
                .add_action(PlanAction::RetireRoom(room.id))
                .add_warning(format!(
                    "room {} keeps {} past reservation(s) and is retired, not removed",
                    room.number, counts.total
                )))
        } else {
            Ok(plan.add_action(PlanAction::DeleteRoom(room.id)))
        }
    }
}

/// Plans a housekeeping status change. Any status may follow any other.
pub struct SetHousekeepingPlan {
    room: RoomId,
    status: HousekeepingStatus,
}

impl SetHousekeepingPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(room: RoomId, status: HousekeepingStatus) -> Self {
        Self { room, status }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let room = require_room(conn, self.room)?;
        let plan = OperationPlan::new(format!("Mark room {} {}", room.number, self.status));
        if room.housekeeping == self.status {
            return Ok(plan.add_warning(format!("room {} is already {}", room.number, self.status)));
        }
        Ok(plan.add_action(PlanAction::SetHousekeeping {
            room: room.id,
            status: self.status,
        }))
    }
}

/// Plans recording or clearing a room's staff assignment.
pub struct AssignStaffPlan {
    room: RoomId,
    staff: Option<String>,
}

impl AssignStaffPlan {
    /// Creates a planner; `None` clears the assignment.
    #[must_use]
    pub const fn new(room: RoomId, staff: Option<String>) -> Self {
        Self { room, staff }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown room, or a validation error for a
    /// blank staff id.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let staff = self
            .staff
            .as_deref()
            .map(|s| require_text("staff", s))
            .transpose()?;
        let room = require_room(conn, self.room)?;

        let plan = OperationPlan::new(format!("Assign staff to room {}", room.number));
        if room.assigned_staff == staff {
            return Ok(plan.add_warning(format!("room {} assignment is unchanged", room.number)));
        }
        Ok(plan.add_action(PlanAction::AssignStaff {
            room: room.id,
            staff,
        }))
    }
}

/// Plans adding many rooms at once; one bad entry rejects the batch.
pub struct ImportRoomsPlan<'a> {
    rooms: Vec<NewRoom>,
    catalog: &'a RateCatalog,
}

impl<'a> ImportRoomsPlan<'a> {
    /// Creates a planner for `rooms`.
    #[must_use]
    pub const fn new(rooms: Vec<NewRoom>, catalog: &'a RateCatalog) -> Self {
        Self { rooms, catalog }
    }

    /// Validates every entry, including duplicates inside the batch.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, with the field prefixed by the
    /// entry's position (`rooms[2].room_type`).
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let mut plan = OperationPlan::new(format!("Import {} room(s)", self.rooms.len()));
        if self.rooms.is_empty() {
            return Ok(plan.add_warning("no rooms to import"));
        }

        let mut seen = HashSet::with_capacity(self.rooms.len());
        for (index, room) in self.rooms.iter().enumerate() {
            let at = |err: Error| match err {
                Error::Validation { field, message } => Error::Validation {
                    field: format!("rooms[{index}].{field}"),
                    message,
                },
                other => other,
            };

            let (room, nightly_rate) = canonical_room(room.clone(), self.catalog).map_err(at)?;
            if !seen.insert(room.number.clone()) {
                return Err(at(Error::validation(
                    "number",
                    format!("room number '{}' appears more than once", room.number),
                )));
            }
            ensure_number_free(conn, &room.number, None).map_err(at)?;
            plan = plan.add_action(PlanAction::CreateRoom { room, nightly_rate });
        }
        Ok(plan)
    }
}
