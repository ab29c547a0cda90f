//! Room types for the property's inventory.
//!
//! A room carries two independent status axes: housekeeping (is it clean?)
//! and occupancy (is a guest checked in?). Housekeeping staff move the first
//! freely; only check-in, check-out and cancellation move the second.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::reservation::ValidationError;

/// Opaque identifier of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Error returned when a status or category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariantError {
    /// What kind of value was being parsed.
    pub kind: &'static str,
    /// The rejected text.
    pub value: String,
}

impl fmt::Display for UnknownVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariantError {}

/// Normalises user input for enum parsing: lowercase, `-`/space to `_`.
fn normalise(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Pricing tier grouping one or more room types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Entry tier.
    Standard,
    /// One step above standard.
    Superior,
    /// Deluxe tier.
    Deluxe,
    /// Premium tier.
    Premium,
    /// Executive tier.
    Executive,
    /// Top tier.
    Kings,
}

impl Category {
    /// All categories, lowest tier first.
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::Superior,
        Self::Deluxe,
        Self::Premium,
        Self::Executive,
        Self::Kings,
    ];

    /// Storage and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Superior => "superior",
            Self::Deluxe => "deluxe",
            Self::Premium => "premium",
            Self::Executive => "executive",
            Self::Kings => "kings",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownVariantError {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Cleanliness state maintained by housekeeping.
///
/// Any status may follow any other; who may set which status is decided by
/// the caller's authorization layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousekeepingStatus {
    /// Cleaned and ready to sell.
    Clean,
    /// Needs cleaning.
    Dirty,
    /// Cleaned, awaiting supervisor inspection.
    Inspect,
    /// Unsellable until repaired.
    OutOfOrder,
}

impl HousekeepingStatus {
    /// All statuses.
    pub const ALL: [Self; 4] = [Self::Clean, Self::Dirty, Self::Inspect, Self::OutOfOrder];

    /// Storage and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Inspect => "inspect",
            Self::OutOfOrder => "out_of_order",
        }
    }

    /// Returns `true` if the room can be handed to an arriving guest.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl fmt::Display for HousekeepingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HousekeepingStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        let wanted = if wanted == "outoforder" || wanted == "ooo" {
            "out_of_order".to_string()
        } else {
            wanted
        };
        Self::ALL
            .into_iter()
            .find(|h| h.as_str() == wanted)
            .ok_or_else(|| UnknownVariantError {
                kind: "housekeeping status",
                value: s.to_string(),
            })
    }
}

/// Whether a guest is currently checked in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    /// No guest in residence.
    #[default]
    Vacant,
    /// A checked-in guest holds the room.
    Occupied,
}

impl Occupancy {
    /// Storage and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vacant => "vacant",
            Self::Occupied => "occupied",
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occupancy {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "vacant" => Ok(Self::Vacant),
            "occupied" => Ok(Self::Occupied),
            _ => Err(UnknownVariantError {
                kind: "occupancy",
                value: s.to_string(),
            }),
        }
    }
}

/// A room in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Row id.
    pub id: RoomId,
    /// Human-facing room number, unique among live rooms.
    pub number: String,
    /// Pricing tier.
    pub category: Category,
    /// Room type within the category.
    pub room_type: String,
    /// Price of one night.
    pub nightly_rate: Money,
    /// Cleanliness axis.
    pub housekeeping: HousekeepingStatus,
    /// Residence axis.
    pub occupancy: Occupancy,
    /// Opaque staff reference from the staff directory.
    pub assigned_staff: Option<String>,
}

impl Room {
    /// Returns `true` if the room is clean and nobody is checked in.
    #[must_use]
    pub fn is_sellable_now(&self) -> bool {
        self.housekeeping.is_ready() && self.occupancy == Occupancy::Vacant
    }
}

/// Everything needed to add a room to the inventory.
///
/// The nightly rate is not supplied; it comes from the rate catalog.
///
/// # Examples
///
/// ```
/// use innkeep::{Category, HousekeepingStatus, NewRoom};
///
/// let room = NewRoom::new("101", Category::Premium, "Moremi")
///     .unwrap()
///     .with_housekeeping(HousekeepingStatus::Dirty);
/// assert_eq!(room.number, "101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewRoom {
    /// Room number.
    pub number: String,
    /// Pricing tier.
    pub category: Category,
    /// Room type name.
    pub room_type: String,
    /// Initial housekeeping status.
    #[serde(default = "default_housekeeping")]
    pub housekeeping: HousekeepingStatus,
    /// Optional staff assignment.
    #[serde(default)]
    pub assigned_staff: Option<String>,
}

const fn default_housekeeping() -> HousekeepingStatus {
    HousekeepingStatus::Clean
}

impl NewRoom {
    /// Creates a room request with Clean status and no staff.
    ///
    /// # Errors
    ///
    /// Returns an error if the number or room type is blank.
    pub fn new(
        number: impl Into<String>,
        category: Category,
        room_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let room = Self {
            number: number.into(),
            category,
            room_type: room_type.into(),
            housekeeping: HousekeepingStatus::Clean,
            assigned_staff: None,
        };
        room.normalised()
    }

    /// Sets the initial housekeeping status.
    #[must_use]
    pub const fn with_housekeeping(mut self, status: HousekeepingStatus) -> Self {
        self.housekeeping = status;
        self
    }

    /// Sets the initial staff assignment.
    #[must_use]
    pub fn with_staff(mut self, staff: Option<String>) -> Self {
        self.assigned_staff = staff;
        self
    }

    /// Trims text fields and rejects blank ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the number, type or staff id is blank.
    pub fn normalised(mut self) -> Result<Self, ValidationError> {
        self.number = require_text("number", &self.number)?;
        self.room_type = require_text("room_type", &self.room_type)?;
        self.assigned_staff = self
            .assigned_staff
            .as_deref()
            .map(|s| require_text("assigned_staff", s))
            .transpose()?;
        Ok(self)
    }
}

/// Trims `value` and fails if nothing is left.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.into(),
            message: "must be non-empty after trimming whitespace".into(),
        });
    }
    Ok(trimmed.to_string())
}
