//! The category → room type → nightly rate table.
//!
//! A room's rate is looked up here from its (category, type) pair; rooms do
//! not carry independently edited rates except through an explicit
//! administrative override.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::money::Money;
use crate::room::Category;

/// One named room type and its nightly rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomTypeRate {
    /// The tier the type belongs to.
    pub category: Category,
    /// The type's display name.
    pub name: String,
    /// Price of one night.
    #[serde(with = "crate::money::decimal")]
    pub rate: Money,
}

impl RoomTypeRate {
    fn new(category: Category, name: &str, major: i64) -> Self {
        Self {
            category,
            name: name.to_string(),
            rate: Money::from_major(major),
        }
    }
}

/// The property's fixed rate table.
///
/// # Examples
///
/// ```
/// use innkeep::{Category, Money, RateCatalog};
///
/// let catalog = RateCatalog::default();
/// let moremi = catalog.lookup(Category::Premium, "moremi").unwrap();
/// assert_eq!(moremi.name, "Moremi");
/// assert_eq!(moremi.rate, Money::from_major(400));
///
/// // A type is only valid inside its own category.
/// assert!(catalog.lookup(Category::Standard, "Moremi").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCatalog {
    entries: Vec<RoomTypeRate>,
}

impl Default for RateCatalog {
    fn default() -> Self {
        use Category::{Deluxe, Executive, Kings, Premium, Standard, Superior};
        Self {
            entries: vec![
                RoomTypeRate::new(Standard, "Kalahari", 250),
                RoomTypeRate::new(Standard, "Makgadikgadi", 280),
                RoomTypeRate::new(Superior, "Tuli", 320),
                RoomTypeRate::new(Deluxe, "Savuti", 360),
                RoomTypeRate::new(Premium, "Moremi", 400),
                RoomTypeRate::new(Premium, "Linyanti", 450),
                RoomTypeRate::new(Executive, "Okavango", 550),
                RoomTypeRate::new(Kings, "Chobe", 750),
            ],
        }
    }
}

impl RateCatalog {
    /// Builds a catalog from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a name is blank, a rate is not
    /// positive, or a type name appears twice (case-insensitively).
    pub fn new(entries: Vec<RoomTypeRate>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::validation(
                "room_types",
                "at least one room type is required",
            ));
        }

        let mut seen: Vec<String> = Vec::with_capacity(entries.len());
        let mut cleaned = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(Error::validation("room_types", "room type name is empty"));
            }
            if !entry.rate.is_positive() {
                return Err(Error::validation(
                    "room_types",
                    format!("rate for '{name}' must be positive"),
                ));
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                return Err(Error::validation(
                    "room_types",
                    format!("room type '{name}' is listed more than once"),
                ));
            }
            seen.push(key);
            cleaned.push(RoomTypeRate { name, ..entry });
        }

        Ok(Self { entries: cleaned })
    }

    /// All entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[RoomTypeRate] {
        &self.entries
    }

    /// Finds `room_type` inside `category`, ignoring case.
    #[must_use]
    pub fn lookup(&self, category: Category, room_type: &str) -> Option<&RoomTypeRate> {
        let wanted = room_type.trim();
        self.entries
            .iter()
            .find(|e| e.category == category && e.name.eq_ignore_ascii_case(wanted))
    }

    /// Like [`lookup`](Self::lookup) but reports a validation error naming
    /// the types that are valid for the category.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the type does not belong to the category.
    pub fn resolve(&self, category: Category, room_type: &str) -> Result<&RoomTypeRate> {
        self.lookup(category, room_type).ok_or_else(|| {
            let valid: Vec<&str> = self.types_in(category).map(|e| e.name.as_str()).collect();
            let hint = if valid.is_empty() {
                format!("category {category} has no room types")
            } else {
                format!("valid types for {category}: {}", valid.join(", "))
            };
            Error::validation(
                "room_type",
                format!("'{}' is not a {category} room type ({hint})", room_type.trim()),
            )
        })
    }

    /// Entries belonging to `category`.
    pub fn types_in(&self, category: Category) -> impl Iterator<Item = &RoomTypeRate> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}
