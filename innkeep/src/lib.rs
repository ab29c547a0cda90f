#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for running a small hotel property: rooms, reservations,
//! check-in and check-out, and the revenue ledger.
//!
//! ## Core Types
//!
//! - [`Room`] and [`Category`]: The inventory, with housekeeping and
//!   occupancy tracked separately
//! - [`Reservation`] and [`StayDates`]: Bookings over half-open night ranges
//! - [`Money`]: Amounts in minor units
//! - [`RateCatalog`]: Nightly rates per category and room type
//! - [`FrontDesk`]: Every property operation over one [`Database`]
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::{compute_quote, Category, Money, QuoteRequest, RateCatalog, StayDates};
//!
//! let catalog = RateCatalog::default();
//! let rate = catalog.resolve(Category::Premium, "moremi").unwrap().rate;
//! assert_eq!(rate, Money::from_major(400));
//!
//! let stay = StayDates::new(
//!     NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
//! ).unwrap();
//! assert_eq!(stay.nights(), 5);
//!
//! let quote = compute_quote(&QuoteRequest::new(rate).with_dates(stay.check_in(), stay.check_out()));
//! assert_eq!(quote.final_amount, Money::from_major(2000));
//! ```

pub mod availability;
pub mod catalog;
pub mod config;
pub mod database;
pub mod dates;
pub mod desk;
pub mod error;
pub mod logging;
pub mod money;
pub mod operations;
pub mod pricing;
pub mod reservation;
pub mod revenue;
pub mod room;

// Re-export key types at crate root for convenience
pub use availability::{
    find_available_rooms, project_grid, reservation_at, AvailabilityQuery, CellBooking, TapeCell,
    TapeChart, TapeRow,
};
pub use catalog::{RateCatalog, RoomTypeRate};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, ReservationFilter};
pub use dates::{DateRange, StayDates};
pub use desk::FrontDesk;
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use money::Money;
pub use operations::{
    AmendOptions, BookingOptions, CheckInOptions, DeleteOutcome, ExecutionResult, OperationPlan,
    PlanAction, PlanExecutor, RoomPatch,
};
pub use pricing::{compute_quote, PricingQuote, QuoteRequest};
pub use reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
pub use revenue::{LedgerSummary, NewRevenueEntry, RevenueEntry, RevenueEntryId};
pub use room::{Category, HousekeepingStatus, NewRoom, Occupancy, Room, RoomId};
