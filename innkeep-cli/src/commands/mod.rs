//! CLI command implementations.
//!
//! Inventory: `room-types`, `add-room`, `update-room`, `delete-room`,
//! `set-status`, `assign-staff`, `import-rooms`, `rooms`.
//! Reservations: `book`, `amend`, `cancel`, `reservations`.
//! Queries: `quote`, `available`, `chart`, `ledger`.
//! Stays: `check-in`, `check-out`.
//! Setup: `init`, `completions`.

pub mod add_room;
pub mod amend;
pub mod assign_staff;
pub mod available;
pub mod book;
pub mod cancel;
pub mod chart;
pub mod check_in;
pub mod check_out;
pub mod completions;
pub mod delete_room;
pub mod import_rooms;
pub mod init;
pub mod ledger;
pub mod quote;
pub mod reservations;
pub mod room_types;
pub mod rooms;
pub mod set_status;
pub mod update_room;

pub use add_room::AddRoomCommand;
pub use amend::AmendCommand;
pub use assign_staff::AssignStaffCommand;
pub use available::AvailableCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use chart::ChartCommand;
pub use check_in::CheckInCommand;
pub use check_out::CheckOutCommand;
pub use completions::CompletionsCommand;
pub use delete_room::DeleteRoomCommand;
pub use import_rooms::ImportRoomsCommand;
pub use init::InitCommand;
pub use ledger::LedgerCommand;
pub use quote::QuoteCommand;
pub use reservations::ReservationsCommand;
pub use room_types::RoomTypesCommand;
pub use rooms::RoomsCommand;
pub use set_status::SetStatusCommand;
pub use update_room::UpdateRoomCommand;
