//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, AmendCommand, AssignStaffCommand, AvailableCommand, BookCommand,
    CancelCommand, ChartCommand, CheckInCommand, CheckOutCommand, CompletionsCommand,
    DeleteRoomCommand, ImportRoomsCommand, InitCommand, LedgerCommand, QuoteCommand,
    ReservationsCommand, RoomTypesCommand, RoomsCommand, SetStatusCommand, UpdateRoomCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Front-desk command line for a hotel property.
#[derive(Parser)]
#[command(name = "innkeep")]
#[command(version, about = "Run the front desk of a hotel property", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "INNKEEP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "INNKEEP_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Refuse to create the database implicitly
    #[arg(long, global = true, env = "INNKEEP_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// List the room types and nightly rates
    RoomTypes(RoomTypesCommand),

    /// Add a room to the inventory
    AddRoom(AddRoomCommand),

    /// Change a room's details
    UpdateRoom(UpdateRoomCommand),

    /// Remove a room (retired if it has history)
    DeleteRoom(DeleteRoomCommand),

    /// Set a room's housekeeping status
    SetStatus(SetStatusCommand),

    /// Assign or clear the staff member for a room
    AssignStaff(AssignStaffCommand),

    /// Add many rooms from a YAML or JSON file
    ImportRooms(ImportRoomsCommand),

    /// List rooms
    Rooms(RoomsCommand),

    /// Book a room for a stay
    Book(BookCommand),

    /// Change a reservation
    Amend(AmendCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// List reservations
    Reservations(ReservationsCommand),

    /// Price a stay
    Quote(QuoteCommand),

    /// List rooms that can be offered
    Available(AvailableCommand),

    /// Show the tape chart of rooms against dates
    Chart(ChartCommand),

    /// Check a guest in
    CheckIn(CheckInCommand),

    /// Check a guest out
    CheckOut(CheckOutCommand),

    /// Show the revenue ledger
    Ledger(LedgerCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
