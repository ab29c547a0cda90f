//! Main entry point for the innkeep CLI.
//!
//! Front-desk commands for a single hotel property:
//! - rooms: `add-room`, `update-room`, `delete-room`, `set-status`, `assign-staff`
//! - reservations: `book`, `amend`, `cancel`, `check-in`, `check-out`
//! - views: `rooms`, `reservations`, `available`, `chart`, `quote`, `ledger`

use clap::Parser;
use innkeep_cli::cli::{Cli, Command};
use innkeep_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = innkeep::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("Warning: logging unavailable: {e}");
    }

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        Command::Init(cmd) => cmd.execute(&global),
        Command::RoomTypes(cmd) => cmd.execute(&global),
        Command::AddRoom(cmd) => cmd.execute(&global),
        Command::UpdateRoom(cmd) => cmd.execute(&global),
        Command::DeleteRoom(cmd) => cmd.execute(&global),
        Command::SetStatus(cmd) => cmd.execute(&global),
        Command::AssignStaff(cmd) => cmd.execute(&global),
        Command::ImportRooms(cmd) => cmd.execute(&global),
        Command::Rooms(cmd) => cmd.execute(&global),
        Command::Book(cmd) => cmd.execute(&global),
        Command::Amend(cmd) => cmd.execute(&global),
        Command::Cancel(cmd) => cmd.execute(&global),
        Command::Reservations(cmd) => cmd.execute(&global),
        Command::Quote(cmd) => cmd.execute(&global),
        Command::Available(cmd) => cmd.execute(&global),
        Command::Chart(cmd) => cmd.execute(&global),
        Command::CheckIn(cmd) => cmd.execute(&global),
        Command::CheckOut(cmd) => cmd.execute(&global),
        Command::Ledger(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
