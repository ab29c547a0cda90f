//! Build script for innkeep-cli.
//!
//! Generates the `innkeep.1` man page into OUT_DIR with clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! outline is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// The command outline for the man page.
///
/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("innkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run the front desk of a hotel property")
        .long_about(
            "Manage rooms, reservations, check-in and check-out, the tape chart and the \
             revenue ledger of a single hotel property",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("INNKEEP_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("INNKEEP_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Refuse to create the database implicitly")
                .global(true)
                .action(ArgAction::SetTrue)
                .env("INNKEEP_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("room-types").about("List the room types and nightly rates"),
            Command::new("add-room").about("Add a room to the inventory"),
            Command::new("update-room").about("Change a room's details"),
            Command::new("delete-room")
                .about("Remove a room")
                .long_about("Remove a room; rooms with past stays are retired instead"),
            Command::new("set-status").about("Set a room's housekeeping status"),
            Command::new("assign-staff").about("Assign or clear the staff member for a room"),
            Command::new("import-rooms").about("Add many rooms from a YAML file"),
            Command::new("rooms").about("List rooms"),
            Command::new("book").about("Book a room for a stay"),
            Command::new("amend").about("Change a reservation"),
            Command::new("cancel").about("Cancel a reservation"),
            Command::new("reservations").about("List reservations"),
            Command::new("quote").about("Price a stay"),
            Command::new("available").about("List rooms that can be offered"),
            Command::new("chart").about("Show the tape chart of rooms against dates"),
            Command::new("check-in")
                .about("Check a guest in")
                .long_about("Check a guest in and post the stay to the revenue ledger"),
            Command::new("check-out").about("Check a guest out"),
            Command::new("ledger").about("Show the revenue ledger"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();
    fs::write(man_dir.join("innkeep.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
