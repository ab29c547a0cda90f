//! Import-rooms command implementation.
//!
//! Reads a YAML list of rooms and adds them in a single transaction:
//!
//! ```yaml
//! - number: "101"
//!   category: premium
//!   room_type: Moremi
//! - number: "102"
//!   category: deluxe
//!   room_type: Chobe
//!   housekeeping: dirty
//! ```

use crate::error::CliError;
use crate::utils::{expand_home, open_desk, report, GlobalOptions};
use clap::Args;
use innkeep::NewRoom;
use std::io::Read;
use std::path::PathBuf;

/// Import rooms from a YAML file.
#[derive(Args)]
pub struct ImportRoomsCommand {
    /// YAML file with a list of rooms, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportRoomsCommand {
    fn read_source(&self) -> Result<String, CliError> {
        let mut contents = String::new();
        if self.file.as_os_str() == "-" {
            std::io::stdin().read_to_string(&mut contents)?;
        } else {
            contents = std::fs::read_to_string(expand_home(&self.file))?;
        }
        Ok(contents)
    }

    /// Execute the import-rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let rooms = parse_rooms(&self.read_source()?)?;
        if rooms.is_empty() {
            return Err(CliError::InvalidArguments("no rooms to import".into()));
        }

        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let result = desk.import_rooms(rooms)?;
        report(&result, global);

        if !result.dry_run && !global.quiet {
            println!("Imported {} room(s)", result.rooms_created.len());
        }
        Ok(())
    }
}

fn parse_rooms(text: &str) -> Result<Vec<NewRoom>, CliError> {
    serde_yaml::from_str(text)
        .map_err(|e| CliError::InvalidArguments(format!("invalid room list: {e}")))
}
