//! Init command implementation.
//!
//! Sets up a property's data directory with an empty database and,
//! optionally, a commented starter config. A dry run lists the steps on
//! stderr in the same numbered form as the other commands.

use crate::error::CliError;
use crate::utils::{data_dir, GlobalOptions};
use clap::Parser;
use innkeep::config::CONFIG_FILE;
use innkeep::database::DATABASE_FILE;
use innkeep::operations::{init_database, InitOptions};
use std::path::{Path, PathBuf};

/// Initialize the data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Overwrite existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a commented starter configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// What a real run would do, in order.
    fn planned_steps(&self, data_dir: &Path) -> Result<Vec<String>, CliError> {
        let mut steps = Vec::new();
        if !data_dir.exists() {
            steps.push(format!("create data directory {}", data_dir.display()));
        }

        let db_path = data_dir.join(DATABASE_FILE);
        if db_path.exists() {
            if !self.overwrite {
                return Err(CliError::InvalidArguments(format!(
                    "a database already exists at {}; use --overwrite to replace it",
                    db_path.display()
                )));
            }
            steps.push(format!("discard database {}", db_path.display()));
        }
        steps.push(format!("create empty database {}", db_path.display()));

        if self.with_config {
            let config_path = data_dir.join(CONFIG_FILE);
            if !config_path.exists() {
                steps.push(format!("write starter config {}", config_path.display()));
            }
        }
        Ok(steps)
    }

    /// Execute the init command.
    ///
    /// The `--data-dir` flag names where to create, not where to find.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.data_dir.clone() {
            Some(dir) => dir,
            None => data_dir(global)?,
        };

        if self.dry_run {
            let steps = self.planned_steps(&data_dir)?;
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, step) in steps.iter().enumerate() {
                    eprintln!("  {}. {step}", i + 1);
                }
            }
            return Ok(());
        }

        let replacing = data_dir.join(DATABASE_FILE).exists();
        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        let database = if replacing { "replaced" } else { "created" };
        println!("Property database {database} in {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  data directory: new");
        }
        if result.config_created {
            println!("  config: starter {CONFIG_FILE} written");
        } else if self.with_config {
            println!("  config: existing {CONFIG_FILE} kept");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> InitCommand {
        InitCommand::parse_from(std::iter::once("init").chain(args.iter().copied()))
    }

    #[test]
    fn test_steps_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("lodge");
        let steps = parse(&["--with-config"]).planned_steps(&dir).unwrap();
        assert_eq!(steps.len(), 3);
        assert!(steps[0].starts_with("create data directory"));
        assert!(steps[1].starts_with("create empty database"));
        assert!(steps[2].starts_with("write starter config"));
    }

    #[test]
    fn test_existing_database_needs_overwrite() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DATABASE_FILE), b"").unwrap();

        assert!(parse(&[]).planned_steps(temp.path()).is_err());
        let steps = parse(&["--overwrite"]).planned_steps(temp.path()).unwrap();
        assert!(steps[0].starts_with("discard database"));
        assert!(steps[1].starts_with("create empty database"));
    }
}
