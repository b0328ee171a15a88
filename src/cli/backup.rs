//! Backup CLI commands
//!
//! Implements CLI commands for snapshot management.

use std::io::Write;

use clap::Subcommand;

use crate::backup::PruneOutcome;
use crate::display::format_backup_list;
use crate::error::BookstoreResult;

use super::Context;

/// Backup subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupCommands {
    /// Snapshot the database now, then apply retention
    Create,

    /// List snapshots, newest first
    List,

    /// Delete snapshots beyond the retention limit
    Prune,
}

/// Handle a backup command. No subcommand means `create`.
pub fn handle_backup_command<W: Write>(
    ctx: &Context,
    out: &mut W,
    cmd: Option<BackupCommands>,
) -> BookstoreResult<()> {
    match cmd.unwrap_or(BackupCommands::Create) {
        BackupCommands::Create => {
            let (snapshot, outcome) = ctx.inventory().backup()?;
            if snapshot.exists() {
                writeln!(out, "Backup created: {}", snapshot.display())?;
            } else {
                writeln!(out, "No database file yet; nothing to back up.")?;
            }
            write_prune_summary(out, &outcome)?;
        }

        BackupCommands::List => {
            let backups = ctx.backups.list_backups()?;
            writeln!(out, "{}", format_backup_list(&backups, chrono::Local::now()))?;
        }

        BackupCommands::Prune => {
            let outcome = ctx.inventory().prune();
            write_prune_summary(out, &outcome)?;
            if outcome.removed.is_empty() && outcome.is_clean() {
                writeln!(
                    out,
                    "Nothing to prune ({} of {} kept).",
                    outcome.kept, ctx.settings.backup_keep
                )?;
            }
        }
    }

    Ok(())
}

fn write_prune_summary<W: Write>(out: &mut W, outcome: &PruneOutcome) -> BookstoreResult<()> {
    for path in &outcome.removed {
        writeln!(out, "Removed old backup: {}", path.display())?;
    }
    for failure in &outcome.failures {
        writeln!(
            out,
            "Warning: could not remove {}: {}",
            failure.path.display(),
            failure.reason
        )?;
    }
    Ok(())
}
