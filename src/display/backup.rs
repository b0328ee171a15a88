//! Backup display formatting

use chrono::{DateTime, Local};

use crate::backup::BackupInfo;

/// Format snapshots as a numbered list, newest first
pub fn format_backup_list(backups: &[BackupInfo], now: DateTime<Local>) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let mut output = String::new();
    for (i, backup) in backups.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} ({} ago, {})\n",
            i + 1,
            backup.filename,
            format_duration(now.signed_duration_since(backup.modified)),
            format_size(backup.size_bytes),
        ));
    }
    output.push_str(&format!("\nTotal: {} backup(s)\n", backups.len()));
    output
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
