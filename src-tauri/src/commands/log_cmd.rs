//! Log Commands
//!
//! Lets the frontend show the tail of the application log.

/// Most recent log lines, oldest first
#[tauri::command]
pub async fn recent_log_lines(limit: Option<usize>) -> Result<Vec<String>, String> {
    let mut lines = rolling_logger::recent_lines();
    if let Some(limit) = limit {
        let skip = lines.len().saturating_sub(limit);
        lines.drain(..skip);
    }
    Ok(lines)
}
