// src/process/ps.rs

//! Platform-specific process listing.
//!
//! Each listing prints one PID per line for every process whose name is
//! exactly `name`. When several processes share the name, their order is up
//! to the platform tool.

/// Builds the program and arguments that list PIDs for a process name.
pub type ProcessLister = fn(&str) -> (String, Vec<String>);

#[cfg(target_os = "linux")]
pub fn ps_command(name: &str) -> (String, Vec<String>) {
    (
        "ps".to_string(),
        vec![
            "-C".to_string(),
            name.to_string(),
            "-o".to_string(),
            "pid=".to_string(),
        ],
    )
}

#[cfg(not(target_os = "linux"))]
pub fn ps_command(name: &str) -> (String, Vec<String>) {
    ("pgrep".to_string(), vec!["-x".to_string(), name.to_string()])
}
