use std::path::Path;
use tracing::{debug, info};

/// Log the runtime environment relevant to window creation and font discovery
pub fn log_environment(working_dir: &Path) {
    info!("=== Environment ===");
    info!("Working directory: {}", working_dir.display());

    // OS / Distribution
    if let Ok(os_release) = std::fs::read_to_string("/etc/os-release") {
        for line in os_release.lines() {
            if let Some(name) = line.strip_prefix("PRETTY_NAME=") {
                info!("OS: {}", name.trim_matches('"'));
                break;
            }
        }
    }

    match std::env::var("DISPLAY") {
        Ok(name) => info!("Display: {}", name),
        Err(_) => info!("Display: <unset>"),
    }
    if let Ok(session) = std::env::var("XDG_SESSION_TYPE") {
        info!("Session Type: {}", session);
    }
    if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
        debug!("Desktop Environment: {}", desktop);
    }

    info!("===================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_environment_runs() {
        log_environment(Path::new("/tmp"));
        let dir = tempfile::tempdir().unwrap();
        log_environment(dir.path());
    }
}
