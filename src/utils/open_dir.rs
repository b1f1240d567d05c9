use crate::utils::error::{ConvertError, Result};
use std::path::Path;
use std::process::Command;

#[cfg(target_os = "windows")]
const FILE_MANAGER: &str = "explorer";
#[cfg(target_os = "macos")]
const FILE_MANAGER: &str = "open";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FILE_MANAGER: &str = "xdg-open";

/// Opens `dir` in the platform file manager without waiting for it.
pub fn open_in_file_manager(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        return Err(ConvertError::InvalidConfigValueError {
            field: "output.dir".to_string(),
            value: dir.display().to_string(),
            reason: "Directory does not exist".to_string(),
        });
    }

    tracing::debug!("Opening {} with {}", dir.display(), FILE_MANAGER);
    Command::new(FILE_MANAGER).arg(dir).spawn()?;
    Ok(())
}
