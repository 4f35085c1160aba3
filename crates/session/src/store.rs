use std::path::PathBuf;

use anyhow::Result;

/// Single-slot file storage for the persisted session token, at
/// `~/.config/strongroom/session_token`.
///
/// This slot is the sole source of truth for the persisted session.
/// Writing it from anywhere but `SessionManager` is a correctness
/// violation.
#[derive(Debug, Clone)]
pub struct TokenSlot {
    path: PathBuf,
}

impl TokenSlot {
    pub fn new() -> Self {
        let path = strongroom_config::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("session_token");
        Self { path }
    }

    /// Create a token slot at a specific path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored token. Absence and unreadable files both yield
    /// `None`; an empty slot is a normal state.
    pub fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_string();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;

        // Set file permissions to 0600 on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Remove the stored token. A missing file is already the desired
    /// state, not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for TokenSlot {
    fn default() -> Self {
        Self::new()
    }
}
