//! Runtime configuration
//!
//! Paths resolved from environment variables, falling back to `data/` under the project root.

use std::path::PathBuf;

/// Database path override
pub const DATABASE_PATH_VAR: &str = "VISMAYA_DATABASE_PATH";
/// Export directory override
pub const EXPORT_DIR_VAR: &str = "VISMAYA_EXPORT_DIR";

/// Default PDF file name, matching the web download
pub const DEFAULT_PDF_NAME: &str = "womens-diet-plan.pdf";

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub export_dir: PathBuf,
}

impl Config {
    /// Resolve from the environment
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var(DATABASE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir().join("vismaya.db")),
            export_dir: std::env::var(EXPORT_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir().join("exports")),
        }
    }

    /// Default location for a PDF export
    pub fn default_pdf_path(&self) -> PathBuf {
        self.export_dir.join(DEFAULT_PDF_NAME)
    }
}

/// `data/` next to the project root, inferred from the executable location
fn data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.join("data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pdf_path_uses_export_dir() {
        let config = Config {
            database_path: PathBuf::from("/tmp/v.db"),
            export_dir: PathBuf::from("/tmp/exports"),
        };
        assert_eq!(config.default_pdf_path(), PathBuf::from("/tmp/exports/womens-diet-plan.pdf"));
    }

    #[test]
    fn test_data_dir_ends_with_data() {
        assert!(data_dir().ends_with("data"));
    }
}
