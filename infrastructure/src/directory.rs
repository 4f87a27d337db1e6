//! Doctor directory loading
//!
//! The specialist directory normally ships built in; a deployment can
//! replace it with a TOML file of `[[doctors]]` tables.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use triage_domain::{Doctor, default_directory};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("could not read directory file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse directory file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("directory file lists no doctors")]
    Empty,
}

#[derive(Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    doctors: Vec<Doctor>,
}

/// Load the doctor directory from a TOML file.
pub fn load_directory_file(path: impl AsRef<Path>) -> Result<Vec<Doctor>, DirectoryError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let parsed: DirectoryFile = toml::from_str(&content)?;
    if parsed.doctors.is_empty() {
        return Err(DirectoryError::Empty);
    }
    Ok(parsed.doctors)
}

/// Resolve the doctor directory for a run.
///
/// With no path configured, the built-in directory is used. A configured
/// file that fails to load falls back to the built-in directory with a
/// warning rather than blocking triage.
pub fn load_directory(path: Option<&Path>) -> Vec<Doctor> {
    match path {
        None => default_directory(),
        Some(path) => match load_directory_file(path) {
            Ok(doctors) => {
                debug!("loaded {} doctors from {}", doctors.len(), path.display());
                doctors
            }
            Err(e) => {
                warn!(
                    "Could not load doctor directory {}: {}; using built-in directory",
                    path.display(),
                    e
                );
                default_directory()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_path_uses_builtin_directory() {
        let directory = load_directory(None);
        assert_eq!(directory, default_directory());
    }

    #[test]
    fn test_loads_doctors_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[doctors]]
id = 1
name = "Dr. Ada Okafor"
specialty = "Cardiology"
hospital = "Riverside Medical"
contact = "+1 (555) 020-1111"
email = "a.okafor@riverside.med"
availability = "Available"
"#
        )
        .unwrap();

        let doctors = load_directory_file(file.path()).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].specialty, "Cardiology");
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            load_directory_file(file.path()),
            Err(DirectoryError::Empty)
        ));
    }

    #[test]
    fn test_unreadable_path_falls_back_to_builtin() {
        let directory = load_directory(Some(Path::new("/nonexistent/doctors.toml")));
        assert_eq!(directory, default_directory());
    }
}
