//! Input validation for dependency names.
//!
//! Names are used as graph keys and show up in every trace line, so they are
//! restricted to a small, printable character set.

use anyhow::{bail, Result};

/// Maximum allowed length for dependency names.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum allowed length for descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validates a dependency name.
///
/// A name is valid if:
/// - It is not empty
/// - It is no longer than MAX_NAME_LENGTH characters
/// - It contains only alphanumeric characters, dashes, underscores and dots
///
/// # Examples
///
/// ```
/// use matryoshka::validation::validate_name;
///
/// assert!(validate_name("git").is_ok());
/// assert!(validate_name("python3.12_dev-tools").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("rm -rf").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Name cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        bail!("Name '{name}' contains invalid characters. Use only alphanumeric characters, dashes (-), underscores (_) and dots (.)");
    }

    Ok(())
}

/// Validates that a description is within acceptable length limits.
pub fn validate_description(description: &str) -> Result<()> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        bail!(
            "Description too long: {} characters (max {})",
            description.len(),
            MAX_DESCRIPTION_LENGTH
        );
    }

    Ok(())
}

/// Clap value parser for dependency name arguments.
pub fn clap_name_validator(s: &str) -> Result<String, String> {
    validate_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
