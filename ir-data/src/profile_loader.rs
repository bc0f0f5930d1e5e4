use std::fs;
use std::path::Path;

use ir_core::IrRequest;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a household profile.
#[derive(Debug, Error)]
pub enum ProfileLoaderError {
    #[error("Failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported profile format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),
}

/// Document format of a profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Toml,
    Json,
}

impl ProfileFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ProfileLoaderError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(ProfileFormat::Toml),
            "json" => Ok(ProfileFormat::Json),
            _ => Err(ProfileLoaderError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Loader for [`IrRequest`] profiles.
///
/// A profile describes one household: its status and location, its
/// dependants, the declared incomes and the capital-income mode. Missing
/// fields read as zero or as their default.
pub struct ProfileLoader;

impl ProfileLoader {
    pub fn parse(
        text: &str,
        format: ProfileFormat,
    ) -> Result<IrRequest, ProfileLoaderError> {
        let request = match format {
            ProfileFormat::Toml => toml::from_str(text)?,
            ProfileFormat::Json => serde_json::from_str(text)?,
        };
        Ok(request)
    }

    /// Read and parse the profile at `path`, choosing the format from its
    /// extension.
    pub fn load(path: &Path) -> Result<IrRequest, ProfileLoaderError> {
        let format = ProfileFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        let request = Self::parse(&text, format)?;

        debug!(path = %path.display(), ?format, "profile loaded");
        Ok(request)
    }
}
