//! Profile MCP Tools
//!
//! Read and write the user profile used on exports.

use serde::Serialize;
use thiserror::Error;

use crate::db::DbError;
use crate::models::{ProfileStore, UserProfile};

/// Profile tool errors
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("default_age must be greater than zero")]
    ZeroDefaultAge,

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ProfileError {
    /// True when the caller sent bad input, as opposed to a storage failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ProfileError::ZeroDefaultAge | ProfileError::Db(DbError::EmptyProfileName))
    }
}

/// Response for get_profile
#[derive(Debug, Serialize)]
pub struct GetProfileResponse {
    pub profile: Option<UserProfile>,
    pub message: String,
}

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub success: bool,
    pub profile: UserProfile,
}

/// Get the stored profile
pub fn get_profile(store: &dyn ProfileStore) -> Result<GetProfileResponse, ProfileError> {
    let profile = store.load_profile()?;
    let message = match &profile {
        Some(p) => format!("Profile found for {}", p.name),
        None => "No profile set. Call set_profile to add a name for exports.".to_string(),
    };
    Ok(GetProfileResponse { profile, message })
}

/// Create or replace the profile
pub fn set_profile(
    store: &dyn ProfileStore,
    name: &str,
    default_age: Option<u32>,
) -> Result<SetProfileResponse, ProfileError> {
    if default_age == Some(0) {
        return Err(ProfileError::ZeroDefaultAge);
    }
    let profile = store.save_profile(name, default_age)?;
    Ok(SetProfileResponse { success: true, profile })
}
