//! Shop profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name given to a profile created implicitly.
pub const DEFAULT_NAME: &str = "New User";
/// Shop name given to a profile created implicitly.
pub const DEFAULT_SHOP_NAME: &str = "My Shop";

/// The seller behind an owner id. One per owner; emails are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing)]
    pub owner: String,
    pub name: String,
    pub email: String,
    pub shop_name: String,
    /// URL on the media host; empty until one is set.
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(owner: &str, name: &str, email: &str, shop_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            shop_name: shop_name.to_string(),
            profile_image: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Profile fields a request may set. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
}

impl ProfileInput {
    /// Trimmed fields, with blank values treated as absent.
    pub fn normalized(&self) -> Self {
        let clean = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            name: clean(&self.name),
            email: clean(&self.email),
            shop_name: clean(&self.shop_name),
        }
    }
}

/// Body of a profile image update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageInput {
    #[serde(default)]
    pub profile_image: String,
}
