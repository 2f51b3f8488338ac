//! Seller profiles.
//!
//! A profile is created on first write. Emails are unique across owners;
//! the store rejects a save that would reuse another owner's email.

pub mod model;

use tracing::info;

use crate::error::{StockError, StockResult};
use crate::identity::Identity;
use crate::store::InventoryStore;
use model::{Profile, ProfileInput, DEFAULT_NAME, DEFAULT_SHOP_NAME};

/// The caller's profile.
pub async fn get_profile(store: &dyn InventoryStore, owner: &str) -> StockResult<Profile> {
    store
        .get_profile(owner)
        .await?
        .ok_or(StockError::ProfileNotFound)
}

/// Create or overwrite the caller's profile. Every field is required.
pub async fn save_profile(
    store: &dyn InventoryStore,
    identity: &Identity,
    input: &ProfileInput,
) -> StockResult<Profile> {
    let input = input.normalized();
    let (Some(name), Some(email), Some(shop_name)) = (input.name, input.email, input.shop_name)
    else {
        return Err(StockError::validation("name, email and shopName are required"));
    };

    let profile = match store.get_profile(&identity.user_id).await? {
        Some(existing) => Profile {
            name,
            email,
            shop_name,
            ..existing
        },
        None => Profile::new(&identity.user_id, &name, &email, &shop_name),
    };
    store.save_profile(profile).await
}

/// Change fields of an existing profile.
pub async fn update_profile(
    store: &dyn InventoryStore,
    owner: &str,
    input: &ProfileInput,
) -> StockResult<Profile> {
    let mut profile = get_profile(store, owner).await?;
    apply(&mut profile, &input.normalized());
    store.save_profile(profile).await
}

/// Change fields of the caller's profile, creating it with defaults if the
/// caller has none yet.
pub async fn upsert_profile(
    store: &dyn InventoryStore,
    identity: &Identity,
    input: &ProfileInput,
) -> StockResult<Profile> {
    let input = input.normalized();
    let profile = match store.get_profile(&identity.user_id).await? {
        Some(mut profile) => {
            apply(&mut profile, &input);
            profile
        }
        None => {
            let email = identity
                .email
                .as_deref()
                .or(input.email.as_deref())
                .ok_or_else(|| StockError::validation("Email is required"))?;
            Profile::new(
                &identity.user_id,
                input.name.as_deref().unwrap_or(DEFAULT_NAME),
                email,
                input.shop_name.as_deref().unwrap_or(DEFAULT_SHOP_NAME),
            )
        }
    };
    store.save_profile(profile).await
}

/// Point the caller's profile at an uploaded image.
pub async fn set_profile_image(
    store: &dyn InventoryStore,
    identity: &Identity,
    url: &str,
) -> StockResult<Profile> {
    let url = url.trim();
    if url.is_empty() {
        return Err(StockError::validation("Profile image URL is required"));
    }

    let mut profile = match store.get_profile(&identity.user_id).await? {
        Some(profile) => profile,
        None => {
            let email = identity
                .email
                .as_deref()
                .ok_or_else(|| StockError::validation("Email is required"))?;
            Profile::new(&identity.user_id, DEFAULT_NAME, email, DEFAULT_SHOP_NAME)
        }
    };
    profile.profile_image = url.to_string();

    let profile = store.save_profile(profile).await?;
    info!(owner = %identity.user_id, "Profile image updated");
    Ok(profile)
}

fn apply(profile: &mut Profile, input: &ProfileInput) {
    if let Some(name) = &input.name {
        profile.name = name.clone();
    }
    if let Some(email) = &input.email {
        profile.email = email.clone();
    }
    if let Some(shop_name) = &input.shop_name {
        profile.shop_name = shop_name.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn caller(user_id: &str, email: Option<&str>) -> Identity {
        Identity {
            user_id: user_id.to_string(),
            email: email.map(str::to_string),
        }
    }

    fn input(name: Option<&str>, email: Option<&str>, shop_name: Option<&str>) -> ProfileInput {
        ProfileInput {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            shop_name: shop_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_save_creates_then_overwrites() {
        let store = MemoryStore::new();
        let me = caller("shop-1", None);

        assert!(matches!(
            get_profile(&store, "shop-1").await,
            Err(StockError::ProfileNotFound)
        ));

        let created = save_profile(&store, &me, &input(Some("Ada"), Some("ada@example.com"), Some("Corner")))
            .await
            .unwrap();
        let saved = save_profile(&store, &me, &input(Some("Ada L"), Some("ada@example.com"), Some("Corner Shop")))
            .await
            .unwrap();

        assert_eq!(saved.id, created.id);
        assert_eq!(saved.shop_name, "Corner Shop");
        assert_eq!(get_profile(&store, "shop-1").await.unwrap().name, "Ada L");
    }

    #[tokio::test]
    async fn test_save_requires_every_field() {
        let store = MemoryStore::new();
        let err = save_profile(&store, &caller("shop-1", None), &input(Some("Ada"), Some(" "), Some("Corner"))).await;
        assert!(matches!(err, Err(StockError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_needs_existing_profile() {
        let store = MemoryStore::new();
        let err = update_profile(&store, "shop-1", &input(Some("Ada"), None, None)).await;
        assert!(matches!(err, Err(StockError::ProfileNotFound)));

        save_profile(&store, &caller("shop-1", None), &input(Some("Ada"), Some("ada@example.com"), Some("Corner")))
            .await
            .unwrap();
        let updated = update_profile(&store, "shop-1", &input(None, None, Some("Kiosk")))
            .await
            .unwrap();
        assert_eq!(updated.name, "Ada");
        assert_eq!(updated.shop_name, "Kiosk");
    }

    #[tokio::test]
    async fn test_upsert_creates_with_defaults() {
        let store = MemoryStore::new();
        let profile = upsert_profile(&store, &caller("shop-1", Some("ada@example.com")), &ProfileInput::default())
            .await
            .unwrap();
        assert_eq!(profile.name, DEFAULT_NAME);
        assert_eq!(profile.shop_name, DEFAULT_SHOP_NAME);
        assert_eq!(profile.email, "ada@example.com");

        let err = upsert_profile(&store, &caller("shop-2", None), &ProfileInput::default()).await;
        assert!(matches!(err, Err(StockError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_email_already_in_use() {
        let store = MemoryStore::new();
        upsert_profile(&store, &caller("shop-1", Some("ada@example.com")), &ProfileInput::default())
            .await
            .unwrap();
        upsert_profile(&store, &caller("shop-2", Some("bob@example.com")), &ProfileInput::default())
            .await
            .unwrap();

        let err = upsert_profile(&store, &caller("shop-2", None), &input(None, Some("ada@example.com"), None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email already in use");
        assert_eq!(get_profile(&store, "shop-2").await.unwrap().email, "bob@example.com");

        // Re-saving one's own email is fine.
        upsert_profile(&store, &caller("shop-1", None), &input(Some("Ada"), Some("ada@example.com"), None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_profile_image() {
        let store = MemoryStore::new();
        let me = caller("shop-1", Some("ada@example.com"));

        assert!(matches!(
            set_profile_image(&store, &me, "  ").await,
            Err(StockError::ValidationError(_))
        ));

        let profile = set_profile_image(&store, &me, "https://media.example/ada.png").await.unwrap();
        assert_eq!(profile.profile_image, "https://media.example/ada.png");
        assert_eq!(profile.name, DEFAULT_NAME);

        let profile = set_profile_image(&store, &caller("shop-1", None), "https://media.example/v2.png")
            .await
            .unwrap();
        assert_eq!(profile.profile_image, "https://media.example/v2.png");
        assert_eq!(profile.email, "ada@example.com");
    }
}
