//! Delivery area gate
//!
//! Answers whether a postcode is deliverable using the admin-curated
//! `allowed_pincodes` list. Exact string membership only; no prefix or
//! geographic matching.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::repository::{app_config, RepoResult};
use shared::models::ALLOWED_PINCODES_KEY;

/// Estimated delivery window for serviceable areas (minutes)
const SERVICEABLE_DELIVERY_MINUTES: i32 = 10;

/// Pincode check result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeCheck {
    pub serviceable: bool,
    /// Minutes, absent when not serviceable
    pub estimated_delivery: Option<i32>,
    pub message: String,
}

/// Check a postcode against the configured service area.
///
/// A missing or non-list config entry means no area is serviceable.
pub async fn check_pincode(pool: &SqlitePool, pincode: &str) -> RepoResult<PincodeCheck> {
    let serviceable = app_config::get_value(pool, ALLOWED_PINCODES_KEY)
        .await?
        .map(|value| value.contains(pincode))
        .unwrap_or(false);

    Ok(if serviceable {
        PincodeCheck {
            serviceable: true,
            estimated_delivery: Some(SERVICEABLE_DELIVERY_MINUTES),
            message: format!(
                "Great! We deliver to your area in {} minutes",
                SERVICEABLE_DELIVERY_MINUTES
            ),
        }
    } else {
        PincodeCheck {
            serviceable: false,
            estimated_delivery: None,
            message: "Sorry, we don't deliver to this pincode yet".to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::app_config::tests::test_pool;
    use shared::models::{AppConfigUpsert, ConfigValue};

    async fn seed_pincodes(pool: &SqlitePool, pincodes: &[&str]) {
        app_config::upsert(
            pool,
            AppConfigUpsert {
                key: ALLOWED_PINCODES_KEY.into(),
                value: ConfigValue::StringList(
                    pincodes.iter().map(|p| p.to_string()).collect(),
                ),
                description: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn listed_pincode_is_serviceable() {
        let pool = test_pool().await;
        seed_pincodes(&pool, &["560001", "560102"]).await;

        let check = check_pincode(&pool, "560102").await.unwrap();
        assert!(check.serviceable);
        assert_eq!(check.estimated_delivery, Some(10));
    }

    #[tokio::test]
    async fn unlisted_pincode_has_no_estimate() {
        let pool = test_pool().await;
        seed_pincodes(&pool, &["560001"]).await;

        let check = check_pincode(&pool, "999999").await.unwrap();
        assert!(!check.serviceable);
        assert_eq!(check.estimated_delivery, None);
    }

    #[tokio::test]
    async fn missing_config_means_not_serviceable() {
        let pool = test_pool().await;
        let check = check_pincode(&pool, "560001").await.unwrap();
        assert!(!check.serviceable);
    }
}
