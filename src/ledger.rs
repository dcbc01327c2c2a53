//! Points ledger: earning by volunteering, spending in the shop.
//!
//! Both paths are a single read-modify-write of the user profile. Neither touches
//! item stock, project participant counts or the activity history; only the
//! balance and the purchase list are persisted.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{info, warn};

use crate::error::LedgerError;
use crate::kv_store::KeyValueStore;
use crate::local_db_model::{MarketplaceItem, Purchase, UserProfile, VolunteerProject};
use crate::repository::Baghela;

/// Debits `item.points` from `profile` and records the purchase in memory.
///
/// On rejection the profile is left untouched.
pub fn apply_purchase(
    profile: &mut UserProfile,
    item: &MarketplaceItem,
    now: DateTime<Utc>,
) -> Result<Purchase, LedgerError> {
    let price = i64::from(item.points);
    if profile.points < price {
        return Err(LedgerError::InsufficientPoints {
            balance: profile.points,
            price: item.points,
        });
    }

    let purchase = Purchase {
        id: now.timestamp_millis().to_string(),
        item_name: item.name.clone(),
        points: item.points,
        date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    profile.points -= price;
    profile.purchases.push(purchase.clone());
    Ok(purchase)
}

impl<S: KeyValueStore> Baghela<S> {
    /// Credits the project's reward. Returns the new balance, or `None` when no
    /// user is signed in (nothing is written in that case).
    pub fn join_project(&self, project: &VolunteerProject) -> Option<i64> {
        match self.update_user_points(i64::from(project.points)) {
            Some(balance) => {
                info!(
                    "Joined project '{}': +{} points, balance {balance}",
                    project.id, project.points
                );
                Some(balance)
            }
            None => {
                warn!("Join of project '{}' ignored: no user profile", project.id);
                None
            }
        }
    }

    /// Buys `item` at the current time.
    pub fn purchase_item(&self, item: &MarketplaceItem) -> Result<Purchase, LedgerError> {
        self.purchase_item_at(item, Utc::now())
    }

    /// Buys `item`, stamping the purchase with `now`, and persists the profile.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotSignedIn`] without a profile and
    /// [`LedgerError::InsufficientPoints`] when the balance is below the price.
    /// Nothing is written on either.
    pub fn purchase_item_at(
        &self,
        item: &MarketplaceItem,
        now: DateTime<Utc>,
    ) -> Result<Purchase, LedgerError> {
        let mut user = self.get_user().ok_or(LedgerError::NotSignedIn)?;

        let purchase = match apply_purchase(&mut user, item, now) {
            Ok(purchase) => purchase,
            Err(e) => {
                warn!("Purchase of '{}' rejected: {e}", item.id);
                return Err(e);
            }
        };

        self.save_user(&user);
        info!(
            "Purchased '{}' for {} points, balance {}",
            item.name, item.points, user.points
        );
        Ok(purchase)
    }
}
