//! Typed repositories: one getter/setter pair per collection key.
//!
//! Every getter is a projection over the store and degrades to an empty value
//! when the store fails. Every setter overwrites the whole value under its key;
//! "append" and "update" are read-modify-write cycles with no locking, so all
//! mutations must come from a single writer at a time.

use log::{debug, info, warn};

use crate::json_store::JsonStore;
use crate::kv_store::KeyValueStore;
use crate::local_db_model::{Garden, Helper, MarketplaceItem, UserProfile, VolunteerProject};

pub const GARDENS_KEY: &str = "baghela_gardens";
pub const HELPERS_KEY: &str = "baghela_helpers";
pub const PROJECTS_KEY: &str = "baghela_projects";
pub const MARKETPLACE_KEY: &str = "baghela_marketplace";
pub const USER_KEY: &str = "baghela_user";

pub const ALL_KEYS: [&str; 5] = [
    GARDENS_KEY,
    HELPERS_KEY,
    PROJECTS_KEY,
    MARKETPLACE_KEY,
    USER_KEY,
];

/// Repository facade over one storage backend.
pub struct Baghela<S> {
    store: JsonStore<S>,
}

impl<S: KeyValueStore> Baghela<S> {
    pub fn new(backend: S) -> Self {
        Self {
            store: JsonStore::new(backend),
        }
    }

    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }

    pub fn backend_mut(&mut self) -> &mut S {
        self.store.backend_mut()
    }

    // Gardens

    pub fn get_gardens(&self) -> Vec<Garden> {
        self.store.read(GARDENS_KEY, Vec::new())
    }

    /// Overwrites the garden list. A list holding a non-finite area is not
    /// written, since JSON stores it as `null` and the whole list would no
    /// longer read back.
    pub fn save_gardens(&self, gardens: &[Garden]) {
        if let Some(bad) = gardens.iter().find(|g| !g.area.is_finite()) {
            warn!("Refusing to save gardens: '{}' has area {}", bad.id, bad.area);
            return;
        }
        self.store.write(GARDENS_KEY, gardens);
    }

    /// Appends `garden` to the stored list.
    pub fn add_garden(&self, garden: Garden) {
        let mut gardens = self.get_gardens();
        debug!("Adding garden '{}' after {} existing", garden.id, gardens.len());
        gardens.push(garden);
        self.save_gardens(&gardens);
    }

    // Helpers

    pub fn get_helpers(&self) -> Vec<Helper> {
        self.store.read(HELPERS_KEY, Vec::new())
    }

    pub fn save_helpers(&self, helpers: &[Helper]) {
        if let Some(bad) = helpers.iter().find(|h| !h.rating.is_finite()) {
            warn!("Refusing to save helpers: '{}' has rating {}", bad.id, bad.rating);
            return;
        }
        self.store.write(HELPERS_KEY, helpers);
    }

    // Projects

    pub fn get_projects(&self) -> Vec<VolunteerProject> {
        self.store.read(PROJECTS_KEY, Vec::new())
    }

    pub fn save_projects(&self, projects: &[VolunteerProject]) {
        self.store.write(PROJECTS_KEY, projects);
    }

    pub fn find_project(&self, id: &str) -> Option<VolunteerProject> {
        self.get_projects().into_iter().find(|p| p.id == id)
    }

    // Marketplace

    pub fn get_marketplace_items(&self) -> Vec<MarketplaceItem> {
        self.store.read(MARKETPLACE_KEY, Vec::new())
    }

    pub fn save_marketplace_items(&self, items: &[MarketplaceItem]) {
        self.store.write(MARKETPLACE_KEY, items);
    }

    pub fn find_marketplace_item(&self, id: &str) -> Option<MarketplaceItem> {
        self.get_marketplace_items().into_iter().find(|i| i.id == id)
    }

    // User

    pub fn get_user(&self) -> Option<UserProfile> {
        self.store.read(USER_KEY, None)
    }

    pub fn save_user(&self, user: &UserProfile) {
        self.store.write(USER_KEY, user);
    }

    /// Adds `delta` to the user's balance and returns the new balance.
    /// Without a profile nothing is written and `None` comes back. A delta that
    /// would overflow the balance is dropped and the old balance returned.
    pub fn update_user_points(&self, delta: i64) -> Option<i64> {
        let mut user = self.get_user()?;
        match user.points.checked_add(delta) {
            Some(points) => user.points = points,
            None => {
                warn!("Ignoring points delta {delta}: balance {} would overflow", user.points);
                return Some(user.points);
            }
        }
        self.save_user(&user);
        Some(user.points)
    }

    /// Removes all five collections, returning the store to its first-run state.
    pub fn clear_storage(&self) {
        for key in ALL_KEYS {
            self.store.remove(key);
        }
        info!("Storage cleared");
    }
}
