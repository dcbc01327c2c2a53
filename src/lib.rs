//! # Baghela Core
//!
//! Local storage and points ledger for the ბაღელა community garden marketplace:
//! gardens for rent, garden helpers, volunteer projects that pay out points, and
//! a shop where points are spent. Everything lives in a local key-value store;
//! there is no server.
//!
//! ## Layers
//!
//! - [`kv_store::KeyValueStore`]: string get/set/remove over a backend, either
//!   LMDB ([`local_db_state::AppDbState`]) or memory ([`kv_store::MemoryStore`])
//! - [`json_store::JsonStore`]: typed JSON read/write that never fails visibly
//! - [`repository::Baghela`]: one accessor pair per collection key
//! - seed initializer, ledger and catalog queries as methods on [`Baghela`]
//!
//! ## Quick Start
//!
//! ```
//! use baghela_core::{Baghela, MemoryStore};
//!
//! let app = Baghela::new(MemoryStore::new());
//! app.initialize_storage();
//!
//! let fertilizer = app.find_marketplace_item("3").unwrap();
//! app.purchase_item(&fertilizer).unwrap();
//! assert_eq!(app.get_user().unwrap().points, 270);
//! ```
//!
//! ## FFI Functions
//!
//! Every function below returns a heap-allocated C string containing a JSON
//! [`AppResponse`](app_response::AppResponse); release it with [`free_response`].
//!
//! - [`create_store`] - Open a store from a JSON [`StoreConfig`]
//! - [`initialize_storage`] - Seed empty collections
//! - [`get_gardens`], [`get_helpers`], [`get_projects`], [`get_marketplace_items`], [`get_user`]
//! - [`add_garden`], [`add_rental_listing`] - Append to the garden list
//! - [`join_project`] - Earn a project's points
//! - [`purchase_item`] - Spend points in the shop
//! - [`clear_storage`] - Remove all collections
//! - [`close_store`] / [`destroy_store`] - Connection cleanup

pub mod app_response;
pub mod catalog;
pub mod config;
pub mod error;
pub mod json_store;
pub mod kv_store;
pub mod ledger;
pub mod local_db_model;
pub mod local_db_state;
pub mod repository;
pub mod seed;

pub use crate::config::StoreConfig;
pub use crate::error::{GardenError, HelperError, LedgerError, StoreError};
pub use crate::kv_store::{KeyValueStore, MemoryStore};
pub use crate::local_db_state::AppDbState;
pub use crate::repository::Baghela;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use chrono::Utc;
use log::{info, warn};
use serde_json::json;

use crate::app_response::AppResponse;
use crate::catalog::NewGardenListing;
use crate::local_db_model::Garden;

/// The store handle handed across the FFI boundary.
pub type LocalBaghela = Baghela<AppDbState>;

/// Opens the LMDB store described by a JSON [`StoreConfig`].
///
/// Returns a pointer to the store on success, or a null pointer on failure.
/// Release it with [`destroy_store`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use baghela_core::create_store;
///
/// let config = CString::new(r#"{"path":"baghela_demo"}"#).unwrap();
/// let store = create_store(config.as_ptr());
/// assert!(!store.is_null());
/// ```
///
/// # Errors
///
/// Returns null if:
/// - The config pointer is null or not valid UTF-8
/// - The config is not valid JSON
/// - LMDB fails to open the environment
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(config_json: *const c_char) -> *mut LocalBaghela {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let config_str = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    let config: StoreConfig = match serde_json::from_str(config_str) {
        Ok(c) => c,
        Err(e) => {
            warn!("Invalid store config: {e}");
            return std::ptr::null_mut();
        }
    };

    info!("Opening store at: {}", config.lmdb_dir());

    match AppDbState::init(config) {
        Ok(state) => Box::into_raw(Box::new(Baghela::new(state))),
        Err(e) => {
            warn!("Failed to open store: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Seeds every empty collection and reports which ones were filled.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn initialize_storage(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "initialize_storage") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::json(&state.initialize_storage()))
}

/// Returns all gardens as a JSON array.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_gardens(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "get_gardens") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::json(&state.get_gardens()))
}

/// Returns all helpers as a JSON array.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_helpers(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "get_helpers") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::json(&state.get_helpers()))
}

/// Returns all volunteer projects as a JSON array.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_projects(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "get_projects") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::json(&state.get_projects()))
}

/// Returns all shop items as a JSON array.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_marketplace_items(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "get_marketplace_items") {
        Ok(s) => s,
        Err(err) => return err,
    };
    response_to_c_string(&AppResponse::json(&state.get_marketplace_items()))
}

/// Returns the user profile, or `NotFound` when nobody is signed in.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_user(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "get_user") {
        Ok(s) => s,
        Err(err) => return err,
    };
    match state.get_user() {
        Some(user) => response_to_c_string(&AppResponse::json(&user)),
        None => response_to_c_string(&AppResponse::NotFound("No user profile".to_string())),
    }
}

/// Appends a garden given as JSON. The garden must satisfy
/// [`Garden::validate`].
///
/// # JSON Format
///
/// ```json
/// {
///   "id": "4", "name": "...", "location": "...", "area": 120,
///   "type": "...", "owner": "...", "description": "...",
///   "forRent": false
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_garden(state: *mut LocalBaghela, json_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "add_garden") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let garden: Garden = match serde_json::from_str(&json_str) {
        Ok(g) => g,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid garden JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match garden.checked() {
        Ok(garden) => {
            state.add_garden(garden.clone());
            response_to_c_string(&AppResponse::json(&garden))
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Builds a for-rent garden from the rental form fields and appends it.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_rental_listing(state: *mut LocalBaghela, json_ptr: *const c_char) -> *const c_char {
    let state = match state_ref(state, "add_rental_listing") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(err) => return err,
    };

    let listing: NewGardenListing = match serde_json::from_str(&json_str) {
        Ok(l) => l,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid listing JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match state.add_rental_listing(listing, Utc::now()) {
        Ok(garden) => response_to_c_string(&AppResponse::json(&garden)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Credits the reward of the project with the given id.
///
/// Responds with `{"balance": <new balance>}`, or `{"balance": null}` when no
/// user is signed in (the join is ignored).
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn join_project(state: *mut LocalBaghela, id: *const c_char) -> *const c_char {
    let state = match state_ref(state, "join_project") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    match state.find_project(&id_str) {
        Some(project) => {
            let balance = state.join_project(&project);
            response_to_c_string(&AppResponse::json(&json!({ "balance": balance })))
        }
        None => {
            let not_found = AppResponse::NotFound(format!("No project found with id: {id_str}"));
            response_to_c_string(&not_found)
        }
    }
}

/// Buys the shop item with the given id and responds with the purchase record.
/// Ledger refusals come back as `Rejected`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn purchase_item(state: *mut LocalBaghela, id: *const c_char) -> *const c_char {
    let state = match state_ref(state, "purchase_item") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    let item = match state.find_marketplace_item(&id_str) {
        Some(item) => item,
        None => {
            let not_found = AppResponse::NotFound(format!("No item found with id: {id_str}"));
            return response_to_c_string(&not_found);
        }
    };

    match state.purchase_item(&item) {
        Ok(purchase) => response_to_c_string(&AppResponse::json(&purchase)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Removes all five collections. The next [`initialize_storage`] reseeds them.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn clear_storage(state: *mut LocalBaghela) -> *const c_char {
    let state = match state_ref(state, "clear_storage") {
        Ok(s) => s,
        Err(err) => return err,
    };
    state.clear_storage();
    response_to_c_string(&AppResponse::success("Storage cleared"))
}

/// Closes the LMDB environment. The handle stays valid; reads degrade to
/// empty values and writes are dropped until the store is reopened.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut LocalBaghela) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
            return response_to_c_string(&error);
        }
    };

    match state.backend_mut().close_database() {
        Ok(()) => response_to_c_string(&AppResponse::success("Store closed successfully")),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Closes the store and frees the handle returned by [`create_store`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn destroy_store(state: *mut LocalBaghela) {
    if state.is_null() {
        return;
    }
    let mut state = unsafe { Box::from_raw(state) };
    if let Err(e) = state.backend_mut().close_database() {
        warn!("Error closing store during destroy: {e}");
    }
}

/// Frees a response string returned by any function in this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(response: *const c_char) {
    if response.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(response as *mut c_char) });
}

fn state_ref<'a>(state: *mut LocalBaghela, fn_name: &str) -> Result<&'a LocalBaghela, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {fn_name}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Serializes `response` into a C string owned by the caller.
///
/// Returns a null pointer if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String, turning null pointers and
/// invalid UTF-8 into a `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
