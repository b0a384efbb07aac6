//! Canonical structured event names used across `alias-resolver`.

// Route catalog events.
pub const ROUTE_CATALOG_BUILT: &str = "route_catalog_built";
pub const ROUTE_CATALOG_ALIAS_ROUTE_SKIPPED: &str = "route_catalog_alias_route_skipped";

// Alias service events.
pub const ALIAS_SET: &str = "alias_set";
pub const ALIAS_DELETE: &str = "alias_delete";
pub const ALIAS_DELETE_BY_SOURCE: &str = "alias_delete_by_source";
pub const ALIAS_REPLACE_EVICT: &str = "alias_replace_evict";
pub const ALIAS_ROUTE_PATH_UNRESOLVED: &str = "alias_route_path_unresolved";
pub const ALIAS_STORE_FAILED: &str = "alias_store_failed";

// Durable store events.
pub const ALIAS_STORE_LOAD_OK: &str = "alias_store_load_ok";
pub const ALIAS_STORE_LOAD_MISSING: &str = "alias_store_load_missing";
pub const ALIAS_STORE_PERSIST_OK: &str = "alias_store_persist_ok";
pub const ALIAS_STORE_PERSIST_FAILED: &str = "alias_store_persist_failed";
