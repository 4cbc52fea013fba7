//! Role name constants shared by the auth layer and the user model.

/// Administrator: manages the catalog and triggers bulk recomputation.
pub const ROLE_ADMIN: &str = "admin";
/// Regular member: rates, comments, and maintains a watchlist.
pub const ROLE_USER: &str = "user";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];
