//! Domain logic for the Reelhouse movie catalog.
//!
//! Pure computation only: the popularity scoring engine, input validation,
//! the shared error taxonomy, and common type aliases. Nothing in this crate
//! performs I/O; persistence lives in `reelhouse-db` and HTTP in
//! `reelhouse-api`.

pub mod error;
pub mod popularity;
pub mod roles;
pub mod types;
pub mod validation;
