//! Request handlers, grouped by resource.

pub mod auth;
pub mod comments;
pub mod movies;
pub mod ratings;
pub mod watchlist;
