//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod movie_repo;
pub mod rating_repo;
pub mod session_repo;
pub mod user_repo;
pub mod watchlist_repo;

pub use comment_repo::CommentRepo;
pub use movie_repo::MovieRepo;
pub use rating_repo::RatingRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use watchlist_repo::WatchlistRepo;
