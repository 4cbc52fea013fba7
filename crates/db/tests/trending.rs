//! Integration tests for the trending query.
//!
//! Activity timestamps are backdated with raw UPDATEs to simulate ratings
//! and comments falling inside or outside the query window.

use sqlx::PgPool;

use reelhouse_core::types::DbId;
use reelhouse_db::models::movie::CreateMovie;
use reelhouse_db::models::user::CreateUser;
use reelhouse_db::repositories::{CommentRepo, MovieRepo, RatingRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_movie(title: &str) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        summary: "Trending test movie.".to_string(),
        actors: None,
        director: None,
        genre: None,
        release_year: None,
        duration_mins: None,
        image_url: None,
        trailer_url: None,
    }
}

fn new_user(n: u32) -> CreateUser {
    CreateUser {
        email: format!("user{n}@example.com"),
        username: format!("user{n}"),
        password_hash: "$argon2id$fake".to_string(),
        first_name: "User".to_string(),
        last_name: format!("{n}"),
        country: "US".to_string(),
    }
}

/// Push all of a movie's rating timestamps out of any recent window.
async fn backdate_ratings(pool: &PgPool, movie_id: DbId, days: i32) {
    sqlx::query(
        "UPDATE ratings SET created_at = NOW() - make_interval(days => $2)
         WHERE movie_id = $1",
    )
    .bind(movie_id)
    .bind(days)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn movie_without_recent_activity_is_excluded(pool: PgPool) {
    let quiet = MovieRepo::create(&pool, &new_movie("Quiet")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(1)).await.unwrap();

    // Give the quiet movie a high stored popularity but only stale activity.
    RatingRepo::upsert(&pool, user.id, quiet.id, 10, None).await.unwrap();
    backdate_ratings(&pool, quiet.id, 30).await;
    MovieRepo::update_popularity_score(&pool, quiet.id, 95.0)
        .await
        .unwrap();

    let trending = MovieRepo::trending(&pool, 7, 10).await.unwrap();
    assert!(
        trending.iter().all(|t| t.movie.id != quiet.id),
        "movie with no in-window activity must never trend"
    );
}

#[sqlx::test]
async fn ranked_by_activity_then_popularity(pool: PgPool) {
    let busy = MovieRepo::create(&pool, &new_movie("Busy")).await.unwrap();
    let steady = MovieRepo::create(&pool, &new_movie("Steady")).await.unwrap();
    let beloved = MovieRepo::create(&pool, &new_movie("Beloved")).await.unwrap();

    let u1 = UserRepo::create(&pool, &new_user(1)).await.unwrap();
    let u2 = UserRepo::create(&pool, &new_user(2)).await.unwrap();

    // Busy: three recent activities.
    RatingRepo::upsert(&pool, u1.id, busy.id, 7, None).await.unwrap();
    RatingRepo::upsert(&pool, u2.id, busy.id, 8, None).await.unwrap();
    CommentRepo::create(&pool, u1.id, busy.id, "Hot right now.")
        .await
        .unwrap();

    // Steady and Beloved: one recent activity each, different stored scores.
    RatingRepo::upsert(&pool, u1.id, steady.id, 6, None).await.unwrap();
    RatingRepo::upsert(&pool, u1.id, beloved.id, 9, None).await.unwrap();
    MovieRepo::update_popularity_score(&pool, steady.id, 20.0)
        .await
        .unwrap();
    MovieRepo::update_popularity_score(&pool, beloved.id, 80.0)
        .await
        .unwrap();

    let trending = MovieRepo::trending(&pool, 7, 10).await.unwrap();
    let ids: Vec<_> = trending.iter().map(|t| t.movie.id).collect();
    assert_eq!(ids, vec![busy.id, beloved.id, steady.id]);
    assert_eq!(trending[0].recent_activity, 3);
    assert_eq!(trending[1].recent_activity, 1);
}

#[sqlx::test]
async fn soft_deleted_comments_do_not_count(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Moderated")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(1)).await.unwrap();

    let comment = CommentRepo::create(&pool, user.id, movie.id, "Spam.")
        .await
        .unwrap();
    CommentRepo::soft_delete(&pool, comment.id).await.unwrap();

    let trending = MovieRepo::trending(&pool, 7, 10).await.unwrap();
    assert!(trending.is_empty());
}

#[sqlx::test]
async fn limit_truncates_results(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user(1)).await.unwrap();
    for i in 0..5 {
        let movie = MovieRepo::create(&pool, &new_movie(&format!("Movie {i}")))
            .await
            .unwrap();
        RatingRepo::upsert(&pool, user.id, movie.id, 7, None)
            .await
            .unwrap();
    }

    let trending = MovieRepo::trending(&pool, 7, 3).await.unwrap();
    assert_eq!(trending.len(), 3);
}

#[sqlx::test]
async fn soft_deleted_movie_never_trends(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Pulled")).await.unwrap();
    let user = UserRepo::create(&pool, &new_user(1)).await.unwrap();
    RatingRepo::upsert(&pool, user.id, movie.id, 9, None).await.unwrap();

    MovieRepo::soft_delete(&pool, movie.id).await.unwrap();

    let trending = MovieRepo::trending(&pool, 7, 10).await.unwrap();
    assert!(trending.is_empty());
}
