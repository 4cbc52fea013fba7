//! End-to-end tests for the popularity scoring lifecycle and the trending
//! endpoint.
//!
//! Score assertions use exact values: a freshly created movie has a pure
//! recency score of 10.0, one 10/10 rating adds 0.4 points, and one comment
//! adds 0.4 points. Scores are read back through the repository so the check
//! itself never increments view counts.

mod common;

use axum::http::StatusCode;
use common::{authed_admin, authed_user, body_json, build_test_app, delete, get, post_empty, post_json, put_json};
use sqlx::PgPool;

use reelhouse_core::types::DbId;
use reelhouse_db::models::movie::CreateMovie;
use reelhouse_db::repositories::MovieRepo;

fn new_movie(title: &str) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        summary: "Scoring test movie.".to_string(),
        actors: None,
        director: None,
        genre: None,
        release_year: None,
        duration_mins: None,
        image_url: None,
        trailer_url: None,
    }
}

async fn stored_score(pool: &PgPool, movie_id: DbId) -> f64 {
    MovieRepo::find_by_id(pool, movie_id)
        .await
        .unwrap()
        .expect("movie should exist")
        .popularity_score
}

// ---------------------------------------------------------------------------
// Rating / comment lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_and_comment_changes_move_the_score(pool: PgPool) {
    let (_admin, admin_token) = authed_admin(&pool, "a@example.com", "admin").await;
    let (_user, user_token) = authed_user(&pool, "u@example.com", "rater").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/movies",
        serde_json::json!({ "title": "Rashomon", "summary": "Four accounts of one crime." }),
        Some(&admin_token),
    )
    .await;
    let movie_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert_eq!(stored_score(&pool, movie_id).await, 10.0);

    // One 10/10 rating: rating term becomes 0.4 * (1.0 * 1/100) = 0.4 points.
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{movie_id}/rating"),
        serde_json::json!({ "rating": 10 }),
        Some(&user_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stored_score(&pool, movie_id).await, 10.4);

    // One comment: comment term becomes 0.2 * (1/50) = 0.4 points.
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{movie_id}/comments"),
        serde_json::json!({ "content": "A masterpiece." }),
        Some(&user_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert_eq!(stored_score(&pool, movie_id).await, 10.8);

    // Withdrawing the rating drops its contribution.
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{movie_id}/rating"),
        Some(&user_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(stored_score(&pool, movie_id).await, 10.4);

    // Deleting the comment drops the rest, back to pure recency.
    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/comments/{comment_id}"),
        Some(&user_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(stored_score(&pool, movie_id).await, 10.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rating_validation_and_upsert(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("Ikiru")).await.unwrap();
    let (_user, token) = authed_user(&pool, "u@example.com", "rater").await;

    // Out-of-range ratings are rejected.
    for bad in [0, 11] {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/movies/{}/rating", movie.id),
            serde_json::json!({ "rating": bad }),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // Re-rating replaces rather than duplicates.
    for value in [6, 9] {
        let response = put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/movies/{}/rating", movie.id),
            serde_json::json!({ "rating": value }),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let movie_row = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    assert_eq!(movie_row.total_ratings, 1);
    assert_eq!(movie_row.average_rating, 9.0);

    // The caller can read their own rating back.
    let response = common::get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{}/rating", movie.id),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["rating"], 9);

    // Rating an unknown movie is a 404.
    let response = put_json(
        build_test_app(pool),
        "/api/v1/movies/9999/rating",
        serde_json::json!({ "rating": 5 }),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Trending endpoint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn trending_ranks_by_activity_then_score(pool: PgPool) {
    let busy = MovieRepo::create(&pool, &new_movie("Busy")).await.unwrap();
    let beloved = MovieRepo::create(&pool, &new_movie("Beloved")).await.unwrap();
    let quiet = MovieRepo::create(&pool, &new_movie("Quiet")).await.unwrap();
    MovieRepo::update_popularity_score(&pool, quiet.id, 99.0)
        .await
        .unwrap();
    MovieRepo::update_popularity_score(&pool, beloved.id, 50.0)
        .await
        .unwrap();

    let (_u1, t1) = authed_user(&pool, "u1@example.com", "user1").await;
    let (_u2, t2) = authed_user(&pool, "u2@example.com", "user2").await;

    // Busy gets two ratings, beloved gets one comment, quiet gets nothing.
    for token in [&t1, &t2] {
        put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/movies/{}/rating", busy.id),
            serde_json::json!({ "rating": 7 }),
            Some(token),
        )
        .await;
    }
    post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/movies/{}/comments", beloved.id),
        serde_json::json!({ "content": "Still the best." }),
        Some(&t1),
    )
    .await;

    let response = get(build_test_app(pool), "/api/v1/movies/trending?days=7").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2, "inactive movie must not trend");
    assert_eq!(data[0]["id"], busy.id);
    assert_eq!(data[0]["recent_activity"], 2);
    assert_eq!(data[1]["id"], beloved.id);
    assert_eq!(data[1]["recent_activity"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn trending_limit_is_honored(pool: PgPool) {
    let (_user, token) = authed_user(&pool, "u@example.com", "rater").await;
    for i in 0..4 {
        let movie = MovieRepo::create(&pool, &new_movie(&format!("Movie {i}")))
            .await
            .unwrap();
        put_json(
            build_test_app(pool.clone()),
            &format!("/api/v1/movies/{}/rating", movie.id),
            serde_json::json!({ "rating": 8 }),
            Some(&token),
        )
        .await;
    }

    let response = get(build_test_app(pool), "/api/v1/movies/trending?limit=2").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Bulk recomputation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_recompute_updates_every_active_movie(pool: PgPool) {
    let (_admin, admin_token) = authed_admin(&pool, "a@example.com", "admin").await;

    let first = MovieRepo::create(&pool, &new_movie("First")).await.unwrap();
    let second = MovieRepo::create(&pool, &new_movie("Second")).await.unwrap();
    let removed = MovieRepo::create(&pool, &new_movie("Removed")).await.unwrap();
    MovieRepo::soft_delete(&pool, removed.id).await.unwrap();

    let response = post_empty(
        build_test_app(pool.clone()),
        "/api/v1/movies/update-popularity",
        Some(&admin_token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["updated_count"], 2);
    assert!(json["data"]["failed"].as_array().unwrap().is_empty());

    // Both active movies now carry their recency credit.
    assert_eq!(stored_score(&pool, first.id).await, 10.0);
    assert_eq!(stored_score(&pool, second.id).await, 10.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_recompute_requires_admin(pool: PgPool) {
    let (_user, token) = authed_user(&pool, "u@example.com", "plain").await;
    let response = post_empty(
        build_test_app(pool),
        "/api/v1/movies/update-popularity",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
