//! API endpoints.

pub mod catalog;
pub mod extract;
pub mod films;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use film_store::Store;

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: Store + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Film endpoints
        .route(
            "/films",
            get(films::find_all::<S>)
                .post(films::create::<S>)
                .put(films::update::<S>),
        )
        .route("/films/popular", get(films::find_top_films::<S>))
        .route(
            "/films/:id",
            get(films::find_by_id::<S>).delete(films::delete::<S>),
        )
        .route(
            "/films/:id/like/:user_id",
            put(films::add_like::<S>).delete(films::delete_like::<S>),
        )
        // User endpoints
        .route(
            "/users",
            get(users::find_all::<S>)
                .post(users::create::<S>)
                .put(users::update::<S>),
        )
        .route(
            "/users/:id",
            get(users::find_by_id::<S>).delete(users::delete::<S>),
        )
        .route("/users/:id/friends", get(users::get_friends::<S>))
        .route(
            "/users/:id/friends/:friend_id",
            put(users::add_friend::<S>).delete(users::delete_friend::<S>),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(users::get_common_friends::<S>),
        )
        // Catalog endpoints
        .route("/mpa", get(catalog::find_all_mpa::<S>))
        .route("/mpa/:id", get(catalog::find_mpa_by_id::<S>))
        .route("/genres", get(catalog::find_all_genres::<S>))
        .route("/genres/:id", get(catalog::find_genre_by_id::<S>))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use film_store::MemoryStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{config::Config, create_app, create_state};

    fn app() -> Router {
        let config = Config::from_lookup(|_| None).unwrap();
        create_app(create_state(config, MemoryStore::new()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        read(app, request).await
    }

    async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        read(app, request).await
    }

    async fn read(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    fn matrix() -> Value {
        json!({
            "name": "Matrix",
            "description": "A hacker learns the truth",
            "releaseDate": "1999-03-31",
            "duration": 136,
            "mpa": { "id": 4 }
        })
    }

    fn user(login: &str) -> Value {
        json!({
            "email": format!("{login}@example.com"),
            "login": login,
            "birthday": "1990-01-01"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn test_film_lifecycle() {
        let app = app();

        let (status, created) = send(&app, Method::POST, "/films", Some(matrix())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1);
        assert_eq!(created["releaseDate"], "1999-03-31");
        assert_eq!(created["mpa"]["name"], "R");

        let (status, fetched) = send(&app, Method::GET, "/films/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Matrix");

        let mut changed = matrix();
        changed["id"] = json!(1);
        changed["name"] = json!("The Matrix");
        let (status, updated) = send(&app, Method::PUT, "/films", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "The Matrix");

        let (status, all) = send(&app, Method::GET, "/films", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, Method::DELETE, "/films/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, Method::GET, "/films/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["summary"], "Film not found.");
    }

    #[tokio::test]
    async fn test_invalid_film_is_bad_request() {
        let app = app();
        let mut film = matrix();
        film["releaseDate"] = json!("1800-01-01");

        let (status, body) = send(&app, Method::POST, "/films", Some(film)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["summary"], "Invalid input data.");

        let (status, _) = send(&app, Method::POST, "/films", Some(json!({ "duration": 10 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_film_is_not_found() {
        let app = app();
        let mut film = matrix();
        film["id"] = json!(42);

        let (status, _) = send(&app, Method::PUT, "/films", Some(film)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_likes_and_popular() {
        let app = app();
        send(&app, Method::POST, "/films", Some(matrix())).await;
        let mut other = matrix();
        other["name"] = json!("Other");
        send(&app, Method::POST, "/films", Some(other)).await;
        send(&app, Method::POST, "/users", Some(user("neo"))).await;
        send(&app, Method::POST, "/users", Some(user("trinity"))).await;

        let (status, _) = send(&app, Method::PUT, "/films/2/like/1", None).await;
        assert_eq!(status, StatusCode::OK);
        send(&app, Method::PUT, "/films/2/like/2", None).await;
        send(&app, Method::PUT, "/films/2/like/2", None).await;

        let (status, top) = send(&app, Method::GET, "/films/popular?count=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(top[0]["id"], 2);
        assert_eq!(top[0]["likes"], json!([1, 2]));
        assert_eq!(top.as_array().map(Vec::len), Some(1));

        let (_, top) = send(&app, Method::GET, "/films/popular", None).await;
        assert_eq!(top.as_array().map(Vec::len), Some(2));

        let (status, _) = send(&app, Method::GET, "/films/popular?count=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, Method::GET, "/films/popular?count=-3", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::PUT, "/films/2/like/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["summary"], "User not found.");

        let (status, _) = send(&app, Method::DELETE, "/films/2/like/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, film) = send(&app, Method::GET, "/films/2", None).await;
        assert_eq!(film["likes"], json!([2]));
    }

    #[tokio::test]
    async fn test_user_endpoints() {
        let app = app();

        let (status, created) = send(&app, Method::POST, "/users", Some(user("neo"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["name"], "neo");

        let (status, _) = send(&app, Method::POST, "/users", Some(user("a b"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut ghost = user("ghost");
        ghost["id"] = json!(99);
        let (status, body) = send(&app, Method::PUT, "/users", Some(ghost)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["summary"], "User not found.");

        let (status, fetched) = send(&app, Method::GET, "/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["login"], "neo");
    }

    #[tokio::test]
    async fn test_friend_endpoints() {
        let app = app();
        for login in ["a", "b", "c"] {
            send(&app, Method::POST, "/users", Some(user(login))).await;
        }

        let (status, _) = send(&app, Method::PUT, "/users/1/friends/3", None).await;
        assert_eq!(status, StatusCode::OK);
        send(&app, Method::PUT, "/users/2/friends/3", None).await;

        let (status, friends) = send(&app, Method::GET, "/users/3/friends", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(friends.as_array().map(Vec::len), Some(2));

        let (status, common) = send(&app, Method::GET, "/users/1/friends/common/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(common[0]["id"], 3);
        assert_eq!(common.as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, Method::PUT, "/users/1/friends/1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, Method::PUT, "/users/1/friends/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/users/1/friends/3", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, friends) = send(&app, Method::GET, "/users/1/friends", None).await;
        assert_eq!(friends, json!([]));

        // User 3 drops the request user 2 sent.
        let (status, _) = send(&app, Method::DELETE, "/users/3/friends/2", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, friends) = send(&app, Method::GET, "/users/3/friends", None).await;
        assert_eq!(friends, json!([]));
        let (_, friends) = send(&app, Method::GET, "/users/2/friends", None).await;
        assert_eq!(friends, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_requests_are_bad_request() {
        let app = app();
        send(&app, Method::POST, "/films", Some(matrix())).await;

        let cases = [
            send(&app, Method::POST, "/films", Some(json!({ "duration": "long" }))).await,
            send_raw(&app, Method::POST, "/films", "{\"name\": ").await,
            send_raw(&app, Method::PUT, "/users", "not json").await,
            send(&app, Method::GET, "/films/popular?count=abc", None).await,
            send(&app, Method::GET, "/films/abc", None).await,
            send(&app, Method::PUT, "/films/1/like/x", None).await,
            send(&app, Method::DELETE, "/users/1/friends/x", None).await,
            send(&app, Method::GET, "/genres/drama", None).await,
        ];

        for (status, body) in cases {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["summary"], "Invalid request.");
            assert!(body["detail"].as_str().is_some());
        }

        let (_, all) = send(&app, Method::GET, "/films", None).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let app = app();

        let (status, ratings) = send(&app, Method::GET, "/mpa", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ratings.as_array().map(Vec::len), Some(5));

        let (status, rating) = send(&app, Method::GET, "/mpa/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(rating["name"], "PG-13");

        let (status, body) = send(&app, Method::GET, "/mpa/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["summary"], "Illegal id.");

        let (status, genre) = send(&app, Method::GET, "/genres/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(genre["name"], "Comedy");

        let (status, _) = send(&app, Method::GET, "/genres/100", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
