//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    let response = server.post("/api/v1/users/signup", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());

    let response = server
        .post("/api/v1/users/login", &LoginRequest::from_signup(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server
        .get_auth("/api/v1/users/@me", &login.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    server.post("/api/v1/users/signup", &request).await.unwrap();
    let response = server.post("/api/v1/users/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();
    server.post("/api/v1/users/signup", &request).await.unwrap();

    let login = LoginRequest {
        email: request.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/api/v1/users/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/posts").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

async fn react(server: &TestServer, path: &str, token: &str, request: ReactionRequest) -> ReactionCounts {
    let response = server.put_auth(path, token, &request).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

#[tokio::test]
async fn test_post_reaction_toggle_sequence() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let bob = server.signup_unique().await.unwrap();
    let post = server.create_post(&alice.access_token, "hello").await.unwrap();
    let path = format!("/api/v1/posts/{}/like", post.id);

    let counts = react(&server, &path, &alice.access_token, ReactionRequest::like()).await;
    assert_eq!(counts, ReactionCounts::new(1, 0));

    let counts = react(&server, &path, &bob.access_token, ReactionRequest::dislike()).await;
    assert_eq!(counts, ReactionCounts::new(1, 1));

    // Switching moves one count across
    let counts = react(&server, &path, &alice.access_token, ReactionRequest::dislike()).await;
    assert_eq!(counts, ReactionCounts::new(0, 2));

    // Same vote again withdraws it
    let counts = react(&server, &path, &bob.access_token, ReactionRequest::dislike()).await;
    assert_eq!(counts, ReactionCounts::new(0, 1));

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &bob.access_token)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((post.like_count, post.dislike_count), (0, 1));
}

#[tokio::test]
async fn test_concurrent_toggles_stay_consistent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let post = server.create_post(&alice.access_token, "race").await.unwrap();
    let path = format!("/api/v1/posts/{}/like", post.id);

    let like = ReactionRequest::like();
    let requests = (0..16).map(|_| server.put_auth(&path, &alice.access_token, &like));
    let responses = join_all(requests).await;

    let mut applied = 0_i64;
    for response in responses {
        let response = response.unwrap();
        match response.status() {
            StatusCode::OK => applied += 1,
            StatusCode::CONFLICT | StatusCode::SERVICE_UNAVAILABLE => {}
            other => panic!("unexpected status {other}"),
        }
    }

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &alice.access_token)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.like_count, applied % 2);
    assert_eq!(post.dislike_count, 0);
}

#[tokio::test]
async fn test_concurrent_likes_from_distinct_users() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let post = server.create_post(&alice.access_token, "crowd").await.unwrap();
    let path = format!("/api/v1/posts/{}/like", post.id);

    let mut voters = Vec::new();
    for _ in 0..12 {
        voters.push(server.signup_unique().await.unwrap());
    }

    let like = ReactionRequest::like();
    let requests = voters
        .iter()
        .map(|voter| server.put_auth(&path, &voter.access_token, &like));
    for response in join_all(requests).await {
        let counts: ReactionCounts = assert_json(response.unwrap(), StatusCode::OK).await.unwrap();
        assert!(counts.likes >= 1 && counts.likes <= voters.len() as i64);
        assert_eq!(counts.dislikes, 0);
    }

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &alice.access_token)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.like_count, voters.len() as i64);
    assert_eq!(post.dislike_count, 0);
}

#[tokio::test]
async fn test_reaction_on_missing_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();

    let response = server
        .put_auth(
            "/api/v1/posts/00000000-0000-4000-8000-000000000001/like",
            &alice.access_token,
            &ReactionRequest::like(),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_POST");
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_count_follows_creates_and_deletes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let bob = server.signup_unique().await.unwrap();
    let post = server.create_post(&alice.access_token, "discuss").await.unwrap();
    let comments_path = format!("/api/v1/posts/{}/comments", post.id);

    let mut comments = Vec::new();
    for text in ["first", "second", "third"] {
        let response = server
            .post_auth(&comments_path, &bob.access_token, &ContentRequest::new(text))
            .await
            .unwrap();
        let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(comment.post_id, post.id);
        comments.push(comment);
    }

    // Only the author or an admin may delete
    let stranger = server.signup_unique().await.unwrap();
    if stranger.user.role != "ADMIN" {
        let response = server
            .delete_auth(&format!("/api/v1/comments/{}", comments[0].id), &stranger.access_token)
            .await
            .unwrap();
        assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    }

    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", comments[0].id), &bob.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &alice.access_token)
        .await
        .unwrap();
    let refreshed: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.comment_count, 2);

    let response = server.get_auth(&comments_path, &alice.access_token).await.unwrap();
    let list: ListResponse<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.data.len(), 2);

    let counts = react(
        &server,
        &format!("/api/v1/comments/{}/like", comments[1].id),
        &alice.access_token,
        ReactionRequest::like(),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(1, 0));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_only_creator_edits_post() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let bob = server.signup_unique().await.unwrap();
    let post = server.create_post(&alice.access_token, "original").await.unwrap();
    let path = format!("/api/v1/posts/{}", post.id);

    let response = server
        .put_auth(&path, &bob.access_token, &ContentRequest::new("hijack"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&path, &alice.access_token, &ContentRequest::new("edited"))
        .await
        .unwrap();
    let edited: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "edited");
    assert_eq!(edited.creator.map(|c| c.id), Some(alice.user.id));
}

#[tokio::test]
async fn test_search_posts() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.signup_unique().await.unwrap();
    let marker = format!("needle{}", unique_suffix());
    server
        .create_post(&alice.access_token, &format!("a {marker} in a haystack"))
        .await
        .unwrap();
    server.create_post(&alice.access_token, "just hay").await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts?q={marker}"), &alice.access_token)
        .await
        .unwrap();
    let list: ListResponse<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.data.len(), 1);
    assert!(list.data[0].content.contains(&marker));
}
