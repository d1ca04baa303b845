// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use treehole::infrastructure::services::memory_counter_store::MemoryCounterStore;

use crate::helpers::{self, spawn_app, spawn_app_with, test_settings};

const LOGIN_EXPIRED: &str = "登录凭据过期，请使用邮箱重新登录。";

#[tokio::test]
async fn health_check_needs_no_token() {
    let app = spawn_app().await;
    let (status, _) = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registered_user_reaches_endpoint() {
    let app = spawn_app().await;
    let (status, body) = app
        .get(&format!(
            "/v3/contents/post/detail?user_token={}",
            helpers::NORMAL_TOKEN
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], app.normal_id);
    assert_eq!(body["role"], 0);
}

#[tokio::test]
async fn banned_user_gets_frozen_message() {
    let app = spawn_app().await;
    let (status, body) = app
        .get(&format!(
            "/v3/contents/post/detail?user_token={}",
            helpers::BANNED_TOKEN
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"msg": "您的账户已被冻结。如果需要解冻，请联系help@treehole.test。"})
    );
}

#[tokio::test]
async fn unknown_token_is_rejected_by_default() {
    let app = spawn_app().await;
    for uri in [
        "/v3/contents/post/detail?user_token=nope",
        "/v3/contents/post/detail",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"code": 1, "msg": LOGIN_EXPIRED}));
    }
}

#[tokio::test]
async fn unregistered_access_when_enabled() {
    let mut settings = test_settings();
    settings.allow_unregistered_access = true;
    let app = spawn_app_with(settings, Arc::new(MemoryCounterStore::new())).await;

    let (_, body) = app
        .get("/v3/contents/post/detail?user_token=nope")
        .await;
    assert_eq!(body["uid"], -1);
    assert_eq!(body["role"], -1);
}

#[tokio::test]
async fn allowed_subnet_bypasses_login() {
    let mut settings = test_settings();
    settings.allowed_subnets = vec!["10.0.0.0/8".to_string()];
    let app = spawn_app_with(settings, Arc::new(MemoryCounterStore::new())).await;

    let (_, body) = app
        .send(
            Request::builder()
                .uri("/v3/contents/post/detail")
                .header("X-Forwarded-For", "10.3.4.5")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(body["uid"], -1);

    let (_, body) = app
        .send(
            Request::builder()
                .uri("/v3/contents/post/detail")
                .header("X-Forwarded-For", "192.168.1.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(body["msg"], LOGIN_EXPIRED);
}

#[tokio::test]
async fn mutating_routes_reject_unregistered_identity() {
    let mut settings = test_settings();
    settings.allow_unregistered_access = true;
    let app = spawn_app_with(settings, Arc::new(MemoryCounterStore::new())).await;

    let (_, body) = app
        .post_form("/v3/send/post", "text=hello&type=text")
        .await;
    assert_eq!(body, json!({"code": 1, "msg": LOGIN_EXPIRED}));

    let (_, body) = app
        .post_form("/v3/edit/report/post", "id=1&type=report&reason=spam")
        .await;
    assert_eq!(body["msg"], LOGIN_EXPIRED);
}

#[tokio::test]
async fn active_ban_blocks_posting() {
    let app = spawn_app().await;
    helpers::create_ban(&app.db, app.normal_id, Utc::now().timestamp() + 3600).await;

    let (_, body) = app
        .post_form(
            &format!("/v3/send/post?user_token={}", helpers::NORMAL_TOKEN),
            "text=hello&type=text",
        )
        .await;
    assert_eq!(body["code"], 1);
    let msg = body["msg"].as_str().unwrap();
    assert!(msg.starts_with("很抱歉，您当前处于禁言状态，在"), "{}", msg);
    assert!(msg.ends_with("之前您将无法发布树洞。"), "{}", msg);

    // 浏览不受禁言影响
    let (_, body) = app
        .get(&format!(
            "/v3/contents/post/detail?user_token={}",
            helpers::NORMAL_TOKEN
        ))
        .await;
    assert_eq!(body["echo"], true);
}

#[tokio::test]
async fn expired_ban_and_override_allow_posting() {
    let app = spawn_app().await;
    helpers::create_ban(&app.db, app.normal_id, Utc::now().timestamp() - 10).await;
    helpers::create_ban(&app.db, app.admin_id, Utc::now().timestamp() + 3600).await;

    for token in [helpers::NORMAL_TOKEN, helpers::ADMIN_TOKEN] {
        let (_, body) = app
            .post_form(
                &format!("/v3/send/post?user_token={}", token),
                "text=hello&type=text",
            )
            .await;
        assert_eq!(body["echo"], true, "{}", token);
    }
}
