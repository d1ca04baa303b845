// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use treehole::domain::services::rate_limiter::{CounterStore, RateLimitError, WindowCount};

use crate::helpers::{self, spawn_app, spawn_app_with, test_settings};

struct UnreachableStore;

#[async_trait]
impl CounterStore for UnreachableStore {
    async fn increment(&self, _key: &str, _window: Duration) -> Result<WindowCount, RateLimitError> {
        Err(RateLimitError::LimiterUnavailable("connection refused".into()))
    }
}

fn send_post(token: &str) -> String {
    format!("/v3/send/post?user_token={}", token)
}

#[tokio::test]
async fn second_post_within_burst_window_is_rejected() {
    let app = spawn_app().await;

    let (_, body) = app
        .post_form(&send_post(helpers::NORMAL_TOKEN), "text=first&type=text")
        .await;
    assert_eq!(body["echo"], true);

    let (status, body) = app
        .post_form(&send_post(helpers::NORMAL_TOKEN), "text=second&type=text")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"code": 1, "msg": "请不要短时间内连续发送树洞。"})
    );
}

#[tokio::test]
async fn limiters_are_independent_per_user_and_action() {
    let app = spawn_app().await;

    app.post_form(&send_post(helpers::NORMAL_TOKEN), "text=a&type=text")
        .await;

    // 其他用户不受影响
    let (_, body) = app
        .post_form(&send_post(helpers::DELETER_TOKEN), "text=b&type=text")
        .await;
    assert_eq!(body["echo"], true);

    // 回复使用独立的限流器
    let (_, body) = app
        .post_form(
            &format!("/v3/send/comment?user_token={}", helpers::NORMAL_TOKEN),
            "text=c&type=text",
        )
        .await;
    assert_eq!(body["echo"], true);
}

#[tokio::test]
async fn elevated_roles_bypass_limits() {
    let app = spawn_app().await;
    for _ in 0..3 {
        let (_, body) = app
            .post_form(&send_post(helpers::ADMIN_TOKEN), "text=a&type=text")
            .await;
        assert_eq!(body["echo"], true);
    }
}

#[tokio::test]
async fn rejected_post_still_consumes_quota() {
    let app = spawn_app().await;

    // 内容校验在限流之后，失败的请求同样计数
    let (_, body) = app
        .post_form(&send_post(helpers::NORMAL_TOKEN), "text=&type=text")
        .await;
    assert_eq!(body["msg"], "请输入内容");

    let (_, body) = app
        .post_form(&send_post(helpers::NORMAL_TOKEN), "text=ok&type=text")
        .await;
    assert_eq!(body["msg"], "请不要短时间内连续发送树洞。");
}

#[tokio::test]
async fn unavailable_store_fails_the_request() {
    let app = spawn_app_with(test_settings(), Arc::new(UnreachableStore)).await;

    let (status, body) = app
        .get(&format!(
            "/v3/contents/post/detail?user_token={}",
            helpers::NORMAL_TOKEN
        ))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 1);
    assert_eq!(body["msg"], "服务器内部错误，请稍后重试");
}

#[tokio::test]
async fn disabled_rate_limiting_skips_store() {
    let mut settings = test_settings();
    settings.rate_limiting.enabled = false;
    let app = spawn_app_with(settings, Arc::new(UnreachableStore)).await;

    let (status, body) = app
        .get(&format!(
            "/v3/contents/post/detail?user_token={}",
            helpers::NORMAL_TOKEN
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["echo"], true);
}
