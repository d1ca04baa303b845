// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::Value;

use treehole::domain::models::post::Post;
use treehole::domain::models::report::{Report, ReportType};
use treehole::infrastructure::database::entities::attention;
use sea_orm::{ActiveModelTrait, Set};

use crate::helpers::{self, spawn_app, TestApp};

fn search(token: &str, keywords: &str) -> String {
    format!(
        "/v3/contents/search?user_token={}&page=1&pagesize=10&keywords={}",
        token, keywords
    )
}

fn only_text(body: &Value) -> &str {
    assert_eq!(body["code"], 0);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["pid"], 0);
    assert_eq!(body["data"][0]["timestamp"], 2147483647i64);
    body["data"][0]["text"].as_str().unwrap()
}

async fn seed_report(app: &TestApp, post_id: i32, report_type: ReportType) -> i32 {
    app.state
        .reports
        .create(&Report {
            id: 0,
            reporter_id: app.normal_id,
            reported_user_id: app.admin_id,
            post_id,
            comment_id: 0,
            reason: "广告".to_string(),
            report_type,
            is_comment: false,
            weight: 1,
            created_at: 0,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn statistics_requires_exact_keyword() {
    let app = spawn_app().await;
    helpers::create_post(&app.db, app.normal_id, false).await;
    helpers::create_post(&app.db, app.normal_id, true).await;

    let (status, body) = app.get(&search(helpers::ADMIN_TOKEN, "statistics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        only_text(&body),
        "总注册人数：5\n24h内发帖数：2\n24h内删帖数：1\n"
    );

    let (_, body) = app
        .get(&search(helpers::ADMIN_TOKEN, "statistics%20"))
        .await;
    assert_eq!(body["echo"], true);
}

#[tokio::test]
async fn normal_user_keywords_reach_search() {
    let app = spawn_app().await;
    for keyword in ["help", "statistics", "reports", "messages", "shutdown"] {
        let (_, body) = app.get(&search(helpers::NORMAL_TOKEN, keyword)).await;
        assert_eq!(body["echo"], true, "{}", keyword);
        assert_eq!(body["page"], 1);
        assert_eq!(body["pagesize"], 10);
    }
}

#[tokio::test]
async fn help_lists_commands_for_role() {
    let app = spawn_app().await;

    let (_, body) = app.get(&search(helpers::DELETER_TOKEN, "help")).await;
    let text = only_text(&body);
    assert!(text.contains("`deleted`"));
    assert!(text.contains("`reports`"));
    assert!(!text.contains("`statistics`"));

    let (_, body) = app.get(&search(helpers::SUPER_TOKEN, "help")).await;
    assert!(only_text(&body).contains("`shutdown`"));
}

#[tokio::test]
async fn reports_are_listed_newest_first() {
    let app = spawn_app().await;
    let post_id = helpers::create_post(&app.db, app.admin_id, false).await;
    let first = seed_report(&app, post_id, ReportType::UserReport).await;
    seed_report(&app, post_id, ReportType::UserFold).await;
    let second = seed_report(&app, post_id, ReportType::UserReport).await;

    let (_, body) = app.get(&search(helpers::DELETER_TOKEN, "reports")).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["pid"], second);
    assert_eq!(body["data"][1]["pid"], first);
    let text = body["data"][0]["text"].as_str().unwrap();
    assert!(text.starts_with(&format!("Post ID:{}", post_id)), "{}", text);
    assert!(text.contains("Reason:广告"));
}

#[tokio::test]
async fn empty_report_list_has_empty_data() {
    let app = spawn_app().await;
    let (_, body) = app.get(&search(helpers::ADMIN_TOKEN, "reports")).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn messages_render_each_system_message() {
    let app = spawn_app().await;
    helpers::create_system_message(&app.db, app.normal_id, "提醒", "请文明发言").await;

    let (_, body) = app.get(&search(helpers::ADMIN_TOKEN, "messages")).await;
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["data"][0]["text"],
        format!("User ID:{}\nTitle:提醒\nContent:请文明发言", app.normal_id)
    );
}

#[tokio::test]
async fn shutdown_counts_down_then_exits() {
    let app = spawn_app().await;

    let (_, body) = app.get(&search(helpers::SUPER_TOKEN, "shutdown")).await;
    assert_eq!(only_text(&body), "2 more times to fully shutdown.");
    let (_, body) = app.get(&search(helpers::SUPER_TOKEN, "shutdown")).await;
    assert_eq!(only_text(&body), "1 more times to fully shutdown.");
    assert_eq!(app.exit_count(), 0);

    app.get(&search(helpers::SUPER_TOKEN, "shutdown")).await;
    assert_eq!(app.exit_count(), 1);
}

#[tokio::test]
async fn admin_cannot_shutdown() {
    let app = spawn_app().await;
    let (_, body) = app.get(&search(helpers::ADMIN_TOKEN, "shutdown")).await;
    assert_eq!(body["echo"], true);
    assert_eq!(app.state.shutdown.remaining(), 2);
}

#[tokio::test]
async fn hot_posts_window_with_attention() {
    let app = spawn_app().await;
    let posts: Vec<Post> = (1..=3)
        .map(|id| Post {
            id,
            user_id: app.admin_id,
            text: format!("hot {}", id),
            typ: "text".to_string(),
            file_path: String::new(),
            tag: None,
            like_num: 10 - id,
            reply_num: 0,
            created_at: 1_700_000_000,
            deleted_at: None,
        })
        .collect();
    app.state.hot_posts.replace(posts);
    attention::ActiveModel {
        user_id: Set(app.normal_id),
        post_id: Set(2),
    }
    .insert(app.db.as_ref())
    .await
    .unwrap();

    let uri = format!(
        "/v3/contents/search?user_token={}&page=1&pagesize=2&keywords=%E7%83%AD%E6%A6%9C",
        helpers::NORMAL_TOKEN
    );
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["pid"], 1);
    assert_eq!(body["data"][0]["attention"], false);
    assert_eq!(body["data"][1]["pid"], 2);
    assert_eq!(body["data"][1]["attention"], true);
    assert_eq!(body["data"][0]["likenum"], 9);
    assert_eq!(
        body["data"][0]["permissions"],
        serde_json::json!(["report", "fold"])
    );

    let uri = format!(
        "/v3/contents/search?user_token={}&page=3&pagesize=2&keywords=%E7%83%AD%E6%A6%9C",
        helpers::NORMAL_TOKEN
    );
    let (_, body) = app.get(&uri).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn pagination_is_checked_before_commands() {
    let app = spawn_app().await;
    let (_, body) = app
        .get(&format!(
            "/v3/contents/search?user_token={}&page=0&pagesize=10&keywords=statistics",
            helpers::ADMIN_TOKEN
        ))
        .await;
    assert_eq!(body["msg"], "获取失败，参数page超出范围");
}
