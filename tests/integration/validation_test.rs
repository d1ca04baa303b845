// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request},
};
use serde_json::json;

use crate::helpers::{self, spawn_app};

fn search(query: &str) -> String {
    format!(
        "/v3/contents/search?user_token={}&{}",
        helpers::NORMAL_TOKEN,
        query
    )
}

#[tokio::test]
async fn page_must_parse_and_be_in_range() {
    let app = spawn_app().await;

    let (_, body) = app.get(&search("page=abc&pagesize=10")).await;
    assert_eq!(body, json!({"code": 1, "msg": "获取失败，参数page不合法"}));

    let (_, body) = app.get(&search("page=101&pagesize=10")).await;
    assert_eq!(body["msg"], "获取失败，参数page超出范围");

    let (_, body) = app.get(&search("page=100&pagesize=10")).await;
    assert_eq!(body["echo"], true);
}

#[tokio::test]
async fn page_size_must_be_positive_and_bounded() {
    let app = spawn_app().await;
    for size in ["0", "51", "-1", "ten"] {
        let (_, body) = app.get(&search(&format!("page=1&pagesize={}", size))).await;
        assert_eq!(body["msg"], "获取失败，参数pagesize不合法", "{}", size);
    }
}

#[tokio::test]
async fn long_post_is_rejected_with_limit_in_message() {
    let app = spawn_app().await;
    let text = "a".repeat(15000);

    let (_, body) = app
        .post_form(
            &format!("/v3/send/post?user_token={}", helpers::NORMAL_TOKEN),
            &format!("text={}&type=text", text),
        )
        .await;
    assert_eq!(
        body,
        json!({"code": 1, "msg": "字数过长！字数限制为10000字。"})
    );
}

#[tokio::test]
async fn unknown_post_type_is_rejected() {
    let app = spawn_app().await;
    let (_, body) = app
        .post_form(
            &format!("/v3/send/comment?user_token={}", helpers::NORMAL_TOKEN),
            "text=hi&type=video",
        )
        .await;
    assert_eq!(body["msg"], "未知类型的树洞");
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let app = spawn_app().await;
    let data = "A".repeat(1_400_000);
    let (_, body) = app
        .post_form(
            &format!("/v3/send/post?user_token={}", helpers::NORMAL_TOKEN),
            &format!("text=&type=image&data={}", data),
        )
        .await;
    assert_eq!(body["msg"], "图片大小超出限制！");
}

fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            boundary, name, value
        ));
    }
    body.push_str(&format!("--{}--\r\n", boundary));
    body
}

async fn post_multipart(
    app: &helpers::TestApp,
    uri: &str,
    fields: &[(&str, &str)],
) -> serde_json::Value {
    let boundary = "treehole-boundary";
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(multipart_body(boundary, fields)))
        .unwrap();
    app.send(request).await.1
}

#[tokio::test]
async fn multipart_post_reaches_endpoint() {
    let app = spawn_app().await;
    let body = post_multipart(
        &app,
        &format!("/v3/send/post?user_token={}", helpers::NORMAL_TOKEN),
        &[("text", "hello"), ("type", "text")],
    )
    .await;
    assert_eq!(body["echo"], true);
}

#[tokio::test]
async fn multipart_fields_are_validated() {
    let app = spawn_app().await;
    let body = post_multipart(
        &app,
        &format!("/v3/send/comment?user_token={}", helpers::NORMAL_TOKEN),
        &[("text", ""), ("type", "text")],
    )
    .await;
    assert_eq!(body["msg"], "请输入内容");
}
