// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::EntityTrait;
use serde_json::json;

use treehole::infrastructure::database::entities::report;

use crate::helpers::{self, create_comment, create_post, spawn_app, TestApp};

async fn report_post(app: &TestApp, token: &str, form: &str) -> serde_json::Value {
    app.post_form(
        &format!("/v3/edit/report/post?user_token={}", token),
        form,
    )
    .await
    .1
}

async fn saved_reports(app: &TestApp) -> Vec<report::Model> {
    report::Entity::find().all(app.db.as_ref()).await.unwrap()
}

#[tokio::test]
async fn post_report_is_persisted() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;

    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=report&reason=spam", pid),
    )
    .await;
    assert_eq!(body, json!({"code": 0}));

    let rows = saved_reports(&app).await;
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.user_id, app.normal_id);
    assert_eq!(row.reported_user_id, app.admin_id);
    assert_eq!(row.post_id, pid);
    assert_eq!(row.comment_id, 0);
    assert_eq!(row.typ, "report");
    assert_eq!(row.reason, "spam");
    assert_eq!(row.weight, 1);
    assert!(!row.is_comment);
    assert!(row.created_at > 0);
}

#[tokio::test]
async fn duplicate_report_is_rejected() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;
    let form = format!("id={}&type=report&reason=spam", pid);

    report_post(&app, helpers::NORMAL_TOKEN, &form).await;
    let body = report_post(&app, helpers::NORMAL_TOKEN, &form).await;
    assert_eq!(body, json!({"code": 1, "msg": "已经举报过了，举报失败。"}));
    assert_eq!(saved_reports(&app).await.len(), 1);
}

#[tokio::test]
async fn disallowed_pid_cannot_be_reported() {
    let app = spawn_app().await;
    let body = report_post(&app, helpers::NORMAL_TOKEN, "id=1000&type=report&reason=x").await;
    assert_eq!(body["msg"], "这个树洞无法举报哦");
}

#[tokio::test]
async fn invalid_id_is_rejected() {
    let app = spawn_app().await;
    for form in ["type=report&reason=x", "id=abc&type=report&reason=x"] {
        let body = report_post(&app, helpers::NORMAL_TOKEN, form).await;
        assert_eq!(body["msg"], "操作失败，id不合法", "{}", form);
    }
}

#[tokio::test]
async fn overlong_reason_is_rejected() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;
    // 每个汉字占三个字节
    let reason = "长".repeat(400);
    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=report&reason={}", pid, reason),
    )
    .await;
    assert_eq!(body["msg"], "字数过长！字数限制为1000字节。");
}

#[tokio::test]
async fn deleted_post_is_hidden_from_normal_users() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, true).await;
    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=report&reason=x", pid),
    )
    .await;
    assert_eq!(body["msg"], "找不到这条树洞");
}

#[tokio::test]
async fn fold_requires_known_tag() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;

    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=fold&reason=boring", pid),
    )
    .await;
    assert_eq!(body["msg"], "操作失败，不存在这个tag");

    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=fold&reason=NSFW", pid),
    )
    .await;
    assert_eq!(body["code"], 0);
    assert_eq!(saved_reports(&app).await[0].typ, "fold");
}

#[tokio::test]
async fn normal_user_cannot_use_admin_actions() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;
    let body = report_post(
        &app,
        helpers::NORMAL_TOKEN,
        &format!("id={}&type=delete_ban&reason=x", pid),
    )
    .await;
    assert_eq!(body["msg"], "操作失败，权限不足");
}

#[tokio::test]
async fn admin_report_carries_admin_weight() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.normal_id, false).await;
    let body = report_post(
        &app,
        helpers::ADMIN_TOKEN,
        &format!("id={}&type=delete_ban&reason=spam", pid),
    )
    .await;
    assert_eq!(body["code"], 0);

    let rows = saved_reports(&app).await;
    assert_eq!(rows[0].typ, "admin_delete_and_ban");
    assert_eq!(rows[0].weight, 100);
}

#[tokio::test]
async fn comment_report_points_at_parent_post() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.admin_id, false).await;
    let cid = create_comment(&app.db, pid, app.deleter_id).await;

    let (_, body) = app
        .post_form(
            &format!("/v3/edit/report/comment?user_token={}", helpers::NORMAL_TOKEN),
            &format!("id={}&type=report&reason=rude", cid),
        )
        .await;
    assert_eq!(body["code"], 0);

    let rows = saved_reports(&app).await;
    assert_eq!(rows[0].post_id, pid);
    assert_eq!(rows[0].comment_id, cid);
    assert_eq!(rows[0].reported_user_id, app.deleter_id);
    assert!(rows[0].is_comment);
}

#[tokio::test]
async fn missing_comment_is_reported_as_such() {
    let app = spawn_app().await;
    let (_, body) = app
        .post_form(
            &format!("/v3/edit/report/comment?user_token={}", helpers::NORMAL_TOKEN),
            "id=4242&type=report&reason=x",
        )
        .await;
    assert_eq!(body["msg"], "找不到这条树洞评论");
}

#[tokio::test]
async fn disallow_list_does_not_apply_to_comments() {
    let app = spawn_app().await;
    let (_, body) = app
        .post_form(
            &format!("/v3/edit/report/comment?user_token={}", helpers::NORMAL_TOKEN),
            "id=1000&type=report&reason=x",
        )
        .await;
    assert_eq!(body["msg"], "找不到这条树洞评论");
}

#[tokio::test]
async fn deleted_post_needs_undelete_capability() {
    let app = spawn_app().await;
    let pid = create_post(&app.db, app.normal_id, true).await;
    let form = format!("id={}&type=undelete_unban&reason=mistake", pid);

    // 删帖员能看到已删除的树洞，但无权恢复
    let body = report_post(&app, helpers::DELETER_TOKEN, &form).await;
    assert_eq!(body["msg"], "操作失败，权限不足");

    let body = report_post(&app, helpers::ADMIN_TOKEN, &form).await;
    assert_eq!(body["code"], 0);
    let rows = saved_reports(&app).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].typ, "admin_undelete_and_unban");
    assert_eq!(rows[0].reported_user_id, app.normal_id);
}
