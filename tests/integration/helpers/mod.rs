// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::{to_bytes, Body},
    extract::Extension,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use treehole::config::settings::Settings;
use treehole::domain::models::user::Role;
use treehole::domain::services::rate_limiter::CounterStore;
use treehole::infrastructure::database::entities::{ban, comment, post, system_message, user};
use treehole::infrastructure::services::memory_counter_store::MemoryCounterStore;
use treehole::presentation::context::RequestContext;
use treehole::presentation::routes::{self, Endpoints};
use treehole::presentation::state::AppState;

pub const NORMAL_TOKEN: &str = "normal-token";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const SUPER_TOKEN: &str = "super-token";
pub const BANNED_TOKEN: &str = "banned-token";
pub const DELETER_TOKEN: &str = "deleter-token";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Arc<DatabaseConnection>,
    pub exits: Arc<AtomicUsize>,
    pub normal_id: i32,
    pub admin_id: i32,
    pub super_id: i32,
    pub deleter_id: i32,
}

#[allow(dead_code)]
impl TestApp {
    pub fn exit_count(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::defaults().unwrap();
    settings.rate_limiting.store = "memory".to_string();
    settings.metrics.enabled = false;
    settings.fold_tags = vec!["NSFW".to_string(), "政治相关".to_string()];
    settings.disallow_report_pids = vec![1000];
    settings.contact_email = "help@treehole.test".to_string();
    settings
}

pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None).await.unwrap();
    db
}

/// 回显请求上下文的处理器，代替业务接口
async fn echo(Extension(ctx): Extension<RequestContext>) -> Json<Value> {
    Json(json!({
        "code": 0,
        "echo": true,
        "uid": ctx.identity.id,
        "role": ctx.identity.role.code(),
        "page": ctx.pagination.map(|p| p.page),
        "pagesize": ctx.pagination.map(|p| p.page_size),
    }))
}

pub fn echo_endpoints() -> Endpoints {
    Endpoints {
        search: get(echo),
        post_detail: get(echo),
        send_post: post(echo),
        send_comment: post(echo),
        attention: post(echo),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_settings(), Arc::new(MemoryCounterStore::new())).await
}

pub async fn spawn_app_with(settings: Settings, store: Arc<dyn CounterStore>) -> TestApp {
    let db = setup_db().await;
    let normal_id = create_user(&db, NORMAL_TOKEN, Role::Normal).await;
    let admin_id = create_user(&db, ADMIN_TOKEN, Role::Admin).await;
    let super_id = create_user(&db, SUPER_TOKEN, Role::SuperUser).await;
    let deleter_id = create_user(&db, DELETER_TOKEN, Role::Deleter).await;
    create_user(&db, BANNED_TOKEN, Role::Banned).await;

    let exits = Arc::new(AtomicUsize::new(0));
    let counter = exits.clone();
    let state = AppState::new(db.clone(), Arc::new(settings), store)
        .unwrap()
        .with_exit_hook(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    TestApp {
        router: routes::routes(state.clone(), echo_endpoints()),
        state,
        db,
        exits,
        normal_id,
        admin_id,
        super_id,
        deleter_id,
    }
}

pub async fn create_user(db: &DatabaseConnection, token: &str, role: Role) -> i32 {
    user::ActiveModel {
        email_hash: Set(format!("hash-{}", token)),
        token: Set(token.to_string()),
        role: Set(role.code()),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[allow(dead_code)]
pub async fn create_post(db: &DatabaseConnection, user_id: i32, deleted: bool) -> i32 {
    let now = Utc::now().timestamp();
    post::ActiveModel {
        user_id: Set(user_id),
        text: Set("今天天气不错".to_string()),
        typ: Set("text".to_string()),
        file_path: Set(String::new()),
        tag: Set(None),
        like_num: Set(0),
        reply_num: Set(0),
        created_at: Set(now),
        deleted_at: Set(deleted.then_some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[allow(dead_code)]
pub async fn create_comment(db: &DatabaseConnection, post_id: i32, user_id: i32) -> i32 {
    comment::ActiveModel {
        post_id: Set(post_id),
        user_id: Set(user_id),
        text: Set("同意".to_string()),
        typ: Set("text".to_string()),
        file_path: Set(String::new()),
        tag: Set(None),
        created_at: Set(Utc::now().timestamp()),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
    .id
}

#[allow(dead_code)]
pub async fn create_ban(db: &DatabaseConnection, user_id: i32, expire_at: i64) {
    ban::ActiveModel {
        user_id: Set(user_id),
        reason: Set("spam".to_string()),
        expire_at: Set(expire_at),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn create_system_message(db: &DatabaseConnection, user_id: i32, title: &str, text: &str) {
    system_message::ActiveModel {
        user_id: Set(user_id),
        title: Set(title.to_string()),
        text: Set(text.to_string()),
        created_at: Set(Utc::now().timestamp()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}
