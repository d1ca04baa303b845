// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::domain::services::rate_limiter::{
    ATTENTION_DAILY, COMMENT_BURST, COMMENT_DAILY, DETAIL_DAILY, POST_BURST, POST_DAILY,
    SEARCH_DAILY,
};
use crate::domain::services::report_service::TargetKind;
use crate::presentation::errors::ApiError;
use crate::presentation::handlers::report_handler;
use crate::presentation::middleware::auth_middleware::{
    auth_middleware, posting_ban_middleware, registered_only_middleware,
};
use crate::presentation::middleware::command_middleware::command_middleware;
use crate::presentation::middleware::rate_limit_middleware::{rate_limit_middleware, LimitGuard};
use crate::presentation::middleware::report_middleware::{
    report_params_middleware, report_preprocess_middleware, ReportGuard,
};
use crate::presentation::middleware::validation_middleware::{
    pagination_middleware, post_payload_middleware, PageGuard,
};
use crate::presentation::state::AppState;

const POST_BURST_MESSAGE: &str = "请不要短时间内连续发送树洞。";
const POST_DAILY_MESSAGE: &str = "你24小时内已经发送太多树洞了，请明天再试。";
const COMMENT_BURST_MESSAGE: &str = "请不要短时间内连续发送树洞回复。";
const COMMENT_DAILY_MESSAGE: &str = "你24小时内已经发送太多回复了，请明天再试。";
const DETAIL_DAILY_MESSAGE: &str = "你今天查看的树洞太多了，请明天再试。";
const SEARCH_DAILY_MESSAGE: &str = "你今天搜索太多树洞了，请明天再试。";
const ATTENTION_DAILY_MESSAGE: &str = "你今天关注太多树洞了，请明天再试。";

/// 管道末端的业务处理器
///
/// 由宿主应用注入；每个处理器自带 HTTP 方法，未注入的接口回复“该功能暂未开放”
#[derive(Clone)]
pub struct Endpoints {
    pub search: MethodRouter<AppState>,
    pub post_detail: MethodRouter<AppState>,
    pub send_post: MethodRouter<AppState>,
    pub send_comment: MethodRouter<AppState>,
    pub attention: MethodRouter<AppState>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: get(not_open),
            post_detail: get(not_open),
            send_post: post(not_open),
            send_comment: post(not_open),
            attention: post(not_open),
        }
    }
}

/// 创建应用路由
///
/// 每条路由上的阶段按书写顺序执行，任一阶段拒绝即终止请求
///
/// # 参数
///
/// * `state` - 应用状态
/// * `endpoints` - 业务处理器
pub fn routes(state: AppState, endpoints: Endpoints) -> Router {
    let auth = from_fn_with_state(state.clone(), auth_middleware);
    let registered_only = from_fn(registered_only_middleware);
    let posting_ban = from_fn_with_state(state.clone(), posting_ban_middleware);
    let limit = |name: &'static str, message: &'static str, log: bool| {
        from_fn_with_state(
            LimitGuard::new(state.clone(), name, message, log),
            rate_limit_middleware,
        )
    };
    let report = |kind: TargetKind| {
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(registered_only.clone())
            .layer(from_fn_with_state(
                ReportGuard::new(state.clone(), kind),
                report_params_middleware,
            ))
            .layer(from_fn_with_state(
                ReportGuard::new(state.clone(), kind),
                report_preprocess_middleware,
            ))
    };

    let limits = &state.settings.limits;
    let search_pages = PageGuard {
        max_page: limits.search_max_page,
        max_page_size: limits.max_page_size,
    };

    let search = endpoints.search.route_layer(
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(limit(SEARCH_DAILY, SEARCH_DAILY_MESSAGE, true))
            .layer(from_fn_with_state(search_pages, pagination_middleware))
            .layer(from_fn_with_state(state.clone(), command_middleware)),
    );

    let post_detail = endpoints.post_detail.route_layer(
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(limit(DETAIL_DAILY, DETAIL_DAILY_MESSAGE, true)),
    );

    let send_post = endpoints.send_post.route_layer(
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(registered_only.clone())
            .layer(posting_ban.clone())
            .layer(limit(POST_BURST, POST_BURST_MESSAGE, false))
            .layer(limit(POST_DAILY, POST_DAILY_MESSAGE, true))
            .layer(from_fn_with_state(state.clone(), post_payload_middleware)),
    );

    let send_comment = endpoints.send_comment.route_layer(
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(registered_only.clone())
            .layer(posting_ban)
            .layer(limit(COMMENT_BURST, COMMENT_BURST_MESSAGE, false))
            .layer(limit(COMMENT_DAILY, COMMENT_DAILY_MESSAGE, true))
            .layer(from_fn_with_state(state.clone(), post_payload_middleware)),
    );

    let attention = endpoints.attention.route_layer(
        ServiceBuilder::new()
            .layer(auth.clone())
            .layer(registered_only.clone())
            .layer(limit(ATTENTION_DAILY, ATTENTION_DAILY_MESSAGE, true)),
    );

    let report_post = post(report_handler::create_report).route_layer(report(TargetKind::Post));
    let report_comment =
        post(report_handler::create_report).route_layer(report(TargetKind::Comment));

    Router::new()
        .route("/health", get(health_check))
        .route("/v3/contents/search", search)
        .route("/v3/contents/post/detail", post_detail)
        .route("/v3/send/post", send_post)
        .route("/v3/send/comment", send_comment)
        .route("/v3/edit/attention", attention)
        .route("/v3/edit/report/post", report_post)
        .route("/v3/edit/report/comment", report_comment)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 尚未接入的业务接口
pub async fn not_open() -> ApiError {
    ApiError::rejected("该功能暂未开放")
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}
