// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 搜索关键字上的管理命令
//!
//! 命令按 [`COMMANDS`] 的顺序匹配：关键字必须完全相同，且请求者持有所需能力。

use axum::response::{IntoResponse, Response};
use chrono::Utc;
use metrics::counter;
use tracing::{info, warn};

use crate::domain::models::user::Identity;
use crate::domain::models::report::ReportType;
use crate::domain::permissions::{self, Capability};
use crate::domain::services::shutdown_gate::ShutdownStep;
use crate::infrastructure::metrics::COMMANDS_EXECUTED;
use crate::presentation::context::RequestContext;
use crate::presentation::errors::ApiError;
use crate::presentation::responses::{info_response, ListItem, ListResponse};
use crate::presentation::state::AppState;

const DAY_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Statistics,
    Reports,
    Messages,
    Shutdown,
    HotPosts,
}

/// 命令表：(关键字, 所需能力, 命令)
pub const COMMANDS: &[(&str, Option<Capability>, Command)] = &[
    ("help", Some(Capability::ShowHelp), Command::Help),
    ("statistics", Some(Capability::ViewStatistics), Command::Statistics),
    ("reports", Some(Capability::ViewReports), Command::Reports),
    ("messages", Some(Capability::ViewAllSystemMessages), Command::Messages),
    ("shutdown", Some(Capability::Shutdown), Command::Shutdown),
    ("热榜", None, Command::HotPosts),
];

/// help 中列出的条目：(所需能力, 说明)
const HELP_LINES: &[(Capability, &str)] = &[
    (Capability::ViewDeletedPost, "`deleted` - 搜索所有被删的树洞和回复"),
    (Capability::ViewAllSystemMessages, "`messages` - 查看所有用户收到的系统消息"),
    (Capability::ViewReports, "`reports` - 查看所有用户的删除举报(树洞or回复)"),
    (Capability::ViewStatistics, "`statistics` - 查看树洞统计信息"),
    (Capability::Shutdown, "`shutdown` - 关闭树洞, 请谨慎使用此命令"),
];

impl Command {
    pub fn keyword(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, _, command)| *command == self)
            .map(|(keyword, _, _)| *keyword)
            .unwrap_or("")
    }
}

/// 找到第一个关键字匹配且请求者有权执行的命令
pub fn resolve(keywords: &str, identity: &Identity) -> Option<Command> {
    COMMANDS
        .iter()
        .find(|(keyword, capability, _)| {
            *keyword == keywords
                && capability.map_or(true, |c| permissions::has_capability(identity, c))
        })
        .map(|(_, _, command)| *command)
}

/// 执行命令并生成响应
pub async fn execute(
    command: Command,
    state: &AppState,
    ctx: &RequestContext,
) -> Result<Response, ApiError> {
    counter!(COMMANDS_EXECUTED, "command" => command.keyword()).increment(1);

    match command {
        Command::Help => Ok(info_response(help_text(&ctx.identity))),
        Command::Statistics => statistics(state).await,
        Command::Reports => list_reports(state, ctx).await,
        Command::Messages => list_system_messages(state, ctx).await,
        Command::Shutdown => Ok(shutdown(state, &ctx.identity)),
        Command::HotPosts => hot_posts(state, ctx).await,
    }
}

fn help_text(identity: &Identity) -> String {
    HELP_LINES
        .iter()
        .filter(|(capability, _)| permissions::has_capability(identity, *capability))
        .map(|(_, line)| format!("{}\n", line))
        .collect()
}

async fn statistics(state: &AppState) -> Result<Response, ApiError> {
    let since = Utc::now().timestamp() - DAY_SECONDS;
    let users = state.users.count().await?;
    let posts = state.posts.count_created_since(since).await?;
    let deleted = state.posts.count_deleted_created_since(since).await?;

    Ok(info_response(format!(
        "总注册人数：{}\n24h内发帖数：{}\n24h内删帖数：{}\n",
        users, posts, deleted
    )))
}

async fn list_reports(state: &AppState, ctx: &RequestContext) -> Result<Response, ApiError> {
    let page = ctx.pagination()?;
    let reports = state
        .reports
        .list_by_type(ReportType::UserReport, page.limit(), page.offset())
        .await?;

    let items = reports
        .iter()
        .map(|r| ListItem::text(r.id, r.created_at, r.to_string()))
        .collect();
    Ok(ListResponse::new(items).into_response())
}

async fn list_system_messages(
    state: &AppState,
    ctx: &RequestContext,
) -> Result<Response, ApiError> {
    let page = ctx.pagination()?;
    let messages = state
        .system_messages
        .list(page.limit(), page.offset())
        .await?;

    let items = messages
        .into_iter()
        .map(|m| {
            ListItem::text(
                m.id,
                m.created_at,
                format!("User ID:{}\nTitle:{}\nContent:{}", m.user_id, m.title, m.text),
            )
        })
        .collect();
    Ok(ListResponse::new(items).into_response())
}

fn shutdown(state: &AppState, identity: &Identity) -> Response {
    let step = state.shutdown.confirm();
    warn!(
        "Super user {} requested shutdown, remaining confirmations before this one: {}",
        identity.email_hash,
        match step {
            ShutdownStep::Remaining(n) => n,
            ShutdownStep::Exit => 0,
        }
    );

    match step {
        ShutdownStep::Remaining(n) => info_response(format!("{} more times to fully shutdown.", n)),
        ShutdownStep::Exit => {
            info!("Shutdown countdown reached zero, exiting");
            (state.exit_hook)();
            info_response("Shutting down.")
        }
    }
}

async fn hot_posts(state: &AppState, ctx: &RequestContext) -> Result<Response, ApiError> {
    let page = ctx.pagination()?;
    let posts = state.hot_posts.window(page.page, page.page_size);
    let ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let attended = state
        .attentions
        .attended_post_ids(ctx.identity.id, &ids)
        .await?;

    let items = posts
        .iter()
        .map(|post| {
            let actions = permissions::permitted_actions(&ctx.identity, post.into());
            ListItem::from_post(post, attended.contains(&post.id), &actions)
        })
        .collect();
    Ok(ListResponse::new(items).into_response())
}
