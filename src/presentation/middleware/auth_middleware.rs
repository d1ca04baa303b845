// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Local, Utc};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::models::user::{Identity, Role};
use crate::domain::permissions::{self, Capability};
use crate::presentation::context::{RequestContext, RequestParams};
use crate::presentation::errors::ApiError;
use crate::presentation::state::AppState;
use crate::utils::network;

/// 登录凭据失效时的提示
pub const LOGIN_EXPIRED_MESSAGE: &str = "登录凭据过期，请使用邮箱重新登录。";

/// 认证中间件
///
/// 解析请求参数，按查询参数 `user_token` 确定请求者身份，
/// 并把 [`RequestContext`] 放入请求扩展
///
/// # 参数
///
/// * `state` - 应用状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 后续阶段的响应
/// * `Err(ApiError)` - 凭据无效、账户冻结或数据库错误
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut req, params) = RequestParams::extract(req).await?;
    let token = params.query_or_empty("user_token");

    let found = if token.is_empty() {
        None
    } else {
        state.users.find_by_token(token).await?
    };

    let identity = match found {
        Some(identity) if identity.role == Role::Banned => {
            debug!("Rejecting frozen account {}", identity.id);
            return Err(ApiError::Frozen(format!(
                "您的账户已被冻结。如果需要解冻，请联系{}。",
                state.settings.contact_email
            )));
        }
        Some(identity) => identity,
        None => {
            let peer = req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0);
            let from_allowed_subnet = network::client_ip(req.headers(), peer)
                .map(|ip| network::is_in_allowed_subnet(ip, &state.allowed_subnets))
                .unwrap_or(false);

            if !state.settings.allow_unregistered_access && !from_allowed_subnet {
                return Err(ApiError::rejected(LOGIN_EXPIRED_MESSAGE));
            }
            Identity::unregistered()
        }
    };

    req.extensions_mut()
        .insert(RequestContext::new(params, identity));
    Ok(next.run(req).await)
}

/// 拒绝未登录用户
pub async fn registered_only_middleware(req: Request, next: Next) -> Result<Response, ApiError> {
    if RequestContext::of(&req)?.identity.role == Role::Unregistered {
        return Err(ApiError::rejected(LOGIN_EXPIRED_MESSAGE));
    }
    Ok(next.run(req).await)
}

/// 拒绝处于禁言期内的用户发帖与回复
pub async fn posting_ban_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = RequestContext::of(&req)?.identity.clone();

    if !permissions::has_capability(&identity, Capability::OverrideBan) {
        let now = Utc::now().timestamp();
        if let Some(ban) = state.bans.find_active(identity.id, now).await? {
            return Err(ApiError::Rejected(format!(
                "很抱歉，您当前处于禁言状态，在{}之前您将无法发布树洞。",
                format_timestamp(ban.expire_at)
            )));
        }
    }
    Ok(next.run(req).await)
}

fn format_timestamp(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
