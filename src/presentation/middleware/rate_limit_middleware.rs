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
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use tracing::{debug, warn};

use crate::domain::permissions::{self, Capability};
use crate::infrastructure::metrics::RATE_LIMIT_REJECTIONS;
use crate::presentation::context::RequestContext;
use crate::presentation::errors::ApiError;
use crate::presentation::state::AppState;

/// 一个限流阶段的参数
#[derive(Clone)]
pub struct LimitGuard {
    pub state: AppState,
    /// 注册表中的限流器名称
    pub limiter: &'static str,
    /// 超限时返回给用户的提示
    pub message: &'static str,
    /// 超限时是否记录日志
    pub log: bool,
}

impl LimitGuard {
    pub fn new(state: AppState, limiter: &'static str, message: &'static str, log: bool) -> Self {
        Self {
            state,
            limiter,
            message,
            log,
        }
    }
}

/// 速率限制中间件
///
/// 以请求者的用户编号为主体计数；持有 `BypassRateLimit` 的身份不计数。
/// 计数器存储不可用时请求失败，不会放行。
pub async fn rate_limit_middleware(
    State(guard): State<LimitGuard>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !guard.state.settings.rate_limiting.enabled {
        return Ok(next.run(req).await);
    }

    let identity = RequestContext::of(&req)?.identity.clone();
    if permissions::has_capability(&identity, Capability::BypassRateLimit) {
        return Ok(next.run(req).await);
    }

    let decision = guard
        .state
        .limiters
        .check(guard.limiter, &identity.subject_key())
        .await?;

    if decision.reached {
        if guard.log {
            warn!(
                "Limiter {} reached for user {}: {}",
                guard.limiter, identity.id, guard.message
            );
        }
        counter!(RATE_LIMIT_REJECTIONS, "limiter" => guard.limiter).increment(1);
        return Err(ApiError::rejected(guard.message));
    }

    debug!(
        "Limiter {} passed for user {}, {} remaining until {}",
        guard.limiter, identity.id, decision.remaining, decision.reset_at
    );
    Ok(next.run(req).await)
}
