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
use tracing::info;

use crate::presentation::commands;
use crate::presentation::context::RequestContext;
use crate::presentation::errors::ApiError;
use crate::presentation::state::AppState;

/// 管理命令拦截中间件
///
/// `keywords` 命中命令表时直接返回命令结果，否则交给搜索处理器
pub async fn command_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resolved = {
        let ctx = RequestContext::of(&req)?;
        commands::resolve(ctx.params.query_or_empty("keywords"), &ctx.identity)
            .map(|command| (command, ctx.clone()))
    };
    let Some((command, ctx)) = resolved else {
        return Ok(next.run(req).await);
    };

    info!("User {} runs command {:?}", ctx.identity.id, command);
    commands::execute(command, &state, &ctx).await
}
