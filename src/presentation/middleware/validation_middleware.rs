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

use crate::application::validators;
use crate::presentation::context::{Pagination, RequestContext};
use crate::presentation::errors::ApiError;
use crate::presentation::state::AppState;

/// 分页阶段的参数
#[derive(Debug, Clone, Copy)]
pub struct PageGuard {
    pub max_page: u32,
    pub max_page_size: u32,
}

/// 分页参数校验中间件
///
/// 先校验 `page` 再校验 `pagesize`，通过后写入上下文
pub async fn pagination_middleware(
    State(guard): State<PageGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    {
        let ctx = RequestContext::of_mut(&mut req)?;
        let page = validators::validate_page(ctx.params.query("page"), guard.max_page)?;
        let page_size =
            validators::validate_page_size(ctx.params.query("pagesize"), guard.max_page_size)?;
        ctx.pagination = Some(Pagination { page, page_size });
    }

    Ok(next.run(req).await)
}

/// 发帖与回复内容校验中间件
pub async fn post_payload_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    {
        let params = &RequestContext::of(&req)?.params;
        validators::validate_post_payload(
            params.form_or_empty("text"),
            params.form_or_empty("type"),
            params.form_or_empty("data"),
            &state.settings.limits,
        )?;
    }

    Ok(next.run(req).await)
}
