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
use tracing::debug;

use crate::application::validators;
use crate::domain::services::report_service::{ReportRequest, TargetKind};
use crate::presentation::context::RequestContext;
use crate::presentation::errors::ApiError;
use crate::presentation::state::AppState;

/// 举报阶段的参数
#[derive(Clone)]
pub struct ReportGuard {
    pub state: AppState,
    pub kind: TargetKind,
}

impl ReportGuard {
    pub fn new(state: AppState, kind: TargetKind) -> Self {
        Self { state, kind }
    }
}

/// 举报参数校验中间件
///
/// 校验 `reason`、`id` 与禁止举报名单，并把目标编号写入上下文
pub async fn report_params_middleware(
    State(guard): State<ReportGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    {
        let ctx = RequestContext::of_mut(&mut req)?;
        let target_id = validators::validate_report_params(
            ctx.params.form_or_empty("reason"),
            ctx.params.form("id"),
            ctx.params.form_or_empty("type"),
            guard.kind == TargetKind::Post,
            &guard.state.settings,
        )?;
        ctx.target_id = Some(target_id);
    }

    Ok(next.run(req).await)
}

/// 举报预处理中间件
///
/// 加载目标并构造举报草稿，写入上下文供处理器落库
pub async fn report_preprocess_middleware(
    State(guard): State<ReportGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (identity, request) = {
        let ctx = RequestContext::of(&req)?;
        let target_id = ctx.target_id.ok_or_else(|| {
            ApiError::Internal("report preprocessing ran before parameter validation".into())
        })?;
        let request = ReportRequest {
            kind: guard.kind,
            target_id,
            action: ctx.params.form_or_empty("type").to_string(),
            reason: ctx.params.form_or_empty("reason").to_string(),
        };
        (ctx.identity.clone(), request)
    };

    let prepared = guard
        .state
        .report_service
        .prepare(&identity, &request)
        .await?;
    debug!(
        "User {} prepared {} on {:?} {}",
        identity.id, prepared.report.report_type, guard.kind, request.target_id
    );

    {
        let ctx = RequestContext::of_mut(&mut req)?;
        ctx.target = Some(prepared.target);
        ctx.draft_report = Some(prepared.report);
    }
    Ok(next.run(req).await)
}
