// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, State},
    response::Response,
};
use metrics::counter;
use tracing::info;

use crate::infrastructure::metrics::REPORTS_CREATED;
use crate::presentation::context::RequestContext;
use crate::presentation::errors::ApiError;
use crate::presentation::responses::success_response;
use crate::presentation::state::AppState;

/// 保存预处理阶段构造的举报
///
/// # 参数
///
/// * `state` - 应用状态
/// * `ctx` - 请求上下文，必须带有举报目标与草稿
///
/// # 返回值
///
/// * `Ok(Response)` - `{"code":0}`
/// * `Err(ApiError)` - 缺少草稿或写入失败
pub async fn create_report(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let (Some(target), Some(draft)) = (ctx.target, ctx.draft_report) else {
        return Err(ApiError::Internal(
            "report handler reached without a prepared report".into(),
        ));
    };

    let saved = state.reports.create(&draft).await?;
    counter!(REPORTS_CREATED, "type" => saved.report_type.as_str()).increment(1);
    info!(
        "Report {} created by user {}: {} on post {} comment {} (owner {}, deleted: {})",
        saved.id,
        saved.reporter_id,
        saved.report_type,
        saved.post_id,
        saved.comment_id,
        target.owner_id(),
        target.is_deleted()
    );

    Ok(success_response())
}
