// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{Report, ReportType};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 举报仓库特质
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// 是否已存在同一用户对同一目标的同类举报
    ///
    /// `target_id` 在 `is_comment` 为真时是回复编号，否则是树洞编号
    async fn exists(
        &self,
        reporter_id: i32,
        target_id: i32,
        is_comment: bool,
        report_type: ReportType,
    ) -> Result<bool, RepositoryError>;
    /// 保存举报并返回带编号与创建时间的记录
    async fn create(&self, report: &Report) -> Result<Report, RepositoryError>;
    /// 按类型分页列出举报，最新的在前
    async fn list_by_type(
        &self,
        report_type: ReportType,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Report>, RepositoryError>;
}
