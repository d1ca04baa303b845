// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::models::post::{Comment, Post};
use crate::domain::models::report::{Action, Report};
use crate::domain::models::user::Identity;
use crate::domain::permissions::{self, Capability, TargetState};
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::RepositoryError;

/// 举报目标的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Post,
    Comment,
}

/// 已加载的举报目标
#[derive(Debug, Clone, PartialEq)]
pub enum ReportTarget {
    Post(Post),
    Comment(Comment),
}

impl ReportTarget {
    fn state(&self) -> TargetState {
        match self {
            ReportTarget::Post(post) => post.into(),
            ReportTarget::Comment(comment) => comment.into(),
        }
    }

    pub fn owner_id(&self) -> i32 {
        self.state().owner_id
    }

    /// 目标是否已被删除，只有具备查看权限的举报者能加载到
    pub fn is_deleted(&self) -> bool {
        self.state().deleted
    }
}

/// 举报请求
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub kind: TargetKind,
    pub target_id: i32,
    /// 客户端提交的 `type`
    pub action: String,
    pub reason: String,
}

/// 预处理成功的结果
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub target: ReportTarget,
    pub report: Report,
}

/// 举报预处理错误
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("找不到这条树洞")]
    PostNotFound,

    #[error("找不到这条树洞评论")]
    CommentNotFound,

    #[error("操作失败，权限不足")]
    PermissionDenied,

    #[error("操作失败，不存在这个tag")]
    UnknownFoldTag,

    #[error("已经举报过了，举报失败。")]
    AlreadyReported,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 举报预处理服务
///
/// 加载目标、校验权限与折叠标签、检查重复举报，最后构造举报草稿
pub struct ReportService {
    posts: Arc<dyn PostRepository>,
    reports: Arc<dyn ReportRepository>,
    fold_tags: Vec<String>,
}

impl ReportService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        reports: Arc<dyn ReportRepository>,
        fold_tags: Vec<String>,
    ) -> Self {
        Self {
            posts,
            reports,
            fold_tags,
        }
    }

    /// 预处理一次举报
    ///
    /// # 参数
    ///
    /// * `identity` - 举报者
    /// * `request` - 举报请求
    ///
    /// # 返回值
    ///
    /// * `Ok(PreparedReport)` - 目标与举报草稿
    /// * `Err(ReportError)` - 第一个未通过的检查
    pub async fn prepare(
        &self,
        identity: &Identity,
        request: &ReportRequest,
    ) -> Result<PreparedReport, ReportError> {
        let include_deleted = permissions::has_capability(identity, Capability::ViewDeletedPost);
        let target = self.load_target(request, include_deleted).await?;

        let action = request
            .action
            .parse::<Action>()
            .ok()
            .filter(|action| {
                permissions::permitted_actions(identity, target.state()).contains(action)
            })
            .ok_or(ReportError::PermissionDenied)?;

        if action == Action::Fold && !self.fold_tags.iter().any(|tag| *tag == request.reason) {
            return Err(ReportError::UnknownFoldTag);
        }

        let report_type = action.report_type();
        let is_comment = request.kind == TargetKind::Comment;
        // 先查后写，并发的重复提交仍可能同时通过
        if action.is_deduplicated()
            && self
                .reports
                .exists(identity.id, request.target_id, is_comment, report_type)
                .await?
        {
            return Err(ReportError::AlreadyReported);
        }

        let (post_id, comment_id) = match &target {
            ReportTarget::Post(post) => (post.id, 0),
            ReportTarget::Comment(comment) => (comment.post_id, comment.id),
        };

        let report = Report {
            id: 0,
            reporter_id: identity.id,
            reported_user_id: target.owner_id(),
            post_id,
            comment_id,
            reason: request.reason.clone(),
            report_type,
            is_comment,
            weight: permissions::report_weight(identity),
            created_at: 0,
        };

        Ok(PreparedReport { target, report })
    }

    async fn load_target(
        &self,
        request: &ReportRequest,
        include_deleted: bool,
    ) -> Result<ReportTarget, ReportError> {
        match request.kind {
            TargetKind::Post => self
                .posts
                .find_post(request.target_id, include_deleted)
                .await?
                .map(ReportTarget::Post)
                .ok_or(ReportError::PostNotFound),
            TargetKind::Comment => self
                .posts
                .find_comment(request.target_id, include_deleted)
                .await?
                .map(ReportTarget::Comment)
                .ok_or(ReportError::CommentNotFound),
        }
    }
}

#[cfg(test)]
#[path = "report_service_test.rs"]
mod tests;
