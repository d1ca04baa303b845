// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post::{Comment, Post};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 树洞仓库特质
///
/// 定义管道对树洞与回复的只读访问
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 根据ID查找树洞，`include_deleted` 为真时包含已删除的树洞
    async fn find_post(&self, id: i32, include_deleted: bool)
        -> Result<Option<Post>, RepositoryError>;
    /// 根据ID查找回复
    async fn find_comment(
        &self,
        id: i32,
        include_deleted: bool,
    ) -> Result<Option<Comment>, RepositoryError>;
    /// 某时刻之后创建的树洞数（包含已删除）
    async fn count_created_since(&self, since: i64) -> Result<u64, RepositoryError>;
    /// 某时刻之后创建且已被删除的树洞数
    async fn count_deleted_created_since(&self, since: i64) -> Result<u64, RepositoryError>;
    /// 某时刻之后创建的未删除树洞，按点赞数与回复数之和降序
    async fn hot_posts(&self, since: i64, limit: u64) -> Result<Vec<Post>, RepositoryError>;
}
