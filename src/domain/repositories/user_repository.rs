// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::user::Identity;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 用户仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按令牌精确匹配查找用户
    async fn find_by_token(&self, token: &str) -> Result<Option<Identity>, RepositoryError>;
    /// 注册用户总数
    async fn count(&self) -> Result<u64, RepositoryError>;
}
