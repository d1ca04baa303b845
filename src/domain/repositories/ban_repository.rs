// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::ban::Ban;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// 用户当前生效的禁言中到期最晚的一条
    async fn find_active(&self, user_id: i32, now: i64) -> Result<Option<Ban>, RepositoryError>;
}
