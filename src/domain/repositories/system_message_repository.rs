// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::system_message::SystemMessage;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

#[async_trait]
pub trait SystemMessageRepository: Send + Sync {
    /// 分页列出所有用户的系统消息，最新的在前
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<SystemMessage>, RepositoryError>;
}
