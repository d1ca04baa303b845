// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use std::collections::HashSet;

#[async_trait]
pub trait AttentionRepository: Send + Sync {
    /// 给定树洞中被该用户关注的编号
    async fn attended_post_ids(
        &self,
        user_id: i32,
        post_ids: &[i32],
    ) -> Result<HashSet<i32>, RepositoryError>;
}
