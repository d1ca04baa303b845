// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::repositories::attention_repository::AttentionRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::attention;

pub struct AttentionRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl AttentionRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttentionRepository for AttentionRepositoryImpl {
    async fn attended_post_ids(
        &self,
        user_id: i32,
        post_ids: &[i32],
    ) -> Result<HashSet<i32>, RepositoryError> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = attention::Entity::find()
            .filter(attention::Column::UserId.eq(user_id))
            .filter(attention::Column::PostId.is_in(post_ids.iter().copied()))
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|row| row.post_id).collect())
    }
}
