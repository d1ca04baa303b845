// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::domain::models::ban::Ban;
use crate::domain::repositories::ban_repository::BanRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::ban;

pub struct BanRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl BanRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BanRepository for BanRepositoryImpl {
    async fn find_active(&self, user_id: i32, now: i64) -> Result<Option<Ban>, RepositoryError> {
        let model = ban::Entity::find()
            .filter(ban::Column::UserId.eq(user_id))
            .filter(ban::Column::ExpireAt.gt(now))
            .order_by_desc(ban::Column::ExpireAt)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(|m| Ban {
            id: m.id,
            user_id: m.user_id,
            reason: m.reason,
            expire_at: m.expire_at,
            created_at: m.created_at,
        }))
    }
}
