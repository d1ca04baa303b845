// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};
use std::sync::Arc;

use crate::domain::models::system_message::SystemMessage;
use crate::domain::repositories::system_message_repository::SystemMessageRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::system_message;

pub struct SystemMessageRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl SystemMessageRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SystemMessageRepository for SystemMessageRepositoryImpl {
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<SystemMessage>, RepositoryError> {
        let models = system_message::Entity::find()
            .order_by_desc(system_message::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| SystemMessage {
                id: m.id,
                user_id: m.user_id,
                title: m.title,
                text: m.text,
                created_at: m.created_at,
            })
            .collect())
    }
}
