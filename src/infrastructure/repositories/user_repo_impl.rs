// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;
use tracing::warn;

use crate::domain::models::user::{Identity, Role};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::user;

pub struct UserRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<user::Model> for Identity {
    fn from(model: user::Model) -> Self {
        let role = Role::from_code(model.role).unwrap_or_else(|| {
            warn!(
                "User {} has unknown role code {}, treating as normal user",
                model.id, model.role
            );
            Role::Normal
        });
        Identity {
            id: model.id,
            role,
            email_hash: model.email_hash,
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_by_token(&self, token: &str) -> Result<Option<Identity>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(Identity::from))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(user::Entity::find().count(self.db.as_ref()).await?)
    }
}
