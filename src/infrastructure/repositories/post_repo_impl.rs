// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use std::sync::Arc;

use crate::domain::models::post::{Comment, Post};
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{comment, post};

pub struct PostRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<post::Model> for Post {
    fn from(model: post::Model) -> Self {
        Post {
            id: model.id,
            user_id: model.user_id,
            text: model.text,
            typ: model.typ,
            file_path: model.file_path,
            tag: model.tag.filter(|t| !t.is_empty()),
            like_num: model.like_num,
            reply_num: model.reply_num,
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

impl From<comment::Model> for Comment {
    fn from(model: comment::Model) -> Self {
        Comment {
            id: model.id,
            post_id: model.post_id,
            user_id: model.user_id,
            text: model.text,
            typ: model.typ,
            file_path: model.file_path,
            tag: model.tag.filter(|t| !t.is_empty()),
            created_at: model.created_at,
            deleted_at: model.deleted_at,
        }
    }
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn find_post(
        &self,
        id: i32,
        include_deleted: bool,
    ) -> Result<Option<Post>, RepositoryError> {
        let mut query = post::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(post::Column::DeletedAt.is_null());
        }
        Ok(query.one(self.db.as_ref()).await?.map(Post::from))
    }

    async fn find_comment(
        &self,
        id: i32,
        include_deleted: bool,
    ) -> Result<Option<Comment>, RepositoryError> {
        let mut query = comment::Entity::find_by_id(id);
        if !include_deleted {
            query = query.filter(comment::Column::DeletedAt.is_null());
        }
        Ok(query.one(self.db.as_ref()).await?.map(Comment::from))
    }

    async fn count_created_since(&self, since: i64) -> Result<u64, RepositoryError> {
        Ok(post::Entity::find()
            .filter(post::Column::CreatedAt.gt(since))
            .count(self.db.as_ref())
            .await?)
    }

    async fn count_deleted_created_since(&self, since: i64) -> Result<u64, RepositoryError> {
        Ok(post::Entity::find()
            .filter(post::Column::DeletedAt.is_not_null())
            .filter(post::Column::CreatedAt.gt(since))
            .count(self.db.as_ref())
            .await?)
    }

    async fn hot_posts(&self, since: i64, limit: u64) -> Result<Vec<Post>, RepositoryError> {
        let models = post::Entity::find()
            .filter(post::Column::DeletedAt.is_null())
            .filter(post::Column::CreatedAt.gt(since))
            .order_by_desc(Expr::col(post::Column::LikeNum).add(Expr::col(post::Column::ReplyNum)))
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(Post::from).collect())
    }
}
