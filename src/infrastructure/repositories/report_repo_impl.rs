// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;

use crate::domain::models::report::{Report, ReportType};
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::report;

pub struct ReportRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ReportRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl TryFrom<report::Model> for Report {
    type Error = RepositoryError;

    fn try_from(model: report::Model) -> Result<Self, Self::Error> {
        let report_type = model.typ.parse::<ReportType>().map_err(|_| {
            RepositoryError::Corrupted(format!(
                "report {} has unknown type `{}`",
                model.id, model.typ
            ))
        })?;
        Ok(Report {
            id: model.id,
            reporter_id: model.user_id,
            reported_user_id: model.reported_user_id,
            post_id: model.post_id,
            comment_id: model.comment_id,
            reason: model.reason,
            report_type,
            is_comment: model.is_comment,
            weight: model.weight,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn exists(
        &self,
        reporter_id: i32,
        target_id: i32,
        is_comment: bool,
        report_type: ReportType,
    ) -> Result<bool, RepositoryError> {
        let target_column = if is_comment {
            report::Column::CommentId
        } else {
            report::Column::PostId
        };
        let count = report::Entity::find()
            .filter(target_column.eq(target_id))
            .filter(report::Column::UserId.eq(reporter_id))
            .filter(report::Column::IsComment.eq(is_comment))
            .filter(report::Column::Typ.eq(report_type.as_str()))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, report: &Report) -> Result<Report, RepositoryError> {
        let model = report::ActiveModel {
            user_id: Set(report.reporter_id),
            reported_user_id: Set(report.reported_user_id),
            post_id: Set(report.post_id),
            comment_id: Set(report.comment_id),
            reason: Set(report.reason.clone()),
            typ: Set(report.report_type.as_str().to_string()),
            is_comment: Set(report.is_comment),
            weight: Set(report.weight),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await?;

        Report::try_from(model)
    }

    async fn list_by_type(
        &self,
        report_type: ReportType,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Report>, RepositoryError> {
        report::Entity::find()
            .filter(report::Column::Typ.eq(report_type.as_str()))
            .order_by_desc(report::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Report::try_from)
            .collect()
    }
}
