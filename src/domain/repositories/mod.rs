// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 用户仓库（user_repository）：按令牌解析身份、统计注册人数
/// - 树洞仓库（post_repository）：读取树洞与回复、统计与热榜查询
/// - 举报仓库（report_repository）：重复举报检查、落库与列表
/// - 系统消息仓库（system_message_repository）
/// - 禁言仓库（ban_repository）
/// - 关注仓库（attention_repository）
pub mod attention_repository;
pub mod ban_repository;
pub mod post_repository;
pub mod report_repository;
pub mod system_message_repository;
pub mod user_repository;

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 存储的数据无法映射到领域模型
    #[error("Corrupted record: {0}")]
    Corrupted(String),
}
