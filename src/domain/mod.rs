// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：用户、树洞、举报等业务实体
/// - 权限（permissions）：按角色查询的能力表与操作集合
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：限流器注册表、关停闸门、热榜与举报预处理
///
/// 领域层不依赖于任何外部实现，体现了纯粹的业务规则。
pub mod models;
pub mod permissions;
pub mod repositories;
pub mod services;
