// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，提供对具体技术的抽象和封装。
///
/// 包含的子模块：
/// - 缓存（cache）：Redis 客户端
/// - 数据库（database）：数据库连接和实体映射
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：领域仓库接口的 SeaORM 实现
/// - 服务（services）：限流计数器存储
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知具体技术实现。
pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod services;
