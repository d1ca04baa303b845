// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 与 HTTP 无关的参数校验
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、角色能力表、领域服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、Redis、指标导出等外部服务集成
pub mod infrastructure;

/// 表示层模块
///
/// 请求管道：路由、中间件阶段、管理命令与响应格式
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 后台任务
pub mod workers;
