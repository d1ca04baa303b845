// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 限流器注册表（rate_limiter）：命名的固定窗口限流器与计数器存储接口
/// - 关停闸门（shutdown_gate）：shutdown 命令的进程级确认倒计时
/// - 热榜（hot_posts）：读多写少的热榜快照
/// - 举报预处理（report_service）：举报与折叠的校验和草稿构造
pub mod hot_posts;
pub mod rate_limiter;
pub mod report_service;
pub mod shutdown_gate;
