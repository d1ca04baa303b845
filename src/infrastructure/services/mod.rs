// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 提供限流计数器存储的两种实现：
/// - Redis（redis_counter_store）：多实例部署共享计数
/// - 进程内（memory_counter_store）：单实例部署与测试
pub mod memory_counter_store;
pub mod redis_counter_store;
