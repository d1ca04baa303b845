// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// 请求管道的各个阶段：认证、限流、命令拦截、参数校验与举报预处理
pub mod auth_middleware;
pub mod command_middleware;
pub mod rate_limit_middleware;
pub mod report_middleware;
pub mod validation_middleware;
