// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的辅助功能，包括客户端地址解析与日志初始化
pub mod network;
pub mod telemetry;
