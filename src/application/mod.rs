// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 与 HTTP 无关的请求参数校验，供表示层的校验阶段调用
pub mod validators;
