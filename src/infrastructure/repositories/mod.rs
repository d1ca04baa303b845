// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的具体实现
pub mod attention_repo_impl;
pub mod ban_repo_impl;
pub mod post_repo_impl;
pub mod report_repo_impl;
pub mod system_message_repo_impl;
pub mod user_repo_impl;
