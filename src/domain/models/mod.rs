// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了请求管道读取与构造的业务实体，包括：
/// - 用户（user）：角色与请求者身份
/// - 树洞（post）：树洞与回复
/// - 举报（report）：操作、举报类型与举报草稿
/// - 系统消息（system_message）
/// - 禁言（ban）
pub mod ban;
pub mod post;
pub mod report;
pub mod system_message;
pub mod user;
