// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 发送给用户的系统消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub text: String,
    pub created_at: i64,
}
