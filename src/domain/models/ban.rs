// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 禁言记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ban {
    pub id: i32,
    pub user_id: i32,
    pub reason: String,
    /// 禁言到期的 Unix 时间戳（秒）
    pub expire_at: i64,
    pub created_at: i64,
}
