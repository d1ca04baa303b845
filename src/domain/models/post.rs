// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 树洞
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub text: String,
    /// "text" 或 "image"
    pub typ: String,
    pub file_path: String,
    pub tag: Option<String>,
    pub like_num: i32,
    pub reply_num: i32,
    /// Unix 时间戳（秒）
    pub created_at: i64,
    pub deleted_at: Option<i64>,
}

impl Post {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// 树洞回复
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub text: String,
    pub typ: String,
    pub file_path: String,
    pub tag: Option<String>,
    pub created_at: i64,
    pub deleted_at: Option<i64>,
}

impl Comment {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
