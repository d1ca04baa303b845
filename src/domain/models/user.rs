// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 用户角色
///
/// `Unregistered` 只在请求期间出现，从不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Unregistered,
    Normal,
    Banned,
    Admin,
    Deleter,
    UnDeleter,
    SuperUser,
}

impl Role {
    /// 数据库中的角色编码
    pub fn code(self) -> i32 {
        match self {
            Role::Unregistered => -1,
            Role::Normal => 0,
            Role::Banned => 1,
            Role::Admin => 2,
            Role::Deleter => 3,
            Role::UnDeleter => 4,
            Role::SuperUser => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Role::Unregistered),
            0 => Some(Role::Normal),
            1 => Some(Role::Banned),
            2 => Some(Role::Admin),
            3 => Some(Role::Deleter),
            4 => Some(Role::UnDeleter),
            5 => Some(Role::SuperUser),
            _ => None,
        }
    }
}

/// 请求者身份
///
/// 每个请求通过 `user_token` 解析一次，由外部用户表持有
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i32,
    pub role: Role,
    pub email_hash: String,
}

impl Identity {
    /// 未登录访问时使用的合成身份
    pub fn unregistered() -> Self {
        Self {
            id: -1,
            role: Role::Unregistered,
            email_hash: String::new(),
        }
    }

    /// 限流器使用的主体键
    pub fn subject_key(&self) -> String {
        self.id.to_string()
    }
}
