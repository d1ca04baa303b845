// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 角色能力表
//!
//! 所有与角色相关的授权判断都从 [`capabilities`] 这一张表出发。

use crate::domain::models::post::{Comment, Post};
use crate::domain::models::report::Action;
use crate::domain::models::user::{Identity, Role};

/// 可被授予的能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ShowHelp,
    ViewStatistics,
    ViewReports,
    ViewAllSystemMessages,
    Shutdown,
    ViewDeletedPost,
    OverrideBan,
    BypassRateLimit,
    SetTag,
    DeleteAndBan,
    Undelete,
}

use Capability::*;

const ADMIN_CAPABILITIES: &[Capability] = &[
    ShowHelp,
    ViewStatistics,
    ViewReports,
    ViewAllSystemMessages,
    ViewDeletedPost,
    OverrideBan,
    BypassRateLimit,
    SetTag,
    DeleteAndBan,
    Undelete,
];

const SUPER_USER_CAPABILITIES: &[Capability] = &[
    ShowHelp,
    ViewStatistics,
    ViewReports,
    ViewAllSystemMessages,
    Shutdown,
    ViewDeletedPost,
    OverrideBan,
    BypassRateLimit,
    SetTag,
    DeleteAndBan,
    Undelete,
];

/// 角色到能力的映射
pub fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Unregistered | Role::Normal | Role::Banned => &[],
        Role::Deleter => &[ShowHelp, ViewReports, ViewDeletedPost, SetTag, DeleteAndBan],
        Role::UnDeleter => &[ShowHelp, ViewReports, ViewDeletedPost, Undelete],
        Role::Admin => ADMIN_CAPABILITIES,
        Role::SuperUser => SUPER_USER_CAPABILITIES,
    }
}

pub fn has_capability(identity: &Identity, capability: Capability) -> bool {
    capabilities(identity.role).contains(&capability)
}

/// 举报权重，越高的角色举报越快生效
pub fn report_weight(identity: &Identity) -> i32 {
    match identity.role {
        Role::SuperUser | Role::Admin => 100,
        Role::Deleter | Role::UnDeleter => 10,
        _ => 1,
    }
}

/// 计算权限时需要的目标状态
#[derive(Debug, Clone, Copy)]
pub struct TargetState {
    pub owner_id: i32,
    pub deleted: bool,
}

impl From<&Post> for TargetState {
    fn from(post: &Post) -> Self {
        Self {
            owner_id: post.user_id,
            deleted: post.is_deleted(),
        }
    }
}

impl From<&Comment> for TargetState {
    fn from(comment: &Comment) -> Self {
        Self {
            owner_id: comment.user_id,
            deleted: comment.is_deleted(),
        }
    }
}

/// 请求者对某个树洞或回复可执行的操作
pub fn permitted_actions(identity: &Identity, target: TargetState) -> Vec<Action> {
    if matches!(identity.role, Role::Unregistered | Role::Banned) {
        return Vec::new();
    }

    let mut actions = Vec::new();
    if target.deleted {
        if has_capability(identity, Undelete) {
            actions.push(Action::UndeleteUnban);
        }
        return actions;
    }

    actions.push(Action::Report);
    actions.push(Action::Fold);
    if target.owner_id == identity.id {
        actions.push(Action::Delete);
    }
    if has_capability(identity, SetTag) {
        actions.push(Action::SetTag);
    }
    if has_capability(identity, DeleteAndBan) {
        actions.push(Action::DeleteBan);
    }
    actions
}
