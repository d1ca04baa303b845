// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 对树洞或回复可执行的操作
///
/// 客户端以 `type` 参数提交这些字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Report,
    Fold,
    SetTag,
    Delete,
    DeleteBan,
    UndeleteUnban,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Report => "report",
            Action::Fold => "fold",
            Action::SetTag => "set_tag",
            Action::Delete => "delete",
            Action::DeleteBan => "delete_ban",
            Action::UndeleteUnban => "undelete_unban",
        }
    }

    /// 该操作落库时的举报类型
    pub fn report_type(self) -> ReportType {
        match self {
            Action::Report => ReportType::UserReport,
            Action::Fold => ReportType::UserFold,
            Action::SetTag => ReportType::AdminTag,
            Action::Delete => ReportType::UserDelete,
            Action::DeleteBan => ReportType::AdminDeleteAndBan,
            Action::UndeleteUnban => ReportType::AdminUndeleteAndUnban,
        }
    }

    /// 是否需要做重复举报检查
    pub fn is_deduplicated(self) -> bool {
        matches!(self, Action::Report | Action::Fold)
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(Action::Report),
            "fold" => Ok(Action::Fold),
            "set_tag" => Ok(Action::SetTag),
            "delete" => Ok(Action::Delete),
            "delete_ban" => Ok(Action::DeleteBan),
            "undelete_unban" => Ok(Action::UndeleteUnban),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 举报记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    UserReport,
    UserFold,
    AdminTag,
    UserDelete,
    AdminDeleteAndBan,
    AdminUndeleteAndUnban,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::UserReport => "report",
            ReportType::UserFold => "fold",
            ReportType::AdminTag => "set_tag",
            ReportType::UserDelete => "user_delete",
            ReportType::AdminDeleteAndBan => "admin_delete_and_ban",
            ReportType::AdminUndeleteAndUnban => "admin_undelete_and_unban",
        }
    }
}

impl FromStr for ReportType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "report" => Ok(ReportType::UserReport),
            "fold" => Ok(ReportType::UserFold),
            "set_tag" => Ok(ReportType::AdminTag),
            "user_delete" => Ok(ReportType::UserDelete),
            "admin_delete_and_ban" => Ok(ReportType::AdminDeleteAndBan),
            "admin_undelete_and_unban" => Ok(ReportType::AdminUndeleteAndUnban),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 举报
///
/// 预处理阶段构造草稿（`id == 0`、`created_at == 0`），由举报处理器落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i32,
    pub reporter_id: i32,
    pub reported_user_id: i32,
    pub post_id: i32,
    /// 举报树洞时为 0
    pub comment_id: i32,
    pub reason: String,
    pub report_type: ReportType,
    pub is_comment: bool,
    pub weight: i32,
    pub created_at: i64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_comment {
            writeln!(f, "Comment ID:{} (Post ID:{})", self.comment_id, self.post_id)?;
        } else {
            writeln!(f, "Post ID:{}", self.post_id)?;
        }
        writeln!(f, "Type:{}", self.report_type)?;
        writeln!(f, "Reporter ID:{}", self.reporter_id)?;
        writeln!(f, "Reported User ID:{}", self.reported_user_id)?;
        writeln!(f, "Weight:{}", self.weight)?;
        write!(f, "Reason:{}", self.reason)
    }
}
