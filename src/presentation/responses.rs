// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::domain::models::post::Post;
use crate::domain::models::report::Action;

/// 提示类条目使用的时间戳，保证在客户端排在最前
pub const INFO_TIMESTAMP: i64 = 2147483647;

/// 列表中的一条树洞
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub pid: i32,
    pub text: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub timestamp: i64,
    pub reply: i32,
    pub likenum: i32,
    pub attention: bool,
    pub permissions: Vec<String>,
    pub url: String,
    pub tag: Option<String>,
}

impl ListItem {
    /// 由文本合成的条目，用于管理命令的输出
    pub fn text(pid: i32, timestamp: i64, text: impl Into<String>) -> Self {
        Self {
            pid,
            text: text.into(),
            typ: "text".to_string(),
            timestamp,
            reply: 0,
            likenum: 0,
            attention: false,
            permissions: Vec::new(),
            url: String::new(),
            tag: None,
        }
    }

    pub fn from_post(post: &Post, attention: bool, permissions: &[Action]) -> Self {
        Self {
            pid: post.id,
            text: post.text.clone(),
            typ: post.typ.clone(),
            timestamp: post.created_at,
            reply: post.reply_num,
            likenum: post.like_num,
            attention,
            permissions: permissions.iter().map(|a| a.as_str().to_string()).collect(),
            url: post.file_path.clone(),
            tag: post.tag.clone(),
        }
    }
}

/// 列表响应 `{"code":0,"data":[...],"count":n}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub code: i32,
    pub data: Vec<ListItem>,
    pub count: usize,
}

impl ListResponse {
    pub fn new(data: Vec<ListItem>) -> Self {
        Self {
            code: 0,
            count: data.len(),
            data,
        }
    }
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// 只含一条提示文本的列表响应
pub fn info_response(text: impl Into<String>) -> Response {
    ListResponse::new(vec![ListItem::text(0, INFO_TIMESTAMP, text)]).into_response()
}

/// `{"code":0}`
pub fn success_response() -> Response {
    Json(json!({ "code": 0 })).into_response()
}
