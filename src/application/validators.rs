// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use thiserror::Error;

use crate::config::settings::{ContentLimits, Settings};

/// 参数校验错误
///
/// `Display` 即返回给客户端的提示
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("获取失败，参数page不合法")]
    InvalidPage,

    #[error("获取失败，参数page超出范围")]
    PageOutOfRange,

    #[error("获取失败，参数pagesize不合法")]
    InvalidPageSize,

    /// 正文超过字数限制（按字计）
    #[error("字数过长！字数限制为{0}字。")]
    TextTooLong(usize),

    #[error("请输入内容")]
    EmptyText,

    #[error("未知类型的树洞")]
    UnknownPostType,

    #[error("图片大小超出限制！")]
    ImageTooLarge,

    /// 举报理由超过长度限制（按字节计）
    #[error("字数过长！字数限制为{0}字节。")]
    ReasonTooLong(usize),

    #[error("操作失败，id不合法")]
    InvalidId,

    #[error("这个树洞无法举报哦")]
    ReportDisallowed,
}

/// 校验页码，页码从 1 开始且不超过 `max_page`
///
/// # 参数
///
/// * `raw` - 查询参数 `page` 的原始值，缺失时视为非法
/// * `max_page` - 允许的最大页码
pub fn validate_page(raw: Option<&str>, max_page: u32) -> Result<u32, ValidationError> {
    let page = raw
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(ValidationError::InvalidPage)?;

    if page <= 0 || page > i64::from(max_page) {
        return Err(ValidationError::PageOutOfRange);
    }
    Ok(page as u32)
}

/// 校验每页条数，取值范围 `1..=max_page_size`
pub fn validate_page_size(raw: Option<&str>, max_page_size: u32) -> Result<u32, ValidationError> {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(size) if size > 0 && size <= i64::from(max_page_size) => Ok(size as u32),
        _ => Err(ValidationError::InvalidPageSize),
    }
}

/// 校验发帖/回复内容
///
/// 检查顺序固定：字数、空内容、类型、图片大小，返回第一个失败项
///
/// # 参数
///
/// * `text` - 正文
/// * `typ` - 类型，`text` 或 `image`
/// * `data` - base64 编码的图片
/// * `limits` - 内容限制
pub fn validate_post_payload(
    text: &str,
    typ: &str,
    data: &str,
    limits: &ContentLimits,
) -> Result<(), ValidationError> {
    if text.chars().count() > limits.post_max_length {
        return Err(ValidationError::TextTooLong(limits.post_max_length));
    }
    if text.is_empty() && typ == "text" {
        return Err(ValidationError::EmptyText);
    }
    if typ != "text" && typ != "image" {
        return Err(ValidationError::UnknownPostType);
    }
    let decoded_len = (data.len() as f64 / limits.base64_rate) as usize;
    if decoded_len > limits.img_max_length {
        return Err(ValidationError::ImageTooLarge);
    }
    Ok(())
}

/// 校验举报参数并返回目标编号
///
/// # 参数
///
/// * `reason` - 举报理由，按字节计长度
/// * `id` - 目标树洞或回复的编号
/// * `typ` - 举报操作类型
/// * `is_post` - 是否举报树洞（回复不受禁止举报名单约束）
/// * `settings` - 配置
pub fn validate_report_params(
    reason: &str,
    id: Option<&str>,
    typ: &str,
    is_post: bool,
    settings: &Settings,
) -> Result<i32, ValidationError> {
    let max = settings.limits.report_max_length;
    if reason.len() > max {
        return Err(ValidationError::ReasonTooLong(max));
    }

    let id = id
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or(ValidationError::InvalidId)?;

    if is_post && typ == "report" && settings.disallow_report_pids.contains(&id) {
        return Err(ValidationError::ReportDisallowed);
    }
    Ok(id)
}

#[cfg(test)]
#[path = "validators_test.rs"]
mod tests;
