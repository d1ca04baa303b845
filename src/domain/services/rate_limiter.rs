// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// 发帖短时限流
pub const POST_BURST: &str = "post_burst";
/// 发帖每日限流
pub const POST_DAILY: &str = "post_daily";
/// 回复短时限流
pub const COMMENT_BURST: &str = "comment_burst";
/// 回复每日限流
pub const COMMENT_DAILY: &str = "comment_daily";
/// 查看树洞详情每日限流
pub const DETAIL_DAILY: &str = "detail_daily";
/// 搜索每日限流
pub const SEARCH_DAILY: &str = "search_daily";
/// 关注每日限流
pub const ATTENTION_DAILY: &str = "attention_daily";

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// 默认注册的限流器：(名称, 窗口, 配额)
pub const DEFAULT_LIMITS: &[(&str, Duration, u64)] = &[
    (POST_BURST, Duration::from_secs(20), 1),
    (POST_DAILY, DAY, 100),
    (COMMENT_BURST, Duration::from_secs(10), 1),
    (COMMENT_DAILY, DAY, 500),
    (DETAIL_DAILY, DAY, 8000),
    (SEARCH_DAILY, DAY, 1000),
    (ATTENTION_DAILY, DAY, 2000),
];

/// 限流错误类型
#[derive(Error, Debug)]
pub enum RateLimitError {
    /// 计数器存储不可用，请求必须按失败处理
    #[error("Rate limiter store unavailable: {0}")]
    LimiterUnavailable(String),

    #[error("Rate limiter `{0}` is not registered")]
    UnknownLimiter(String),
}

/// 固定窗口内的一次计数结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowCount {
    /// 本次自增后的计数
    pub count: u64,
    /// 距窗口重置的剩余时间
    pub reset_in: Duration,
}

/// 固定窗口计数器存储
///
/// 实现必须保证同一个键上的“自增并读取”是原子的。
/// 窗口从该键第一次被计数时开始，窗口结束后计数归零。
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowCount, RateLimitError>;
}

/// 单个命名限流器的规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRule {
    pub window: Duration,
    pub quota: u64,
}

/// 限流判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitDecision {
    pub limit: u64,
    pub remaining: u64,
    pub reset_at: DateTime<Utc>,
    /// 本次请求是否超出配额
    pub reached: bool,
}

/// 限流器注册表
///
/// 进程启动时注册全部命名限流器，之后只读共享
pub struct RateLimiterRegistry {
    store: Arc<dyn CounterStore>,
    key_prefix: String,
    limiters: HashMap<&'static str, LimitRule>,
}

impl RateLimiterRegistry {
    pub fn new(store: Arc<dyn CounterStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
            limiters: HashMap::new(),
        }
    }

    /// 创建并注册 [`DEFAULT_LIMITS`] 中全部限流器
    pub fn with_defaults(store: Arc<dyn CounterStore>, key_prefix: impl Into<String>) -> Self {
        let mut registry = Self::new(store, key_prefix);
        for (name, window, quota) in DEFAULT_LIMITS {
            registry.register(name, *window, *quota);
        }
        registry
    }

    /// 注册命名限流器，同名时覆盖
    pub fn register(&mut self, name: &'static str, window: Duration, quota: u64) {
        self.limiters.insert(name, LimitRule { window, quota });
    }

    pub fn rule(&self, name: &str) -> Option<LimitRule> {
        self.limiters.get(name).copied()
    }

    /// 为主体计数一次并判断是否超出配额
    ///
    /// # 参数
    ///
    /// * `name` - 限流器名称
    /// * `subject_key` - 主体键（用户编号）
    ///
    /// # 返回值
    ///
    /// * `Ok(LimitDecision)` - 计数成功，`reached` 表示是否超限
    /// * `Err(RateLimitError)` - 限流器未注册或存储不可用
    pub async fn check(
        &self,
        name: &str,
        subject_key: &str,
    ) -> Result<LimitDecision, RateLimitError> {
        let rule = self
            .rule(name)
            .ok_or_else(|| RateLimitError::UnknownLimiter(name.to_string()))?;
        let key = format!("{}:{}:{}", self.key_prefix, name, subject_key);
        let counted = self.store.increment(&key, rule.window).await?;

        let reset_in = chrono::Duration::from_std(counted.reset_in)
            .unwrap_or_else(|_| chrono::Duration::zero());

        Ok(LimitDecision {
            limit: rule.quota,
            remaining: rule.quota.saturating_sub(counted.count),
            reset_at: Utc::now() + reset_in,
            reached: counted.count > rule.quota,
        })
    }
}

#[cfg(test)]
#[path = "rate_limiter_test.rs"]
mod tests;
