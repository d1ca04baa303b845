// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::services::rate_limiter::{CounterStore, RateLimitError, WindowCount};
use crate::infrastructure::cache::redis_client::RedisClient;

/// 自增计数；首次计数时设置过期时间，返回 {计数, 剩余毫秒}
const FIXED_WINDOW_SCRIPT: &str = r#"
    local current = redis.call("INCR", KEYS[1])
    local ttl = redis.call("PTTL", KEYS[1])
    if current == 1 or ttl < 0 then
        redis.call("PEXPIRE", KEYS[1], ARGV[1])
        ttl = tonumber(ARGV[1])
    end
    return {current, ttl}
"#;

/// 基于Redis的固定窗口计数器
///
/// 自增、读取剩余时间与设置过期在一个 Lua 脚本中完成，保证原子性
pub struct RedisCounterStore {
    redis: RedisClient,
}

impl RedisCounterStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowCount, RateLimitError> {
        let mut conn = self
            .redis
            .get_connection()
            .await
            .map_err(|e| RateLimitError::LimiterUnavailable(format!("Redis connection failed: {}", e)))?;

        let window_ms = window.as_millis().max(1) as u64;
        let result: Vec<i64> = redis::Script::new(FIXED_WINDOW_SCRIPT)
            .key(key)
            .arg(window_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| RateLimitError::LimiterUnavailable(format!("Redis EVAL failed: {}", e)))?;

        match result.as_slice() {
            [count, ttl] => Ok(WindowCount {
                count: (*count).max(0) as u64,
                reset_in: Duration::from_millis((*ttl).max(0) as u64),
            }),
            other => Err(RateLimitError::LimiterUnavailable(format!(
                "Unexpected script reply: {:?}",
                other
            ))),
        }
    }
}
