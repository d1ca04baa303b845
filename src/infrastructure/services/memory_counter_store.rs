// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::services::rate_limiter::{CounterStore, RateLimitError, WindowCount};

/// 超过该数量的键时顺带清理过期窗口
const SWEEP_THRESHOLD: usize = 10_000;

/// 两次清理之间的最短间隔
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u64,
    reset_at: Instant,
}

/// 进程内固定窗口计数器
///
/// 使用 tokio 时钟，测试中可以暂停并推进时间
///
/// 键数超过阈值后，每个清理间隔内最多做一次全表清理；
/// 日窗口在 24 小时内不会过期，清理后键数可能仍高于阈值
#[derive(Debug)]
pub struct MemoryCounterStore {
    windows: DashMap<String, Window>,
    sweep_threshold: usize,
    last_sweep: Mutex<Instant>,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::with_sweep_threshold(SWEEP_THRESHOLD)
    }
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sweep_threshold(sweep_threshold: usize) -> Self {
        Self {
            windows: DashMap::new(),
            sweep_threshold,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// 需要时清理过期窗口，返回本次是否执行了清理
    fn maybe_sweep(&self, now: Instant) -> bool {
        if self.windows.len() <= self.sweep_threshold {
            return false;
        }
        {
            let mut last = self.last_sweep.lock();
            if now.saturating_duration_since(*last) < SWEEP_INTERVAL {
                return false;
            }
            *last = now;
        }
        self.sweep(now);
        true
    }

    fn sweep(&self, now: Instant) {
        self.windows.retain(|_, w| w.reset_at > now);
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str, window: Duration) -> Result<WindowCount, RateLimitError> {
        let now = Instant::now();
        self.maybe_sweep(now);

        // 条目锁保证同一个键上的自增与判断不会交错
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + window,
        });
        if entry.reset_at <= now {
            *entry = Window {
                count: 0,
                reset_at: now + window,
            };
        }
        entry.count += 1;

        Ok(WindowCount {
            count: entry.count,
            reset_in: entry.reset_at.saturating_duration_since(now),
        })
    }
}
