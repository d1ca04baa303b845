// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicI64, Ordering};

/// 一次 shutdown 确认的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStep {
    /// 还需再确认 `n` 次，`n` 为本次确认前的剩余次数
    Remaining(i64),
    /// 倒计时已归零，进程应当立即退出
    Exit,
}

/// 进程级关停闸门
///
/// 所有请求、所有调用者共享同一个倒计时
#[derive(Debug)]
pub struct ShutdownGate {
    countdown: AtomicI64,
}

impl ShutdownGate {
    pub fn new(countdown: i64) -> Self {
        Self {
            countdown: AtomicI64::new(countdown.max(0)),
        }
    }

    /// 确认一次：倒计时大于 0 时原子地减一并返回减之前的值
    pub fn confirm(&self) -> ShutdownStep {
        match self
            .countdown
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n > 0).then(|| n - 1)
            }) {
            Ok(previous) => ShutdownStep::Remaining(previous),
            Err(_) => ShutdownStep::Exit,
        }
    }

    pub fn remaining(&self) -> i64 {
        self.countdown.load(Ordering::Acquire)
    }
}
