// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::settings::HotPostsSettings;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::hot_posts::HotPosts;

/// 热榜刷新工作器
///
/// 定期从数据库重新计算热榜并整体替换快照
pub struct HotPostsWorker {
    posts: Arc<dyn PostRepository>,
    hot_posts: Arc<HotPosts>,
    interval: Duration,
    window_seconds: i64,
    capacity: u64,
}

impl HotPostsWorker {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        hot_posts: Arc<HotPosts>,
        settings: &HotPostsSettings,
    ) -> Self {
        Self {
            posts,
            hot_posts,
            interval: Duration::from_secs(settings.refresh_interval_secs.max(1)),
            window_seconds: settings.window_hours * 60 * 60,
            capacity: settings.capacity,
        }
    }

    /// 运行工作器，第一次刷新立即执行
    pub async fn run(&self) {
        info!("Hot posts worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.refresh().await {
                Ok(count) => debug!("Hot posts refreshed with {} posts", count),
                Err(e) => error!("Failed to refresh hot posts: {}", e),
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 刷新一次热榜，失败时保留旧快照
    pub async fn refresh(&self) -> Result<usize, RepositoryError> {
        let since = Utc::now().timestamp() - self.window_seconds;
        let posts = self.posts.hot_posts(since, self.capacity).await?;
        let count = posts.len();
        self.hot_posts.replace(posts);
        Ok(count)
    }
}

#[cfg(test)]
#[path = "hot_posts_worker_test.rs"]
mod tests;
