// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::post::Post;
use parking_lot::RwLock;
use std::sync::Arc;

/// 热榜快照
///
/// 读多写少：请求读取当前快照的一个窗口，刷新工作器整体替换快照
#[derive(Debug, Default)]
pub struct HotPosts {
    posts: RwLock<Arc<Vec<Post>>>,
}

impl HotPosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用新的热榜整体替换当前快照
    pub fn replace(&self, posts: Vec<Post>) {
        *self.posts.write() = Arc::new(posts);
    }

    pub fn snapshot(&self) -> Arc<Vec<Post>> {
        self.posts.read().clone()
    }

    /// 第 `page` 页（从 1 开始）的热榜，越界时返回空
    pub fn window(&self, page: u32, page_size: u32) -> Vec<Post> {
        let snapshot = self.snapshot();
        let low = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
        let high = (page as usize)
            .saturating_mul(page_size as usize)
            .min(snapshot.len());
        if page == 0 || low > high {
            return Vec::new();
        }
        snapshot[low..high].to_vec()
    }
}
