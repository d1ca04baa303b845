// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use ipnet::IpNet;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::settings::Settings;
use crate::domain::repositories::attention_repository::AttentionRepository;
use crate::domain::repositories::ban_repository::BanRepository;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::repositories::report_repository::ReportRepository;
use crate::domain::repositories::system_message_repository::SystemMessageRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::hot_posts::HotPosts;
use crate::domain::services::rate_limiter::{CounterStore, RateLimiterRegistry};
use crate::domain::services::report_service::ReportService;
use crate::domain::services::shutdown_gate::ShutdownGate;
use crate::infrastructure::repositories::attention_repo_impl::AttentionRepositoryImpl;
use crate::infrastructure::repositories::ban_repo_impl::BanRepositoryImpl;
use crate::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use crate::infrastructure::repositories::report_repo_impl::ReportRepositoryImpl;
use crate::infrastructure::repositories::system_message_repo_impl::SystemMessageRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::utils::network;

/// shutdown 倒计时归零时调用
pub type ExitHook = Arc<dyn Fn() + Send + Sync>;

/// 所有阶段共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub reports: Arc<dyn ReportRepository>,
    pub system_messages: Arc<dyn SystemMessageRepository>,
    pub bans: Arc<dyn BanRepository>,
    pub attentions: Arc<dyn AttentionRepository>,
    pub limiters: Arc<RateLimiterRegistry>,
    pub report_service: Arc<ReportService>,
    pub hot_posts: Arc<HotPosts>,
    pub shutdown: Arc<ShutdownGate>,
    pub exit_hook: ExitHook,
    pub allowed_subnets: Arc<Vec<IpNet>>,
}

impl AppState {
    /// 基于数据库连接与计数器存储构造状态
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    /// * `settings` - 配置
    /// * `counter_store` - 限流计数器存储
    ///
    /// # 返回值
    ///
    /// * `Ok(AppState)` - 应用状态
    /// * `Err(anyhow::Error)` - `allowed_subnets` 中有无法解析的网段
    pub fn new(
        db: Arc<DatabaseConnection>,
        settings: Arc<Settings>,
        counter_store: Arc<dyn CounterStore>,
    ) -> anyhow::Result<Self> {
        let allowed_subnets = network::parse_subnets(&settings.allowed_subnets)
            .context("invalid entry in allowed_subnets")?;

        let posts: Arc<dyn PostRepository> = Arc::new(PostRepositoryImpl::new(db.clone()));
        let reports: Arc<dyn ReportRepository> = Arc::new(ReportRepositoryImpl::new(db.clone()));
        let report_service = Arc::new(ReportService::new(
            posts.clone(),
            reports.clone(),
            settings.fold_tags.clone(),
        ));
        let limiters = Arc::new(RateLimiterRegistry::with_defaults(
            counter_store,
            settings.rate_limiting.key_prefix.clone(),
        ));

        Ok(Self {
            users: Arc::new(UserRepositoryImpl::new(db.clone())),
            system_messages: Arc::new(SystemMessageRepositoryImpl::new(db.clone())),
            bans: Arc::new(BanRepositoryImpl::new(db.clone())),
            attentions: Arc::new(AttentionRepositoryImpl::new(db)),
            posts,
            reports,
            limiters,
            report_service,
            hot_posts: Arc::new(HotPosts::new()),
            shutdown: Arc::new(ShutdownGate::new(settings.shutdown_countdown)),
            exit_hook: Arc::new(|| std::process::exit(0)),
            allowed_subnets: Arc::new(allowed_subnets),
            settings,
        })
    }

    /// 替换 shutdown 归零时的退出动作
    pub fn with_exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }
}
