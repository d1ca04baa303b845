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

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、Redis、服务器、限流、内容限制以及树洞业务开关等所有配置项。
/// 业务开关（`allow_unregistered_access`、`contact_email` 等）保持顶层键名，
/// 与既有部署的配置文件兼容。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// Redis配置
    pub redis: RedisSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 内容长度与分页限制
    pub limits: ContentLimits,
    /// 热榜配置
    pub hot_posts: HotPostsSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 是否允许未登录用户访问只读接口
    pub allow_unregistered_access: bool,
    /// 账户冻结时提示的联系邮箱
    pub contact_email: String,
    /// 不允许举报的树洞编号
    pub disallow_report_pids: Vec<i32>,
    /// 允许的折叠标签
    pub fold_tags: Vec<String>,
    /// 免登录访问的网段（CIDR）
    pub allowed_subnets: Vec<String>,
    /// shutdown 命令需要的确认次数
    pub shutdown_countdown: i64,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// Redis配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 速率限制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 计数器存储 (redis, memory)
    pub store: String,
    /// 计数器键前缀
    pub key_prefix: String,
}

/// 内容与分页限制
#[derive(Debug, Clone, Deserialize)]
pub struct ContentLimits {
    /// 树洞正文最大字数（按 Unicode 码点计）
    pub post_max_length: usize,
    /// 图片最大字节数（解码后）
    pub img_max_length: usize,
    /// base64 编码膨胀率
    pub base64_rate: f64,
    /// 举报理由最大字节数
    pub report_max_length: usize,
    /// 搜索接口最大页码
    pub search_max_page: u32,
    /// 单页最大条数
    pub max_page_size: u32,
}

/// 热榜配置
#[derive(Debug, Clone, Deserialize)]
pub struct HotPostsSettings {
    /// 刷新间隔（秒）
    pub refresh_interval_secs: u64,
    /// 统计的时间窗口（小时）
    pub window_hours: i64,
    /// 热榜最多保留的树洞数
    pub capacity: u64,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `TREEHOLE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("TREEHOLE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("disallow_report_pids")
                    .with_list_parse_key("fold_tags")
                    .with_list_parse_key("allowed_subnets")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 仅由默认值构成的配置，不读取文件与环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults()?.build()?.try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "postgres://localhost/treehole")?
            .set_default("database.max_connections", 100)?
            .set_default("database.min_connections", 10)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            // Default Rate Limiting settings
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.store", "redis")?
            .set_default("rate_limiting.key_prefix", "treehole:limiter")?
            // Default content limits
            .set_default("limits.post_max_length", 10000)?
            .set_default("limits.img_max_length", 1_000_000)?
            .set_default("limits.base64_rate", 1.33)?
            .set_default("limits.report_max_length", 1000)?
            .set_default("limits.search_max_page", 100)?
            .set_default("limits.max_page_size", 50)?
            .set_default("hot_posts.refresh_interval_secs", 300)?
            .set_default("hot_posts.window_hours", 24)?
            .set_default("hot_posts.capacity", 200)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("allow_unregistered_access", false)?
            .set_default("contact_email", "admin@example.com")?
            .set_default("disallow_report_pids", Vec::<i64>::new())?
            .set_default("fold_tags", Vec::<String>::new())?
            .set_default("allowed_subnets", Vec::<String>::new())?
            .set_default("shutdown_countdown", 2)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
