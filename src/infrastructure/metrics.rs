// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 限流拒绝计数器名称，标签 `limiter` 为限流器名称
pub const RATE_LIMIT_REJECTIONS: &str = "treehole_rate_limit_rejections_total";
/// 管理命令执行计数器名称，标签 `command` 为命令关键字
pub const COMMANDS_EXECUTED: &str = "treehole_commands_executed_total";
/// 举报落库计数器名称，标签 `type` 为举报类型
pub const REPORTS_CREATED: &str = "treehole_reports_created_total";

/// 安装 Prometheus 导出器
///
/// 地址非法或端口被占用时只记录警告，服务照常启动
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics address {}: {}. Metrics exporter not started.",
                settings.listen_addr, e
            );
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(
        RATE_LIMIT_REJECTIONS,
        "Total number of requests rejected by a named rate limiter"
    );
    describe_counter!(
        COMMANDS_EXECUTED,
        "Total number of admin commands intercepted on the search endpoint"
    );
    describe_counter!(REPORTS_CREATED, "Total number of reports persisted");

    info!("Metrics exporter listening on {}", addr);
}
