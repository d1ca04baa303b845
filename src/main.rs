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

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use treehole::config::settings::Settings;
use treehole::domain::services::rate_limiter::CounterStore;
use treehole::infrastructure::cache::redis_client::RedisClient;
use treehole::infrastructure::database::connection;
use treehole::infrastructure::metrics;
use treehole::infrastructure::services::memory_counter_store::MemoryCounterStore;
use treehole::infrastructure::services::redis_counter_store::RedisCounterStore;
use treehole::presentation::routes::{self, Endpoints};
use treehole::presentation::state::AppState;
use treehole::utils::telemetry;
use treehole::workers::hot_posts_worker::HotPostsWorker;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting treehole...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    metrics::init_metrics(&settings.metrics);

    // 3. Connect to database and run migrations
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    // 4. Counter store for the rate limiters
    let counter_store: Arc<dyn CounterStore> = match settings.rate_limiting.store.as_str() {
        "memory" => {
            info!("Using in-process rate limiter store");
            Arc::new(MemoryCounterStore::new())
        }
        "redis" => {
            let redis_client = RedisClient::new(&settings.redis.url)?;
            redis_client.ping().await?;
            info!("Redis client initialized");
            Arc::new(RedisCounterStore::new(redis_client))
        }
        other => anyhow::bail!("unknown rate_limiting.store `{}`", other),
    };

    // 5. Shared state
    let state = AppState::new(db, settings.clone(), counter_store)?;

    // 6. Start workers
    HotPostsWorker::new(
        state.posts.clone(),
        state.hot_posts.clone(),
        &settings.hot_posts,
    )
    .start();

    // 7. Start HTTP server
    let app = routes::routes(state, Endpoints::default());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
