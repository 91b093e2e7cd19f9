use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::get_config;
use crate::storage::{Storage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub api_prefix: String,
    pub health_prefix: String,
}

/// 准备服务器启动的上下文
/// 包括存储后端和路由配置
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let config = get_config();

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let route_config = RouteConfig {
        api_prefix: config.routes.api_prefix.clone(),
        health_prefix: config.routes.health_prefix.clone(),
    };

    info!(
        "API available at: {}, health at: {}",
        route_config.api_prefix, route_config.health_prefix
    );
    debug!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        route_config,
    })
}
