use std::sync::Arc;

use sqlx::SqlitePool;

use crate::carts::SessionCarts;
use crate::core::Config;
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是店面后端的核心数据结构。
/// 使用 Arc / 连接池实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | carts | Arc<SessionCarts> | 会话购物车镜像 (内存态) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 会话购物车镜像
    pub carts: Arc<SessionCarts>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试常用)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            config,
            pool,
            carts: Arc::new(SessionCarts::new()),
        }
    }

    /// 初始化服务器状态：打开数据库、跑迁移、播种示例数据
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.db_path()).await?;
        crate::db::seed::seed_if_empty(&db.pool).await?;
        Ok(Self::new(config.clone(), db.pool))
    }
}
