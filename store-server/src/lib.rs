//! Store Server - 快送店面后端
//!
//! # 架构概述
//!
//! 本模块是店面后端的主入口，提供以下核心功能：
//!
//! - **目录** (`db`): SQLite 商品/订单/配置存储
//! - **购物车镜像** (`carts`): 按会话的内存购物车
//! - **订单生命周期** (`api/orders`): 结账、状态机、管理端过滤
//! - **配送区域** (`services/delivery_area`): 邮编服务范围检查
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── carts/         # 会话购物车镜像
//! ├── services/      # 配送区域检查
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod carts;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use carts::SessionCarts;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置环境 (dotenv + 日志)
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}
