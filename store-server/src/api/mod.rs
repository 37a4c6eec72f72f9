//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品管理接口
//! - [`categories`] - 分类接口
//! - [`cart`] - 会话购物车接口
//! - [`orders`] - 订单接口
//! - [`config`] - 管理端配置接口
//! - [`pincode`] - 配送区域检查接口

pub mod cart;
pub mod categories;
pub mod config;
pub mod health;
pub mod orders;
pub mod pincode;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
