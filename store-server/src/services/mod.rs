//! 服务模块

pub mod delivery_area;
