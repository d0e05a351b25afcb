//! 服务层模块

pub mod documentation;
