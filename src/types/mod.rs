//! 核心类型模块
//!
//! 提供贯穿整个库的通用数据值类型

pub mod data_value;

pub use data_value::{DataValue, json_value_to_data_value};
