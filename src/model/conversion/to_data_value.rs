//! ToDataValue trait 定义
//!
//! 定义了将各种类型转换为 DataValue 的统一接口

use crate::types::DataValue;

/// 支持直接转换为 DataValue 的 trait
///
/// 模型实例的赋值入口统一接收实现了该trait的值，调用方可以直接
/// 传入Rust原生类型而无需手工包装
pub trait ToDataValue {
    fn to_data_value(&self) -> DataValue;
}
