//! 模型定义系统模块
//!
//! 提供声明式的模型结构定义：字段类型、双向转换、实例填充与序列化

pub mod convenience;
pub mod conversion;
pub mod field_types;
pub mod instance;
pub mod macros;
pub mod manager;

// 重新导出核心类型
pub use convenience::*;
pub use conversion::ToDataValue;
pub use field_types::{FieldDefinition, FieldType, ModelSchema, SchemaBuilder};
pub use instance::ModelInstance;
pub use manager::{get_schema, register_schema, schema_names};
