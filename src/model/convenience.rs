//! 模型便捷函数模块
//!
//! 提供创建各种字段类型的便捷函数

use std::sync::Arc;

use crate::model::field_types::{FieldDefinition, FieldType, ModelSchema};

/// 便捷函数：创建字符串字段
pub fn string_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::String)
}

/// 便捷函数：创建整数字段
pub fn integer_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Integer)
}

/// 便捷函数：创建浮点数字段
pub fn float_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Float)
}

/// 便捷函数：创建布尔字段
pub fn boolean_field() -> FieldDefinition {
    FieldDefinition::new(FieldType::Boolean)
}

/// 便捷函数：创建日期时间字段
///
/// `format` 指定解析格式，缺省时走ISO-8601解析；
/// `serial_format` 指定序列化格式，缺省时输出ISO-8601文本
pub fn datetime_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::DateTime {
        format: format.map(|f| f.to_string()),
        serial_format: serial_format.map(|f| f.to_string()),
    })
}

/// 便捷函数：创建日期字段
pub fn date_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Date {
        format: format.map(|f| f.to_string()),
        serial_format: serial_format.map(|f| f.to_string()),
    })
}

/// 便捷函数：创建时间字段
pub fn time_field(format: Option<&str>, serial_format: Option<&str>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Time {
        format: format.map(|f| f.to_string()),
        serial_format: serial_format.map(|f| f.to_string()),
    })
}

/// 便捷函数：创建嵌套模型字段
pub fn model_field(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::Model { schema })
}

/// 便捷函数：创建嵌套模型集合字段
pub fn model_collection_field(schema: Arc<ModelSchema>) -> FieldDefinition {
    FieldDefinition::new(FieldType::ModelCollection { schema })
}

/// 便捷函数：创建字段集合字段
///
/// 元素字段声明一次，转换时逐元素套用
pub fn field_collection_field(item: FieldDefinition) -> FieldDefinition {
    FieldDefinition::new(FieldType::FieldCollection {
        item: Box::new(item),
    })
}
