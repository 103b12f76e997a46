//! 错误类型定义模块
//!
//! 定义数据映射过程中的统一错误类型和便捷构造宏

use thiserror::Error;

/// 数据映射库的统一错误类型
#[derive(Error, Debug)]
pub enum DataMapError {
    /// 字段转换错误 - 原始值无法转换为字段声明的原生类型
    #[error("字段转换失败: {field} - {message}")]
    ConversionError {
        field: String,
        message: String,
    },

    /// 字段赋值错误 - 赋给类型化属性的值既不是合法的原始输入也不是合法的原生值
    #[error("字段赋值类型错误: {field} - 值类型 '{value_type}' 与字段类型 '{field_type}' 不兼容")]
    AssignmentError {
        field: String,
        value_type: String,
        field_type: String,
    },

    /// 时间戳解析错误 - ISO-8601 子解析器无法识别输入文本
    #[error("时间戳解析失败: {message}")]
    ParseError {
        message: String,
    },

    /// 序列化错误
    #[error("数据序列化失败: {message}")]
    SerializationError {
        message: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    ConfigError {
        message: String,
    },
}

/// 数据映射库的统一结果类型
pub type DataMapResult<T> = Result<T, DataMapError>;

impl From<serde_json::Error> for DataMapError {
    fn from(err: serde_json::Error) -> Self {
        DataMapError::SerializationError {
            message: err.to_string(),
        }
    }
}

/// 便捷宏：快速构造错误
///
/// # 示例
/// ```ignore
/// return Err(map_error!(conversion, "age", "无法解析为整数"));
/// return Err(map_error!(parse, format!("无法识别的时间戳: '{}'", text)));
/// ```
#[macro_export]
macro_rules! map_error {
    (conversion, $field:expr, $message:expr) => {
        $crate::error::DataMapError::ConversionError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
    (assignment, $field:expr, $value_type:expr, $field_type:expr) => {
        $crate::error::DataMapError::AssignmentError {
            field: $field.to_string(),
            value_type: $value_type.to_string(),
            field_type: $field_type.to_string(),
        }
    };
    (parse, $message:expr) => {
        $crate::error::DataMapError::ParseError {
            message: $message.to_string(),
        }
    };
    (serialization, $message:expr) => {
        $crate::error::DataMapError::SerializationError {
            message: $message.to_string(),
        }
    };
    (config, $message:expr) => {
        $crate::error::DataMapError::ConfigError {
            message: $message.to_string(),
        }
    };
}
