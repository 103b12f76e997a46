//! rat_datamap - 声明式数据映射库
//!
//! 将弱类型的字典/JSON输入转换为强类型的模型实例，并支持反向序列化。
//! 模型结构声明一次、全部实例共享；属性赋值始终经过所属字段的转换
//! 逻辑，动态追加的字段同样参与序列化

// 导出所有公共模块
pub mod error;
pub mod i18n;
pub mod model;
pub mod types;
pub mod utils;

// 重新导出常用类型和函数
pub use error::{DataMapError, DataMapResult};
pub use types::*;
pub use model::{
    FieldDefinition, FieldType, ModelInstance, ModelSchema, SchemaBuilder, ToDataValue,
    boolean_field, date_field, datetime_field, field_collection_field, float_field,
    get_schema, integer_field, model_collection_field, model_field, register_schema,
    schema_names, string_field, time_field,
};
pub use utils::iso8601::{parse_date, parse_time, parse_timestamp};

/// 宏内部使用的重导出，外部代码不应直接依赖
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}

// 条件编译调试宏 - 只有在 debug 模式下才输出调试信息
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        rat_logger::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        // 在 release 模式下不输出调试信息
    };
}

/// 初始化rat_datamap库
///
/// 这个函数会初始化rat_datamap库，包括多语言错误消息系统
///
/// 注意：日志系统由调用者自行初始化，本库不再自动初始化日志
pub fn init() {
    // 初始化多语言错误消息系统
    i18n::ErrorMessageI18n::init();

    // 库的基本初始化逻辑
    // 日志系统由调用者负责初始化
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
