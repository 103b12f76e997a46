//! 模型相关的宏定义
//!
//! 提供便捷的宏来声明模型结构和字段类型

/// 便捷宏：构造字段类型
#[macro_export]
macro_rules! field_type {
    (string) => {
        $crate::model::field_types::FieldType::String
    };
    (integer) => {
        $crate::model::field_types::FieldType::Integer
    };
    (float) => {
        $crate::model::field_types::FieldType::Float
    };
    (boolean) => {
        $crate::model::field_types::FieldType::Boolean
    };
    (datetime) => {
        $crate::model::field_types::FieldType::DateTime {
            format: None,
            serial_format: None,
        }
    };
    (datetime, format = $format:expr) => {
        $crate::model::field_types::FieldType::DateTime {
            format: Some($format.to_string()),
            serial_format: None,
        }
    };
    (datetime, format = $format:expr, serial_format = $serial:expr) => {
        $crate::model::field_types::FieldType::DateTime {
            format: Some($format.to_string()),
            serial_format: Some($serial.to_string()),
        }
    };
    (date) => {
        $crate::model::field_types::FieldType::Date {
            format: None,
            serial_format: None,
        }
    };
    (date, format = $format:expr) => {
        $crate::model::field_types::FieldType::Date {
            format: Some($format.to_string()),
            serial_format: None,
        }
    };
    (date, format = $format:expr, serial_format = $serial:expr) => {
        $crate::model::field_types::FieldType::Date {
            format: Some($format.to_string()),
            serial_format: Some($serial.to_string()),
        }
    };
    (time) => {
        $crate::model::field_types::FieldType::Time {
            format: None,
            serial_format: None,
        }
    };
    (time, format = $format:expr) => {
        $crate::model::field_types::FieldType::Time {
            format: Some($format.to_string()),
            serial_format: None,
        }
    };
    (time, format = $format:expr, serial_format = $serial:expr) => {
        $crate::model::field_types::FieldType::Time {
            format: Some($format.to_string()),
            serial_format: Some($serial.to_string()),
        }
    };
    (model, $schema:expr) => {
        $crate::model::field_types::FieldType::Model { schema: $schema }
    };
    (model_list, $schema:expr) => {
        $crate::model::field_types::FieldType::ModelCollection { schema: $schema }
    };
    (list, $item:expr) => {
        $crate::model::field_types::FieldType::FieldCollection {
            item: Box::new($item),
        }
    };
}

/// 便捷宏：声明模型结构
///
/// 生成一个惰性初始化的共享结构描述，首次访问时自动注册到
/// 全局注册表
///
/// # 示例
/// ```ignore
/// define_schema! {
///     /// 人员
///     pub static PERSON_SCHEMA => "person" {
///         name: string_field(),
///         age: integer_field(),
///     }
/// }
/// ```
#[macro_export]
macro_rules! define_schema {
    (
        $(#[$meta:meta])*
        $vis:vis static $ident:ident => $name:literal {
            $(
                $field:ident: $definition:expr,
            )*
        }
    ) => {
        $(#[$meta])*
        $vis static $ident: $crate::__private::Lazy<
            std::sync::Arc<$crate::model::field_types::ModelSchema>,
        > = $crate::__private::Lazy::new(|| {
            let schema = $crate::model::field_types::ModelSchema::builder($name)
                $(
                    .field(stringify!($field), $definition)
                )*
                .build();

            // 自动注册模型结构（仅在首次访问时注册）
            if let Err(e) = $crate::model::manager::register_schema(schema.clone()) {
                panic!("模型注册失败: {}", e);
            }

            schema
        });
    };
}
