//! 字段双向转换实现
//!
//! 每个字段类型变体对应一套确定的转换语义：`to_native` 将字典中的
//! 原始值转换为强类型原生值，`to_serial` 是其文档化的逆向操作，
//! 把当前原生值还原为可序列化的原始值。两个方向都是纯函数

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DataMapResult;
use crate::map_error;
use crate::model::field_types::{FieldDefinition, FieldType};
use crate::model::instance::ModelInstance;
use crate::types::DataValue;
use crate::utils::iso8601;

impl FieldDefinition {
    /// 将原始值转换为原生值
    ///
    /// 空值的缺省语义：字符串 -> 空串，整数 -> 0，浮点 -> 0.0，
    /// 布尔 -> false，日期时间类 -> 保持空值，嵌套模型 -> 空字典构造，
    /// 集合类 -> 空序列
    pub fn to_native(&self, value: &DataValue, field_name: &str) -> DataMapResult<DataValue> {
        match &self.field_type {
            FieldType::String => Ok(string_to_native(value)),
            FieldType::Integer => integer_to_native(value, field_name),
            FieldType::Float => float_to_native(value, field_name),
            FieldType::Boolean => Ok(boolean_to_native(value)),
            FieldType::DateTime { format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::String(s) => {
                    let dt = parse_instant(s, format.as_deref(), field_name)?;
                    Ok(DataValue::DateTime(dt))
                }
                other => Err(type_mismatch(field_name, other, "日期时间文本")),
            },
            FieldType::Date { format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::String(s) => {
                    let dt = parse_instant(s, format.as_deref(), field_name)?;
                    Ok(DataValue::Date(dt.date_naive()))
                }
                other => Err(type_mismatch(field_name, other, "日期文本")),
            },
            FieldType::Time { format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::String(s) => {
                    let dt = match format {
                        Some(fmt) => parse_with_format(s, fmt, field_name)?,
                        None => iso8601::parse_time(s)?,
                    };
                    Ok(DataValue::Time(dt.time()))
                }
                other => Err(type_mismatch(field_name, other, "时间文本")),
            },
            FieldType::Model { schema } => match value {
                // 空值按空字典处理，递归构造出各字段均未设置的嵌套实例
                DataValue::Null => Ok(DataValue::Model(Box::new(ModelInstance::from_data_map(
                    schema.clone(),
                    HashMap::new(),
                )?))),
                DataValue::Object(map) => Ok(DataValue::Model(Box::new(
                    ModelInstance::from_data_map(schema.clone(), map.clone())?,
                ))),
                other => Err(type_mismatch(field_name, other, "对象")),
            },
            FieldType::ModelCollection { schema } => match value {
                DataValue::Null => Ok(DataValue::Array(Vec::new())),
                DataValue::Array(items) => {
                    let mut instances = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            DataValue::Object(map) => {
                                let instance =
                                    ModelInstance::from_data_map(schema.clone(), map.clone())?;
                                instances.push(DataValue::Model(Box::new(instance)));
                            }
                            other => {
                                return Err(type_mismatch(field_name, other, "对象元素"));
                            }
                        }
                    }
                    Ok(DataValue::Array(instances))
                }
                other => Err(type_mismatch(field_name, other, "对象数组")),
            },
            FieldType::FieldCollection { item } => match value {
                DataValue::Null => Ok(DataValue::Array(Vec::new())),
                DataValue::Array(items) => {
                    let converted = items
                        .iter()
                        .map(|element| item.to_native(element, field_name))
                        .collect::<DataMapResult<Vec<_>>>()?;
                    Ok(DataValue::Array(converted))
                }
                other => Err(type_mismatch(field_name, other, "数组")),
            },
        }
    }

    /// 将原生值还原为可序列化的原始值
    ///
    /// 标量字段的原生值本身即可序列化，原样返回；日期时间类输出
    /// `serial_format` 指定的文本或ISO-8601文本；嵌套模型与集合递归展开。
    /// 传入不属于该字段原生值域的值会返回转换错误
    pub fn to_serial(&self, value: &DataValue, field_name: &str) -> DataMapResult<DataValue> {
        match &self.field_type {
            FieldType::String | FieldType::Integer | FieldType::Float | FieldType::Boolean => {
                Ok(value.clone())
            }
            FieldType::DateTime { serial_format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::DateTime(dt) => Ok(DataValue::String(match serial_format {
                    Some(fmt) => dt.format(fmt).to_string(),
                    None => dt.to_rfc3339(),
                })),
                other => Err(serial_mismatch(field_name, other, "日期时间")),
            },
            FieldType::Date { serial_format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::Date(d) => Ok(DataValue::String(match serial_format {
                    Some(fmt) => d.format(fmt).to_string(),
                    None => d.format("%Y-%m-%d").to_string(),
                })),
                other => Err(serial_mismatch(field_name, other, "日期")),
            },
            FieldType::Time { serial_format, .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::Time(t) => Ok(DataValue::String(match serial_format {
                    Some(fmt) => t.format(fmt).to_string(),
                    None => t.format("%H:%M:%S%.f").to_string(),
                })),
                other => Err(serial_mismatch(field_name, other, "时间")),
            },
            FieldType::Model { .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::Model(instance) => Ok(DataValue::Object(instance.to_serial_map()?)),
                other => Err(serial_mismatch(field_name, other, "模型实例")),
            },
            FieldType::ModelCollection { .. } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::Array(items) => {
                    let mut serialized = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            DataValue::Model(instance) => {
                                serialized.push(DataValue::Object(instance.to_serial_map()?));
                            }
                            other => {
                                return Err(serial_mismatch(field_name, other, "模型实例元素"));
                            }
                        }
                    }
                    Ok(DataValue::Array(serialized))
                }
                other => Err(serial_mismatch(field_name, other, "模型实例数组")),
            },
            FieldType::FieldCollection { item } => match value {
                DataValue::Null => Ok(DataValue::Null),
                DataValue::Array(items) => {
                    let serialized = items
                        .iter()
                        .map(|element| item.to_serial(element, field_name))
                        .collect::<DataMapResult<Vec<_>>>()?;
                    Ok(DataValue::Array(serialized))
                }
                other => Err(serial_mismatch(field_name, other, "数组")),
            },
        }
    }
}

fn type_mismatch(
    field_name: &str,
    value: &DataValue,
    expected: &str,
) -> crate::error::DataMapError {
    map_error!(
        conversion,
        field_name,
        format!("期望{}，但收到: {}", expected, value.type_name())
    )
}

fn serial_mismatch(
    field_name: &str,
    value: &DataValue,
    expected: &str,
) -> crate::error::DataMapError {
    map_error!(
        conversion,
        field_name,
        format!("无法序列化，期望{}原生值，但收到: {}", expected, value.type_name())
    )
}

fn string_to_native(value: &DataValue) -> DataValue {
    match value {
        DataValue::Null => DataValue::String(String::new()),
        DataValue::String(s) => DataValue::String(s.clone()),
        // 其他原始值取其文本形式
        other => DataValue::String(other.to_string()),
    }
}

fn integer_to_native(value: &DataValue, field_name: &str) -> DataMapResult<DataValue> {
    let converted = match value {
        DataValue::Null => 0,
        DataValue::Int(i) => *i,
        DataValue::UInt(u) => i64::try_from(*u).map_err(|_| {
            map_error!(conversion, field_name, format!("整数值超出可表示范围: {}", u))
        })?,
        // 浮点数向零截断
        DataValue::Float(f) => f.trunc() as i64,
        DataValue::Bool(b) => i64::from(*b),
        DataValue::String(s) => s.trim().parse::<i64>().map_err(|_| {
            map_error!(conversion, field_name, format!("无法将 '{}' 解析为整数", s))
        })?,
        other => return Err(type_mismatch(field_name, other, "整数")),
    };
    Ok(DataValue::Int(converted))
}

fn float_to_native(value: &DataValue, field_name: &str) -> DataMapResult<DataValue> {
    let converted = match value {
        DataValue::Null => 0.0,
        DataValue::Float(f) => *f,
        DataValue::Int(i) => *i as f64,
        DataValue::UInt(u) => *u as f64,
        DataValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        DataValue::String(s) => s.trim().parse::<f64>().map_err(|_| {
            map_error!(conversion, field_name, format!("无法将 '{}' 解析为浮点数", s))
        })?,
        other => return Err(type_mismatch(field_name, other, "浮点数")),
    };
    Ok(DataValue::Float(converted))
}

fn boolean_to_native(value: &DataValue) -> DataValue {
    let converted = match value {
        DataValue::Null => false,
        // 字符串去除首尾空白后与 "true" 做大小写无关比较
        DataValue::String(s) => s.trim().eq_ignore_ascii_case("true"),
        DataValue::Bool(b) => *b,
        DataValue::Int(i) => *i > 0,
        DataValue::UInt(u) => *u > 0,
        DataValue::Float(f) => *f > 0.0,
        DataValue::Array(items) => !items.is_empty(),
        DataValue::Object(map) => !map.is_empty(),
        _ => true,
    };
    DataValue::Bool(converted)
}

/// 解析日期时间文本
///
/// 声明了格式串时严格按格式解析，否则交给ISO-8601解析器，
/// 文本自带的固定时区偏移被保留
fn parse_instant(
    text: &str,
    format: Option<&str>,
    field_name: &str,
) -> DataMapResult<DateTime<FixedOffset>> {
    match format {
        Some(fmt) => parse_with_format(text, fmt, field_name),
        None => iso8601::parse_timestamp(text),
    }
}

/// 按格式串解析日期时间文本
///
/// 格式串可能只覆盖日期、时间或两者，按带时区日期时间、无时区
/// 日期时间、纯日期、纯时间的顺序尝试，缺失的分量分别补午夜与纪元日；
/// 不含时区的文本按UTC处理
fn parse_with_format(
    text: &str,
    format: &str,
    field_name: &str,
) -> DataMapResult<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_str(text, format) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
        return Ok(naive_to_utc(naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, format) {
        return Ok(naive_to_utc(date.and_time(NaiveTime::MIN)));
    }
    if let Ok(time) = NaiveTime::parse_from_str(text, format) {
        return Ok(naive_to_utc(NaiveDate::default().and_time(time)));
    }

    Err(map_error!(
        conversion,
        field_name,
        format!("时间文本 '{}' 不符合格式 '{}'", text, format)
    ))
}

fn naive_to_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::from_naive_utc_and_offset(naive, FixedOffset::east(0))
}
