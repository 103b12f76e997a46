use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::instance::ModelInstance;

/// 通用数据值类型 - 同时覆盖原始形态与原生形态
///
/// 原始形态对应字典/JSON文档中出现的值（null、布尔、数值、字符串、
/// 数组、对象）；原生形态是字段转换之后的强类型值（日期时间、日期、
/// 时间、模型实例）。字段转换引擎在两种形态之间双向映射。
#[derive(Clone, PartialEq)]
pub enum DataValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 整数
    Int(i64),
    /// 无符号整数
    UInt(u64),
    /// 浮点数
    Float(f64),
    /// 字符串
    String(String),
    /// 日期时间（固定时区偏移）
    DateTime(DateTime<FixedOffset>),
    /// 日期
    Date(NaiveDate),
    /// 时间
    Time(NaiveTime),
    /// 数组
    Array(Vec<DataValue>),
    /// 对象/文档
    Object(HashMap<String, DataValue>),
    /// 模型实例（嵌套模型字段转换后的原生值）
    Model(Box<ModelInstance>),
}

impl std::fmt::Display for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataValue::Null => write!(f, "null"),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::UInt(u) => write!(f, "{}", u),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::String(s) => write!(f, "{}", s),
            DataValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            DataValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            DataValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            DataValue::Array(_) | DataValue::Object(_) | DataValue::Model(_) => {
                let json_str = serde_json::to_string(&self.to_json_value()).unwrap_or_default();
                write!(f, "{}", json_str)
            }
        }
    }
}

impl std::fmt::Debug for DataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Debug trait 和 Display 保持一致，显示实际值而不是类型构造函数
        write!(f, "{}", self)
    }
}

impl DataValue {
    /// 获取数据类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "boolean",
            DataValue::Int(_) => "integer",
            DataValue::UInt(_) => "unsigned_integer",
            DataValue::Float(_) => "float",
            DataValue::String(_) => "string",
            DataValue::DateTime(_) => "datetime",
            DataValue::Date(_) => "date",
            DataValue::Time(_) => "time",
            DataValue::Array(_) => "array",
            DataValue::Object(_) => "object",
            DataValue::Model(_) => "model",
        }
    }

    /// 判断是否为空值
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// 转换为 JSON 字符串
    pub fn to_json_string(&self) -> Result<String, crate::error::DataMapError> {
        serde_json::to_string(&self.to_json_value()).map_err(|e| {
            crate::map_error!(serialization, format!("DataValue 转换为 JSON 失败: {}", e))
        })
    }

    /// 从 JSON 字符串解析
    pub fn from_json_string(json: &str) -> Result<Self, crate::error::DataMapError> {
        let json_value: serde_json::Value = serde_json::from_str(json).map_err(|e| {
            crate::map_error!(serialization, format!("JSON 解析为 DataValue 失败: {}", e))
        })?;
        Ok(json_value_to_data_value(json_value))
    }

    /// 转换为 JSON 值
    ///
    /// 原生形态的变体（日期时间、日期、时间、模型实例）会退化为可序列化
    /// 的原始形态：时间类输出ISO-8601文本，模型实例输出其序列化字典
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            DataValue::Null => serde_json::Value::Null,
            DataValue::Bool(b) => serde_json::Value::Bool(*b),
            DataValue::Int(i) => serde_json::Value::Number(serde_json::Number::from(*i)),
            DataValue::UInt(u) => serde_json::Value::Number(serde_json::Number::from(*u)),
            DataValue::Float(f) => {
                serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            DataValue::String(s) => serde_json::Value::String(s.clone()),
            DataValue::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            DataValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            DataValue::Time(t) => serde_json::Value::String(t.format("%H:%M:%S%.f").to_string()),
            DataValue::Array(arr) => {
                let json_array: Vec<serde_json::Value> =
                    arr.iter().map(|item| item.to_json_value()).collect();
                serde_json::Value::Array(json_array)
            }
            DataValue::Object(obj) => {
                let json_object: serde_json::Map<String, serde_json::Value> = obj
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect();
                serde_json::Value::Object(json_object)
            }
            DataValue::Model(instance) => {
                let serial_map = instance.to_serial_map().unwrap_or_default();
                let json_object: serde_json::Map<String, serde_json::Value> = serial_map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json_value()))
                    .collect();
                serde_json::Value::Object(json_object)
            }
        }
    }

    /// 从 JSON 值解析
    pub fn from_json_value(value: serde_json::Value) -> Self {
        json_value_to_data_value(value)
    }

    /// 期望Object类型，如果不是则返回错误
    pub fn expect_object(self) -> Result<HashMap<String, DataValue>, crate::error::DataMapError> {
        match self {
            DataValue::Object(map) => Ok(map),
            other => Err(crate::map_error!(
                serialization,
                format!("期望Object类型，但收到: {}", other.type_name())
            )),
        }
    }

    /// 按字符串读取
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// 按整数读取
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            DataValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// 按浮点数读取
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            DataValue::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// 按布尔值读取
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 按日期时间读取
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            DataValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// 按日期读取
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            DataValue::Date(d) => Some(d),
            _ => None,
        }
    }

    /// 按时间读取
    pub fn as_time(&self) -> Option<&NaiveTime> {
        match self {
            DataValue::Time(t) => Some(t),
            _ => None,
        }
    }

    /// 按数组读取
    pub fn as_array(&self) -> Option<&Vec<DataValue>> {
        match self {
            DataValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// 按对象读取
    pub fn as_object(&self) -> Option<&HashMap<String, DataValue>> {
        match self {
            DataValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// 按模型实例读取
    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            DataValue::Model(instance) => Some(instance),
            _ => None,
        }
    }
}

impl Serialize for DataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json_value = serde_json::Value::deserialize(deserializer)?;
        Ok(json_value_to_data_value(json_value))
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        DataValue::Int(value as i64)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Float(value as f64)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::String(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::String(value.to_string())
    }
}

impl From<DateTime<chrono::Utc>> for DataValue {
    fn from(value: DateTime<chrono::Utc>) -> Self {
        DataValue::DateTime(value.with_timezone(&FixedOffset::east(0)))
    }
}

impl From<DateTime<FixedOffset>> for DataValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DataValue::DateTime(value)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        DataValue::Date(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        DataValue::Time(value)
    }
}

impl From<ModelInstance> for DataValue {
    fn from(value: ModelInstance) -> Self {
        DataValue::Model(Box::new(value))
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(value: Vec<DataValue>) -> Self {
        DataValue::Array(value)
    }
}

impl From<HashMap<String, DataValue>> for DataValue {
    fn from(value: HashMap<String, DataValue>) -> Self {
        DataValue::Object(value)
    }
}

impl<T> From<Option<T>> for DataValue
where
    T: Into<DataValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DataValue::Null,
        }
    }
}

/// 将 serde_json::Value 正确转换为对应的 DataValue 类型
///
/// 数组与对象会递归下降，数值按整数/无符号整数/浮点的顺序收窄
pub fn json_value_to_data_value(value: serde_json::Value) -> DataValue {
    match value {
        serde_json::Value::Null => DataValue::Null,
        serde_json::Value::Bool(b) => DataValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                DataValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                DataValue::UInt(u)
            } else if let Some(f) = n.as_f64() {
                DataValue::Float(f)
            } else {
                DataValue::Null
            }
        }
        serde_json::Value::String(s) => DataValue::String(s),
        serde_json::Value::Array(arr) => {
            // 递归转换数组元素为DataValue
            let data_array: Vec<DataValue> =
                arr.into_iter().map(json_value_to_data_value).collect();
            DataValue::Array(data_array)
        }
        serde_json::Value::Object(obj) => {
            // 递归转换对象为HashMap<String, DataValue>
            let data_object: HashMap<String, DataValue> = obj
                .into_iter()
                .map(|(k, v)| (k, json_value_to_data_value(v)))
                .collect();
            DataValue::Object(data_object)
        }
    }
}
