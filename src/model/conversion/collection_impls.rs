//! 集合类型的 ToDataValue 实现
//!
//! 为 Vec、HashMap 等集合类型实现 ToDataValue

use std::collections::HashMap;

use crate::model::conversion::ToDataValue;
use crate::types::DataValue;

// Vec 实现：逐元素转换为DataValue::Array
impl<T> ToDataValue for Vec<T>
where
    T: ToDataValue,
{
    fn to_data_value(&self) -> DataValue {
        let data_values: Vec<DataValue> = self.iter().map(|item| item.to_data_value()).collect();
        DataValue::Array(data_values)
    }
}

// 切片实现
impl<T> ToDataValue for &[T]
where
    T: ToDataValue,
{
    fn to_data_value(&self) -> DataValue {
        let data_values: Vec<DataValue> = self.iter().map(|item| item.to_data_value()).collect();
        DataValue::Array(data_values)
    }
}

// HashMap<String, DataValue> 实现
impl ToDataValue for HashMap<String, DataValue> {
    fn to_data_value(&self) -> DataValue {
        // 将字典转换为DataValue::Object
        DataValue::Object(self.clone())
    }
}
