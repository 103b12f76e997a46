//! 模型实例模块
//!
//! 一个模型实例持有共享的结构描述、当前各字段的原生值，以及本实例
//! 私有的动态追加字段。从字典构造、后续属性赋值、序列化全部经过
//! 所属字段的转换逻辑

use std::collections::HashMap;
use std::sync::Arc;

use rat_logger::debug;

use crate::error::{DataMapError, DataMapResult};
use crate::map_error;
use crate::model::conversion::ToDataValue;
use crate::model::field_types::{FieldDefinition, ModelSchema};
use crate::types::DataValue;

/// 模型实例
///
/// 结构描述以 `Arc` 共享、只读；字段值与动态字段归本实例私有。
/// 未赋值的字段处于"未设置"状态，序列化时整体跳过而不是输出空值
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    schema: Arc<ModelSchema>,
    values: HashMap<String, DataValue>,
    extras: Vec<(String, FieldDefinition)>,
}

impl ModelInstance {
    /// 创建空实例，所有字段均未设置
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            extras: Vec::new(),
        }
    }

    /// 从数据映射构造实例
    ///
    /// 按结构描述的声明顺序逐字段取值：取值键为字段的 `source`，
    /// 缺省时用字段名；字典中不存在该键的字段保持未设置状态。
    /// 取到的原始值走标准赋值路径完成转换
    pub fn from_data_map(
        schema: Arc<ModelSchema>,
        data: HashMap<String, DataValue>,
    ) -> DataMapResult<Self> {
        let mut instance = Self::new(schema.clone());
        for (name, definition) in schema.fields() {
            let key = definition.source.as_deref().unwrap_or(name);
            if let Some(raw) = data.get(key) {
                instance.set(name, raw.clone())?;
            }
        }
        Ok(instance)
    }

    /// 从JSON文本构造实例
    ///
    /// 文本先经外部JSON解码器转为数据映射，其余与 `from_data_map` 相同
    pub fn from_json(schema: Arc<ModelSchema>, text: &str) -> DataMapResult<Self> {
        let decoded = DataValue::from_json_string(text)?;
        let map = decoded.expect_object()?;
        Self::from_data_map(schema, map)
    }

    /// 从键值对构造实例
    ///
    /// 只处理提供的键；值可以是原始形态也可以是已经转换好的原生形态，
    /// 由赋值路径自行甄别
    pub fn from_kwargs<I, K, V>(schema: Arc<ModelSchema>, pairs: I) -> DataMapResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToDataValue,
    {
        let mut instance = Self::new(schema);
        for (name, value) in pairs {
            instance.set(name.as_ref(), value)?;
        }
        Ok(instance)
    }

    /// 结构描述
    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// 设置属性值
    ///
    /// 名称命中有效字段集时执行两步转换：先按原始值转换，失败后改用
    /// 序列化方向做校验探测，探测通过说明传入的已经是原生值，原样
    /// 存储；两步都失败则报告赋值类型错误。嵌套模型自身构造失败的
    /// 错误不参与探测，原样向外传递。
    ///
    /// 名称未命中任何字段时按普通无类型属性存储，不参与序列化
    pub fn set<V: ToDataValue>(&mut self, name: &str, value: V) -> DataMapResult<()> {
        let value = value.to_data_value();
        let Some(definition) = self.field_definition(name).cloned() else {
            self.values.insert(name.to_string(), value);
            return Ok(());
        };

        match definition.to_native(&value, name) {
            Ok(native) => {
                self.values.insert(name.to_string(), native);
            }
            // 嵌套模型构造期间的赋值失败，原样传递给外层调用方
            Err(err @ DataMapError::AssignmentError { .. }) => return Err(err),
            Err(conversion_err) => {
                debug!(
                    "字段 {} 原始值转换失败，改用原生值探测: {}",
                    name, conversion_err
                );
                if definition.to_serial(&value, name).is_err() {
                    return Err(map_error!(
                        assignment,
                        name,
                        value.type_name(),
                        definition.field_type.type_name()
                    ));
                }
                // 探测通过，传入的值已是原生形态
                self.values.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// 读取属性值
    ///
    /// 字段返回当前原生值，无类型属性原样返回；未设置的名称返回None
    pub fn get(&self, name: &str) -> Option<&DataValue> {
        self.values.get(name)
    }

    /// 判断属性是否已设置
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// 注册实例私有的动态字段并赋值
    ///
    /// 字段定义只进入本实例的私有字段表，同类型的其他实例不受影响；
    /// 与类型字段同名时以动态字段为准。注册后立即执行标准赋值
    pub fn add_field<V: ToDataValue>(
        &mut self,
        name: &str,
        value: V,
        definition: FieldDefinition,
    ) -> DataMapResult<()> {
        self.extras.retain(|(existing, _)| existing != name);
        self.extras.push((name.to_string(), definition));
        self.set(name, value)
    }

    /// 查找名称在有效字段集中的定义，动态字段优先
    pub fn field_definition(&self, name: &str) -> Option<&FieldDefinition> {
        self.extras
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, definition)| definition)
            .or_else(|| self.schema.field(name))
    }

    /// 有效字段集：类型结构描述与实例动态字段的并集
    ///
    /// 迭代顺序为结构描述声明顺序在前、动态字段注册顺序在后；
    /// 同名时条目取动态字段的定义
    fn effective_fields(&self) -> Vec<(&str, &FieldDefinition)> {
        let mut entries: Vec<(&str, &FieldDefinition)> = Vec::new();
        for (name, definition) in self.schema.fields() {
            let effective = self
                .extras
                .iter()
                .find(|(extra_name, _)| extra_name == name)
                .map(|(_, extra_def)| extra_def)
                .unwrap_or(definition);
            entries.push((name, effective));
        }
        for (name, definition) in &self.extras {
            if self.schema.field(name).is_none() {
                entries.push((name.as_str(), definition));
            }
        }
        entries
    }

    /// 导出当前原生值映射
    ///
    /// 只包含有效字段集中已设置的字段，未设置的字段不出现在结果里
    pub fn to_data_map(&self) -> HashMap<String, DataValue> {
        let mut map = HashMap::new();
        for (name, _definition) in self.effective_fields() {
            if let Some(value) = self.values.get(name) {
                map.insert(name.to_string(), value.clone());
            }
        }
        map
    }

    /// 导出序列化值映射
    ///
    /// 每个已设置字段的当前原生值经 `to_serial` 还原为原始形态
    pub fn to_serial_map(&self) -> DataMapResult<HashMap<String, DataValue>> {
        let mut map = HashMap::new();
        for (name, definition) in self.effective_fields() {
            if let Some(value) = self.values.get(name) {
                map.insert(name.to_string(), definition.to_serial(value, name)?);
            }
        }
        Ok(map)
    }

    /// 序列化为JSON文本
    pub fn to_json(&self) -> DataMapResult<String> {
        let serial_map = self.to_serial_map()?;
        serde_json::to_string(&serial_map)
            .map_err(|e| map_error!(serialization, format!("序列化为JSON失败: {}", e)))
    }
}
