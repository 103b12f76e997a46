//! 字段类型定义模块
//!
//! 定义模型字段的类型、字段声明和模型结构描述

use std::collections::HashMap;
use std::sync::Arc;

/// 字段类型枚举
///
/// 封闭的标签变体，每个变体完全决定该字段的双向转换行为，
/// 不从数据做任何隐式类型推断
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// 字符串类型
    String,
    /// 整数类型
    Integer,
    /// 浮点数类型
    Float,
    /// 布尔类型
    Boolean,
    /// 日期时间类型
    ///
    /// `format` 为解析原始文本用的格式串，缺省时走ISO-8601解析；
    /// `serial_format` 为序列化格式串，缺省时输出ISO-8601文本
    DateTime {
        format: Option<String>,
        serial_format: Option<String>,
    },
    /// 日期类型（复用日期时间的转换后投影出日期分量）
    Date {
        format: Option<String>,
        serial_format: Option<String>,
    },
    /// 时间类型（复用日期时间的转换后投影出时间分量）
    Time {
        format: Option<String>,
        serial_format: Option<String>,
    },
    /// 嵌套模型类型
    Model {
        schema: Arc<ModelSchema>,
    },
    /// 嵌套模型集合类型
    ModelCollection {
        schema: Arc<ModelSchema>,
    },
    /// 字段集合类型 - 元素字段声明一次，逐元素套用
    FieldCollection {
        item: Box<FieldDefinition>,
    },
}

impl FieldType {
    /// 获取字段类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::DateTime { .. } => "datetime",
            FieldType::Date { .. } => "date",
            FieldType::Time { .. } => "time",
            FieldType::Model { .. } => "model",
            FieldType::ModelCollection { .. } => "model_collection",
            FieldType::FieldCollection { .. } => "field_collection",
        }
    }
}

/// 字段定义
///
/// 一条字段声明：类型决定双向转换，`source` 指定原始字典中的取值键，
/// 缺省时使用字段名本身
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// 字段类型
    pub field_type: FieldType,
    /// 原始字典中的来源键，声明后不可变
    pub source: Option<String>,
    /// 字段描述
    pub description: Option<String>,
}

impl FieldDefinition {
    /// 创建新的字段定义
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            source: None,
            description: None,
        }
    }

    /// 设置来源键
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// 设置字段描述
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }
}

/// 模型结构描述
///
/// 模型类型声明的有序字段集合。构建完成后不可变，
/// 以 `Arc` 在该类型的全部实例间共享
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    name: String,
    fields: Vec<(String, FieldDefinition)>,
    index: HashMap<String, usize>,
}

impl ModelSchema {
    /// 创建模型结构构建器
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            fields: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// 模型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 按名称查找字段定义
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.index.get(name).map(|&i| &self.fields[i].1)
    }

    /// 按声明顺序迭代字段
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// 字段数量
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空结构
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 模型结构构建器
pub struct SchemaBuilder {
    name: String,
    fields: Vec<(String, FieldDefinition)>,
    index: HashMap<String, usize>,
}

impl SchemaBuilder {
    /// 追加一条字段声明
    ///
    /// 同名字段后声明者覆盖先声明者，保留原有声明位置
    pub fn field(mut self, name: &str, definition: FieldDefinition) -> Self {
        match self.index.get(name) {
            Some(&i) => {
                self.fields[i].1 = definition;
            }
            None => {
                self.index.insert(name.to_string(), self.fields.len());
                self.fields.push((name.to_string(), definition));
            }
        }
        self
    }

    /// 完成构建，返回共享的不可变结构描述
    pub fn build(self) -> Arc<ModelSchema> {
        Arc::new(ModelSchema {
            name: self.name,
            fields: self.fields,
            index: self.index,
        })
    }
}
