//! 模型结构注册表模块
//!
//! 提供按名称检索模型结构描述的全局注册表

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rat_logger::debug;

use crate::error::DataMapResult;
use crate::map_error;
use crate::model::field_types::ModelSchema;

static SCHEMA_REGISTRY: Lazy<RwLock<HashMap<String, Arc<ModelSchema>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 注册模型结构描述
///
/// 同名重复注册返回配置错误
pub fn register_schema(schema: Arc<ModelSchema>) -> DataMapResult<()> {
    let mut registry = SCHEMA_REGISTRY.write();
    if registry.contains_key(schema.name()) {
        return Err(map_error!(
            config,
            format!("模型 '{}' 已注册", schema.name())
        ));
    }
    debug!("注册模型结构: {}", schema.name());
    registry.insert(schema.name().to_string(), schema);
    Ok(())
}

/// 按名称获取已注册的模型结构描述
pub fn get_schema(name: &str) -> Option<Arc<ModelSchema>> {
    SCHEMA_REGISTRY.read().get(name).cloned()
}

/// 列出所有已注册的模型名称
pub fn schema_names() -> Vec<String> {
    SCHEMA_REGISTRY.read().keys().cloned().collect()
}
