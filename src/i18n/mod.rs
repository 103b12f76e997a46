//! 多语言错误消息模块
//!
//! 使用rat_embed_lang框架提供统一的错误消息多语言支持

use std::collections::HashMap;
use rat_embed_lang::register_translations;

/// 错误消息翻译注册器
pub struct ErrorMessageI18n;

impl ErrorMessageI18n {
    /// 注册所有错误消息翻译
    pub fn register_all_translations() {
        let mut translations = HashMap::new();

        // 字段转换错误
        let mut conversion_errors = HashMap::new();
        conversion_errors.insert("zh-CN".to_string(), "字段转换失败: {field} - {message}".to_string());
        conversion_errors.insert("en-US".to_string(), "Field conversion failed: {field} - {message}".to_string());
        conversion_errors.insert("ja-JP".to_string(), "フィールド変換に失敗しました: {field} - {message}".to_string());
        translations.insert("error.conversion".to_string(), conversion_errors);

        // 字段赋值错误
        let mut assignment_errors = HashMap::new();
        assignment_errors.insert("zh-CN".to_string(), "字段赋值类型错误: {field} - 值类型 '{value_type}' 与字段类型 '{field_type}' 不兼容".to_string());
        assignment_errors.insert("en-US".to_string(), "Field assignment type error: {field} - value type '{value_type}' is not compatible with field type '{field_type}'".to_string());
        assignment_errors.insert("ja-JP".to_string(), "フィールド代入型エラー: {field} - 値の型 '{value_type}' はフィールド型 '{field_type}' と互換性がありません".to_string());
        translations.insert("error.assignment".to_string(), assignment_errors);

        // 时间戳解析错误
        let mut parse_errors = HashMap::new();
        parse_errors.insert("zh-CN".to_string(), "时间戳解析失败: {message}".to_string());
        parse_errors.insert("en-US".to_string(), "Timestamp parsing failed: {message}".to_string());
        parse_errors.insert("ja-JP".to_string(), "タイムスタンプ解析に失敗しました: {message}".to_string());
        translations.insert("error.parse".to_string(), parse_errors);

        // 序列化错误
        let mut serialization_errors = HashMap::new();
        serialization_errors.insert("zh-CN".to_string(), "数据序列化失败: {message}".to_string());
        serialization_errors.insert("en-US".to_string(), "Data serialization failed: {message}".to_string());
        serialization_errors.insert("ja-JP".to_string(), "データシリアライズが失敗しました: {message}".to_string());
        translations.insert("error.serialization".to_string(), serialization_errors);

        // 配置错误
        let mut config_errors = HashMap::new();
        config_errors.insert("zh-CN".to_string(), "配置错误: {message}".to_string());
        config_errors.insert("en-US".to_string(), "Configuration error: {message}".to_string());
        config_errors.insert("ja-JP".to_string(), "設定エラー: {message}".to_string());
        translations.insert("error.config".to_string(), config_errors);

        // 模型注册重复
        let mut schema_duplicate_errors = HashMap::new();
        schema_duplicate_errors.insert("zh-CN".to_string(), "模型 '{name}' 已注册".to_string());
        schema_duplicate_errors.insert("en-US".to_string(), "Schema '{name}' is already registered".to_string());
        schema_duplicate_errors.insert("ja-JP".to_string(), "スキーマ '{name}' は既に登録されています".to_string());
        translations.insert("error.schema_duplicate".to_string(), schema_duplicate_errors);

        // 注册所有翻译
        register_translations(translations);
    }

    /// 初始化错误消息多语言支持
    pub fn init() {
        Self::register_all_translations();

        // 从环境变量获取语言设置，默认为zh-CN
        let lang = std::env::var("RAT_LANG")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_else(|_| "zh-CN".to_string());

        // 标准化语言代码
        use rat_embed_lang::normalize_language_code;
        let normalized_lang = normalize_language_code(&lang);
        set_language(&normalized_lang);
    }
}

/// 重新导出rat_embed_lang的核心函数
pub use rat_embed_lang::{t, tf, set_language, current_language};
