//! rat_datamap 基础用法示例
//!
//! 演示模型结构声明、从JSON构造实例、后期赋值、动态字段和序列化

use rat_datamap::types::DataValue;
use rat_datamap::{
    FieldDefinition, ModelInstance, define_schema, field_type, integer_field, model_field,
    string_field,
};

define_schema! {
    /// 用户模型
    pub static USER_SCHEMA => "user" {
        name: string_field(),
        age: integer_field(),
        joined: FieldDefinition::new(field_type!(datetime, format = "%Y-%m-%d %H:%M:%S")),
    }
}

define_schema! {
    /// 帖子模型，作者为嵌套用户
    pub static POST_SCHEMA => "post" {
        title: string_field(),
        author: model_field(USER_SCHEMA.clone()),
        tags: FieldDefinition::new(field_type!(list, string_field())),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化库（多语言错误消息），日志系统由调用者自行初始化
    rat_datamap::init();
    println!("=== {} 基础用法示例 ===", rat_datamap::get_info());

    // 1. 从JSON文本构造模型实例
    let json = r#"{
        "title": "第一篇帖子",
        "author": {"name": "Eric", "age": "18", "joined": "2010-12-28 09:30:00"},
        "tags": ["rust", "datamap"]
    }"#;
    let mut post = ModelInstance::from_json(POST_SCHEMA.clone(), json)?;

    let author = post.get("author").and_then(|v| v.as_model()).unwrap();
    println!("作者: {:?}", author.get("name"));
    // 字符串 "18" 已经转换为整数
    println!("年龄: {:?}", author.get("age"));

    // 2. 后期赋值同样经过字段转换
    post.set("title", "改过的标题")?;
    println!("标题: {:?}", post.get("title"));

    // 3. 动态追加实例私有字段，参与序列化
    post.add_field("summary", "一句话摘要", string_field())?;

    // 4. 序列化回JSON
    println!("序列化结果: {}", post.to_json()?);

    // 5. 赋值类型错误会被明确报告
    let schema = USER_SCHEMA.clone();
    let mut user = ModelInstance::new(schema);
    if let Err(e) = user.set("joined", 42i64) {
        println!("预期的赋值错误: {}", e);
    }

    // 6. 无类型属性不参与序列化
    user.set("note", DataValue::String("临时备注".to_string()))?;
    println!("备注: {:?}", user.get("note"));
    println!("序列化结果: {}", user.to_json()?);

    Ok(())
}
