//! 模型实例测试
//!
//! 覆盖从字典/JSON/键值对三种构造路径、来源键、嵌套模型与集合、
//! 动态字段、后期赋值的再转换以及序列化往返

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use rat_datamap::types::DataValue;
    use rat_datamap::{
        DataMapError, ModelInstance, ModelSchema, boolean_field, date_field, datetime_field,
        field_collection_field, integer_field, model_collection_field, model_field, string_field,
    };

    /// 测试辅助：从JSON字面量构造数据映射
    fn data_map(json: &str) -> HashMap<String, DataValue> {
        DataValue::from_json_string(json)
            .expect("测试JSON解析失败")
            .expect_object()
            .expect("测试JSON应为对象")
    }

    #[test]
    fn test_basic_population() {
        let schema = ModelSchema::builder("three_fields")
            .field("first", string_field())
            .field("second", string_field())
            .field("third", string_field())
            .build();

        let instance =
            ModelInstance::from_data_map(schema, data_map(r#"{"first": "firstvalue", "second": "secondvalue"}"#))
                .unwrap();

        assert_eq!(
            instance.get("first"),
            Some(&DataValue::String("firstvalue".to_string()))
        );
        assert_eq!(
            instance.get("second"),
            Some(&DataValue::String("secondvalue".to_string()))
        );
        // 字典中不存在的键保持未设置，序列化时整体跳过
        assert_eq!(instance.get("third"), None);
        assert!(!instance.is_set("third"));
        assert!(!instance.to_data_map().contains_key("third"));
    }

    #[test]
    fn test_custom_source_key() {
        let schema = ModelSchema::builder("custom_source")
            .field("first", string_field().with_source("custom_source"))
            .build();

        let instance =
            ModelInstance::from_data_map(schema, data_map(r#"{"custom_source": "somevalue"}"#))
                .unwrap();

        assert_eq!(
            instance.get("first"),
            Some(&DataValue::String("somevalue".to_string()))
        );
    }

    #[test]
    fn test_nested_model_population() {
        let sub_schema = ModelSchema::builder("sub")
            .field("first", string_field())
            .build();
        let schema = ModelSchema::builder("outer")
            .field("first", model_field(sub_schema))
            .build();

        let instance =
            ModelInstance::from_data_map(schema, data_map(r#"{"first": {"first": "somevalue"}}"#))
                .unwrap();

        let nested = instance
            .get("first")
            .and_then(|v| v.as_model())
            .expect("嵌套字段应为模型实例");
        assert_eq!(
            nested.get("first"),
            Some(&DataValue::String("somevalue".to_string()))
        );
    }

    #[test]
    fn test_nested_model_serial_round_trip() {
        let user_schema = ModelSchema::builder("user")
            .field("name", string_field())
            .build();
        let post_schema = ModelSchema::builder("post")
            .field("title", string_field())
            .field("author", model_field(user_schema))
            .build();

        let data = data_map(r#"{"title": "Test Post", "author": {"name": "Eric Martin"}}"#);
        let post = ModelInstance::from_data_map(post_schema, data.clone()).unwrap();

        // 序列化是解析的精确逆操作
        assert_eq!(post.to_serial_map().unwrap(), data);
    }

    #[test]
    fn test_nested_model_null_becomes_empty_instance() {
        let sub_schema = ModelSchema::builder("sub_empty")
            .field("first", string_field())
            .build();
        let schema = ModelSchema::builder("outer_empty")
            .field("first", model_field(sub_schema))
            .build();

        let instance =
            ModelInstance::from_data_map(schema, data_map(r#"{"first": null}"#)).unwrap();

        let nested = instance
            .get("first")
            .and_then(|v| v.as_model())
            .expect("空值应构造出空的嵌套实例");
        assert!(!nested.is_set("first"));
    }

    #[test]
    fn test_model_collection_population() {
        let sub_schema = ModelSchema::builder("collection_sub")
            .field("first", string_field())
            .build();
        let schema = ModelSchema::builder("collection_outer")
            .field("first", model_collection_field(sub_schema))
            .build();

        let instance = ModelInstance::from_data_map(
            schema.clone(),
            data_map(r#"{"first": [{"first": "somevalue"}, {"first": "anothervalue"}]}"#),
        )
        .unwrap();

        let items = instance
            .get("first")
            .and_then(|v| v.as_array())
            .expect("集合字段应为数组");
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].as_model().unwrap().get("first"),
            Some(&DataValue::String("somevalue".to_string()))
        );
        assert_eq!(
            items[1].as_model().unwrap().get("first"),
            Some(&DataValue::String("anothervalue".to_string()))
        );

        // 空数组保持为空
        let empty = ModelInstance::from_data_map(schema, data_map(r#"{"first": []}"#)).unwrap();
        assert_eq!(empty.get("first"), Some(&DataValue::Array(Vec::new())));
    }

    #[test]
    fn test_model_collection_serial_round_trip() {
        let post_schema = ModelSchema::builder("rt_post")
            .field("title", string_field())
            .build();
        let user_schema = ModelSchema::builder("rt_user")
            .field("name", string_field())
            .field("posts", model_collection_field(post_schema))
            .build();

        let data = data_map(
            r#"{"name": "Eric Martin", "posts": [{"title": "Post #1"}, {"title": "Post #2"}]}"#,
        );
        let eric = ModelInstance::from_data_map(user_schema, data.clone()).unwrap();

        assert_eq!(eric.to_serial_map().unwrap(), data);
    }

    #[test]
    fn test_field_collection_with_source() {
        let schema = ModelSchema::builder("person_schedule")
            .field("aliases", field_collection_field(string_field()))
            .field(
                "events",
                field_collection_field(date_field(Some("%Y-%m-%d"), Some("%m-%d-%Y")))
                    .with_source("schedule"),
            )
            .build();

        let instance = ModelInstance::from_data_map(
            schema,
            data_map(r#"{"aliases": ["Joe", "John", "Bob"], "schedule": ["2011-01-30", "2011-04-01"]}"#),
        )
        .unwrap();

        let serial = instance.to_serial_map().unwrap();
        assert_eq!(
            serial["aliases"],
            DataValue::Array(vec![
                DataValue::String("Joe".to_string()),
                DataValue::String("John".to_string()),
                DataValue::String("Bob".to_string()),
            ])
        );
        assert_eq!(
            serial["events"].as_array().unwrap()[0],
            DataValue::String("01-30-2011".to_string())
        );
    }

    #[test]
    fn test_add_field_is_instance_private() {
        let schema = ModelSchema::builder("person_private")
            .field("name", string_field())
            .field("age", integer_field())
            .build();

        let mut obj = ModelInstance::from_data_map(
            schema.clone(),
            data_map(r#"{"name": "Eric", "age": 18}"#),
        )
        .unwrap();
        obj.add_field("gender", "male", string_field()).unwrap();

        assert_eq!(
            obj.get("gender"),
            Some(&DataValue::String("male".to_string()))
        );
        assert_eq!(
            obj.to_data_map().get("gender"),
            Some(&DataValue::String("male".to_string()))
        );

        // 同类型独立创建的实例不受动态字段影响
        let other = ModelInstance::from_data_map(
            schema,
            data_map(r#"{"name": "John", "age": 20}"#),
        )
        .unwrap();
        assert_eq!(other.get("gender"), None);
        assert!(!other.to_data_map().contains_key("gender"));
    }

    #[test]
    fn test_late_assignment_reconversion() {
        let schema = ModelSchema::builder("person_late")
            .field("name", string_field())
            .field("age", integer_field())
            .build();

        let mut instance =
            ModelInstance::from_data_map(schema, data_map(r#"{"name": "Eric"}"#)).unwrap();
        assert_eq!(instance.to_data_map(), data_map(r#"{"name": "Eric"}"#));

        instance.set("age", 18i64).unwrap();
        assert_eq!(
            instance.to_data_map(),
            data_map(r#"{"name": "Eric", "age": 18}"#)
        );

        instance.set("name", "John").unwrap();

        // 后期赋值同样经过字段转换：字符串 "19" 再转换为整数
        instance.set("age", "19").unwrap();
        assert_eq!(
            instance.to_data_map(),
            data_map(r#"{"name": "John", "age": 19}"#)
        );

        // 动态注册日期字段并赋原始文本
        let birthday = NaiveDate::from_ymd_opt(2011, 4, 1).unwrap();
        instance
            .add_field("birthday", "04-01-2011", date_field(Some("%m-%d-%Y"), None))
            .unwrap();
        assert_eq!(
            instance.to_data_map().get("birthday"),
            Some(&DataValue::Date(birthday))
        );

        // 把字段当前的原生值赋回去，结果保持不变
        instance.set("birthday", birthday).unwrap();
        assert_eq!(
            instance.to_data_map().get("birthday"),
            Some(&DataValue::Date(birthday))
        );
    }

    #[test]
    fn test_assign_native_value_directly() {
        let schema = ModelSchema::builder("event_native")
            .field("time", date_field(Some("%Y-%m-%d"), None))
            .build();

        // 未经 from_data_map 的实例也可以直接赋原生值并正确序列化
        let mut instance = ModelInstance::new(schema);
        let day = NaiveDate::from_ymd_opt(2000, 10, 31).unwrap();
        instance.set("time", day).unwrap();

        let serial = instance.to_serial_map().unwrap();
        assert_eq!(serial["time"], DataValue::String("2000-10-31".to_string()));
    }

    #[test]
    fn test_assignment_error_reports_types() {
        let schema = ModelSchema::builder("event_bad")
            .field("time", datetime_field(None, None))
            .build();

        let mut instance = ModelInstance::new(schema);

        // 整数既不是合法的原始输入也不是合法的原生值
        let err = instance.set("time", 5i64).unwrap_err();
        match err {
            DataMapError::AssignmentError {
                field,
                value_type,
                field_type,
            } => {
                assert_eq!(field, "time");
                assert_eq!(value_type, "integer");
                assert_eq!(field_type, "datetime");
            }
            other => panic!("期望赋值类型错误，实际: {}", other),
        }

        // 无法解析的文本同样报赋值错误
        let err = instance.set("time", "not-a-date").unwrap_err();
        assert!(matches!(err, DataMapError::AssignmentError { .. }));
    }

    #[test]
    fn test_untyped_attribute_bypasses_fields() {
        let schema = ModelSchema::builder("person_untyped")
            .field("name", string_field())
            .build();

        let mut instance = ModelInstance::new(schema);
        instance.set("name", "Eric").unwrap();
        instance.set("nickname", "Ric").unwrap();

        // 无类型属性原样可读，但不参与序列化
        assert_eq!(
            instance.get("nickname"),
            Some(&DataValue::String("Ric".to_string()))
        );
        assert!(!instance.to_data_map().contains_key("nickname"));
        assert!(!instance.to_serial_map().unwrap().contains_key("nickname"));
    }

    #[test]
    fn test_scalar_accepts_unconvertible_as_native() {
        // 标量字段的序列化是恒等变换，探测必然通过：
        // 无法按原始值转换的输入被当作原生值保留
        let schema = ModelSchema::builder("person_fallback")
            .field("age", integer_field())
            .build();

        let mut instance = ModelInstance::new(schema);
        instance.set("age", "abc").unwrap();
        assert_eq!(
            instance.get("age"),
            Some(&DataValue::String("abc".to_string()))
        );
        assert_eq!(
            instance.to_serial_map().unwrap()["age"],
            DataValue::String("abc".to_string())
        );
    }

    #[test]
    fn test_from_json_and_to_json() {
        let schema = ModelSchema::builder("person_json")
            .field("name", string_field())
            .field("age", integer_field())
            .build();

        let json_text = r#"{"name": "Eric", "age": 18}"#;
        let instance = ModelInstance::from_json(schema, json_text).unwrap();
        assert_eq!(
            instance.get("name"),
            Some(&DataValue::String("Eric".to_string()))
        );
        assert_eq!(instance.get("age"), Some(&DataValue::Int(18)));

        // JSON往返按值比较，对象键顺序不保证
        let round_trip: serde_json::Value =
            serde_json::from_str(&instance.to_json().unwrap()).unwrap();
        let expected: serde_json::Value = serde_json::from_str(json_text).unwrap();
        assert_eq!(round_trip, expected);
    }

    #[test]
    fn test_to_json_serializes_date_fields() {
        let schema = ModelSchema::builder("event_json")
            .field("time", date_field(Some("%Y-%m-%d"), None))
            .build();

        let instance =
            ModelInstance::from_json(schema, r#"{"time": "2000-10-31"}"#).unwrap();

        let serial = instance.to_serial_map().unwrap();
        assert_eq!(serial["time"], DataValue::String("2000-10-31".to_string()));

        let json: serde_json::Value =
            serde_json::from_str(&instance.to_json().unwrap()).unwrap();
        assert_eq!(json["time"], serde_json::json!("2000-10-31"));
    }

    #[test]
    fn test_from_kwargs() {
        let schema = ModelSchema::builder("person_kwargs")
            .field("name", string_field())
            .field("age", integer_field())
            .field("is_active", boolean_field())
            .build();

        let instance = ModelInstance::from_kwargs(
            schema,
            vec![
                ("name", DataValue::from("Eric")),
                ("age", DataValue::from(18)),
                ("is_active", DataValue::from("True")),
            ],
        )
        .unwrap();

        assert_eq!(
            instance.get("name"),
            Some(&DataValue::String("Eric".to_string()))
        );
        assert_eq!(instance.get("age"), Some(&DataValue::Int(18)));
        // 键值对路径与字典路径走同一套转换
        assert_eq!(instance.get("is_active"), Some(&DataValue::Bool(true)));
    }

    #[test]
    fn test_serial_round_trip_reproduces_input() {
        let schema = ModelSchema::builder("person_rt")
            .field("name", string_field())
            .field("age", integer_field())
            .field("score", rat_datamap::float_field())
            .field("is_active", boolean_field())
            .build();

        let data = data_map(r#"{"name": "Eric", "age": 18, "score": 0.5, "is_active": true}"#);
        let instance = ModelInstance::from_data_map(schema, data.clone()).unwrap();
        assert_eq!(instance.to_serial_map().unwrap(), data);
    }

    #[test]
    fn test_extra_field_shadows_schema_field() {
        let schema = ModelSchema::builder("person_shadow")
            .field("joined", string_field())
            .build();

        let mut instance = ModelInstance::new(schema);
        instance.set("joined", "2011-01-30").unwrap();
        assert_eq!(
            instance.get("joined"),
            Some(&DataValue::String("2011-01-30".to_string()))
        );

        // 动态字段与类型字段同名时以动态字段为准
        instance
            .add_field("joined", "2011-01-30", date_field(Some("%Y-%m-%d"), None))
            .unwrap();
        assert_eq!(
            instance.get("joined"),
            Some(&DataValue::Date(
                NaiveDate::from_ymd_opt(2011, 1, 30).unwrap()
            ))
        );
        assert_eq!(
            instance.to_serial_map().unwrap()["joined"],
            DataValue::String("2011-01-30".to_string())
        );
    }

    #[test]
    fn test_schema_lookup_and_order() {
        let schema = ModelSchema::builder("ordered")
            .field("first", string_field())
            .field("second", integer_field())
            .field("third", boolean_field())
            .build();

        assert_eq!(schema.len(), 3);
        assert!(schema.field("second").is_some());
        assert!(schema.field("missing").is_none());

        // 迭代保持声明顺序
        let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
