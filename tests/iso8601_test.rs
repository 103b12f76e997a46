//! ISO-8601 解析器测试
//!
//! 覆盖日历/周/序数日期、扩展与基本格式、小数秒和各类时区偏移写法

#[cfg(test)]
mod tests {
    use chrono::{Datelike, FixedOffset, TimeZone, Timelike};
    use rat_datamap::{DataMapError, parse_time, parse_timestamp};

    #[test]
    fn test_extended_combined_format() {
        let dt = parse_timestamp("2010-07-13T14:01:00Z").unwrap();
        let expected = FixedOffset::east(0)
            .with_ymd_and_hms(2010, 7, 13, 14, 1, 0)
            .unwrap();
        assert_eq!(dt, expected);

        // 分钟精度，秒分量补零
        let dt = parse_timestamp("2010-07-13T14:01").unwrap();
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_separate_format_with_space() {
        let dt = parse_timestamp("2025-10-20 13:54:23").unwrap();
        assert_eq!(
            dt,
            FixedOffset::east(0)
                .with_ymd_and_hms(2025, 10, 20, 13, 54, 23)
                .unwrap()
        );
    }

    #[test]
    fn test_basic_combined_format() {
        let expected = FixedOffset::east(-5 * 3600)
            .with_ymd_and_hms(2010, 7, 13, 14, 2, 0)
            .unwrap();

        assert_eq!(parse_timestamp("20100713T140200-05:00").unwrap(), expected);
        assert_eq!(parse_timestamp("20100713T14:02:00-05:00").unwrap(), expected);
    }

    #[test]
    fn test_calendar_dates() {
        let dt = parse_timestamp("2010-12-28").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 12, 28));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));

        assert_eq!(parse_timestamp("20101228").unwrap(), dt);

        // 年月精度补月初
        let dt = parse_timestamp("2010-12").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 12, 1));

        // 纯年份补年初
        let dt = parse_timestamp("2010").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 1, 1));
    }

    #[test]
    fn test_week_dates() {
        // 2010年第1周的周一是2010-01-04
        let dt = parse_timestamp("2010-W01-1").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 1, 4));

        // 无星期分量时补周一
        let dt = parse_timestamp("2010-W01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 1, 4));
    }

    #[test]
    fn test_ordinal_dates() {
        let dt = parse_timestamp("2010-365").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2010, 12, 31));
    }

    #[test]
    fn test_fractional_seconds() {
        let dt = parse_timestamp("2025-10-20T13:54:23.695487+00:00").unwrap();
        assert_eq!(dt.nanosecond(), 695_487_000);
    }

    #[test]
    fn test_offset_variants() {
        let base = parse_timestamp("2010-07-13T14:00:00Z").unwrap();
        assert_eq!(base.offset().local_minus_utc(), 0);

        let dt = parse_timestamp("2010-07-13T14:00:00+08:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);

        // 紧凑写法与仅小时写法
        let dt = parse_timestamp("2010-07-13T14:00:00-0530").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -(5 * 3600 + 30 * 60));

        let dt = parse_timestamp("2010-07-13T14:00:00+08").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_time_only_parsing() {
        let dt = parse_time("09:33:30").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 33, 30));

        let dt = parse_time("093331").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 33, 31));

        let dt = parse_time("09:33").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 33, 0));
    }

    #[test]
    fn test_timestamp_falls_back_to_time() {
        // 日期模式全部不命中时按纯时间解析
        let dt = parse_timestamp("09:33:30").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (9, 33, 30));
    }

    #[test]
    fn test_unrecognized_input() {
        for text in ["hello", "", "   ", "T14:01:00", "--12-28"] {
            let result = parse_timestamp(text);
            assert!(
                matches!(result, Err(DataMapError::ParseError { .. })),
                "文本 '{}' 应解析失败",
                text
            );
        }
    }
}
