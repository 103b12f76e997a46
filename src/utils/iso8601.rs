//! ISO-8601 时间戳解析工具
//!
//! 支持日历日期、周日期、序数日期的扩展与基本写法，组合日期时间、
//! 纯时间、小数秒以及 `Z`/`±hh:mm`/`±hhmm`/`±hh` 固定时区偏移。
//! 解析策略为正则+格式表逐一匹配，首个命中的模式决定解析结果；
//! 无法识别的文本返回 `ParseError`

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DataMapResult;
use crate::map_error;

/// 小数秒后缀，例如 ".695487"
const FRACTION: &str = r"(?P<fraction>\.\d+)?";

/// 时区偏移后缀，例如 "Z"、"+08:00"、"-0500"、"+08"
const TIMEZONE: &str = r"(?P<timezone>Z|[+-]\d{2}(?::?\d{2})?)?$";

/// 模式主体的解析方式
#[derive(Clone, Copy)]
enum PatternKind {
    /// 主体含日期和时间
    DateTime,
    /// 主体只含日期，时间补午夜
    Date,
    /// 主体只含时间，日期补纪元日
    Time,
}

/// 单条解析模式：正则负责切分主体/小数秒/时区，格式串交给chrono
struct FormatPattern {
    regex: Regex,
    format: &'static str,
    /// 主体的补齐后缀，用于将不完整的日期补成chrono可解析的完整形式
    pad: &'static str,
    kind: PatternKind,
}

impl FormatPattern {
    fn new(body: &str, format: &'static str, pad: &'static str, kind: PatternKind) -> Self {
        Self {
            regex: Regex::new(body).expect("内置ISO-8601正则非法"),
            format,
            pad,
            kind,
        }
    }
}

static DATE_PATTERNS: Lazy<Vec<FormatPattern>> = Lazy::new(|| {
    let anchored = |matched: &str, fraction: bool| -> String {
        if fraction {
            format!("^(?P<matched>{}){}{}", matched, FRACTION, TIMEZONE)
        } else {
            format!("^(?P<matched>{}){}", matched, TIMEZONE)
        }
    };
    vec![
        // 扩展组合格式
        FormatPattern::new(
            &anchored(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}", true),
            "%Y-%m-%dT%H:%M:%S",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}", false),
            "%Y-%m-%dT%H:%M",
            "",
            PatternKind::DateTime,
        ),
        // 扩展分隔格式（空格分隔日期与时间）
        FormatPattern::new(
            &anchored(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}", true),
            "%Y-%m-%d %H:%M:%S",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}", false),
            "%Y-%m-%d %H:%M",
            "",
            PatternKind::DateTime,
        ),
        // 基本组合格式
        FormatPattern::new(
            &anchored(r"\d{8}T\d{2}:\d{2}:\d{2}", true),
            "%Y%m%dT%H:%M:%S",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{8}T\d{2}:\d{2}", false),
            "%Y%m%dT%H:%M",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{8}T\d{6}", true),
            "%Y%m%dT%H%M%S",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{8}T\d{4}", false),
            "%Y%m%dT%H%M",
            "",
            PatternKind::DateTime,
        ),
        // 基本分隔格式
        FormatPattern::new(
            &anchored(r"\d{8} \d{2}:\d{2}:\d{2}", true),
            "%Y%m%d %H:%M:%S",
            "",
            PatternKind::DateTime,
        ),
        FormatPattern::new(
            &anchored(r"\d{8} \d{6}", true),
            "%Y%m%d %H%M%S",
            "",
            PatternKind::DateTime,
        ),
        // 周日期
        FormatPattern::new(
            &anchored(r"\d{4}-W\d{2}-\d", false),
            "%G-W%V-%u",
            "",
            PatternKind::Date,
        ),
        FormatPattern::new(
            &anchored(r"\d{4}-W\d{2}", false),
            "%G-W%V-%u",
            "-1",
            PatternKind::Date,
        ),
        FormatPattern::new(
            &anchored(r"\d{4}W\d{3}", false),
            "%GW%V%u",
            "",
            PatternKind::Date,
        ),
        FormatPattern::new(
            &anchored(r"\d{4}W\d{2}", false),
            "%GW%V%u",
            "1",
            PatternKind::Date,
        ),
        // 序数日期
        FormatPattern::new(
            &anchored(r"\d{4}-\d{3}", false),
            "%Y-%j",
            "",
            PatternKind::Date,
        ),
        FormatPattern::new(&anchored(r"\d{7}", false), "%Y%j", "", PatternKind::Date),
        // 日历日期（无时区后缀，允许前缀匹配）
        FormatPattern::new(
            r"^(?P<matched>\d{4}-\d{2}-\d{2})",
            "%Y-%m-%d",
            "",
            PatternKind::Date,
        ),
        FormatPattern::new(
            r"^(?P<matched>\d{4}-\d{2})",
            "%Y-%m-%d",
            "-01",
            PatternKind::Date,
        ),
        FormatPattern::new(r"^(?P<matched>\d{8})", "%Y%m%d", "", PatternKind::Date),
        FormatPattern::new(r"^(?P<matched>\d{6})", "%y%m%d", "", PatternKind::Date),
        FormatPattern::new(
            r"^(?P<matched>\d{4})",
            "%Y-%m-%d",
            "-01-01",
            PatternKind::Date,
        ),
    ]
});

static TIME_PATTERNS: Lazy<Vec<FormatPattern>> = Lazy::new(|| {
    vec![
        FormatPattern::new(
            &format!(r"^(?P<matched>\d{{2}}:\d{{2}}:\d{{2}}){}{}", FRACTION, TIMEZONE),
            "%H:%M:%S",
            "",
            PatternKind::Time,
        ),
        FormatPattern::new(
            &format!(r"^(?P<matched>\d{{6}}){}{}", FRACTION, TIMEZONE),
            "%H%M%S",
            "",
            PatternKind::Time,
        ),
        FormatPattern::new(
            &format!(r"^(?P<matched>\d{{2}}:\d{{2}}){}", TIMEZONE),
            "%H:%M",
            "",
            PatternKind::Time,
        ),
        FormatPattern::new(
            &format!(r"^(?P<matched>\d{{4}}){}", TIMEZONE),
            "%H%M",
            "",
            PatternKind::Time,
        ),
    ]
});

/// 解析ISO-8601时间戳
///
/// 先按日期/日期时间模式匹配，全部不命中时回退为纯时间解析。
/// 无时区偏移的文本按UTC处理
pub fn parse_timestamp(text: &str) -> DataMapResult<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if !starts_with_digit(trimmed) {
        return Err(map_error!(parse, format!("无法识别的时间戳: '{}'", text)));
    }

    if let Some(result) = apply_patterns(trimmed, &DATE_PATTERNS) {
        return result;
    }
    if let Some(result) = apply_patterns(trimmed, &TIME_PATTERNS) {
        return result;
    }

    Err(map_error!(parse, format!("无法识别的时间戳: '{}'", text)))
}

/// 解析ISO-8601日期（与parse_timestamp同一套模式表）
pub fn parse_date(text: &str) -> DataMapResult<DateTime<FixedOffset>> {
    parse_timestamp(text)
}

/// 解析ISO-8601纯时间
///
/// 只尝试时间模式，日期部分补为纪元日，便于调用方投影出时间分量
pub fn parse_time(text: &str) -> DataMapResult<DateTime<FixedOffset>> {
    let trimmed = text.trim();
    if !starts_with_digit(trimmed) {
        return Err(map_error!(parse, format!("无法识别的时间文本: '{}'", text)));
    }

    if let Some(result) = apply_patterns(trimmed, &TIME_PATTERNS) {
        return result;
    }

    Err(map_error!(parse, format!("无法识别的时间文本: '{}'", text)))
}

fn starts_with_digit(text: &str) -> bool {
    text.chars().next().map_or(false, |c| c.is_ascii_digit())
}

/// 在模式表中寻找首个命中的模式并完成解析
///
/// 正则命中即锁定该模式，后续的chrono解析失败不再尝试其他模式，
/// 直接作为ParseError返回
fn apply_patterns(
    text: &str,
    patterns: &[FormatPattern],
) -> Option<DataMapResult<DateTime<FixedOffset>>> {
    for pattern in patterns.iter() {
        let Some(caps) = pattern.regex.captures(text) else {
            continue;
        };
        let matched = format!("{}{}", &caps["matched"], pattern.pad);

        let naive = match pattern.kind {
            PatternKind::DateTime => NaiveDateTime::parse_from_str(&matched, pattern.format),
            PatternKind::Date => NaiveDate::parse_from_str(&matched, pattern.format)
                .map(|d| d.and_time(NaiveTime::MIN)),
            PatternKind::Time => NaiveTime::parse_from_str(&matched, pattern.format)
                .map(|t| NaiveDate::default().and_time(t)),
        };
        let mut naive = match naive {
            Ok(n) => n,
            Err(e) => {
                return Some(Err(map_error!(
                    parse,
                    format!("时间戳 '{}' 解析失败: {}", text, e)
                )));
            }
        };

        if let Some(fraction) = caps.name("fraction") {
            match fraction_to_nanos(fraction.as_str()) {
                Some(nanos) => match naive.with_nanosecond(nanos) {
                    Some(adjusted) => naive = adjusted,
                    None => {
                        return Some(Err(map_error!(
                            parse,
                            format!("小数秒超出范围: '{}'", fraction.as_str())
                        )));
                    }
                },
                None => {
                    return Some(Err(map_error!(
                        parse,
                        format!("无效的小数秒: '{}'", fraction.as_str())
                    )));
                }
            }
        }

        let offset = match caps.name("timezone") {
            Some(tz) => match parse_offset_seconds(tz.as_str()) {
                Some(seconds) => match FixedOffset::east_opt(seconds) {
                    Some(offset) => offset,
                    None => {
                        return Some(Err(map_error!(
                            parse,
                            format!("时区偏移超出范围: '{}'", tz.as_str())
                        )));
                    }
                },
                None => {
                    return Some(Err(map_error!(
                        parse,
                        format!("无效的时区偏移: '{}'", tz.as_str())
                    )));
                }
            },
            None => FixedOffset::east(0),
        };

        return Some(match offset.from_local_datetime(&naive).single() {
            Some(dt) => Ok(dt),
            None => Err(map_error!(
                parse,
                format!("时间戳 '{}' 无法定位到唯一时刻", text)
            )),
        });
    }
    None
}

/// 将小数秒文本（含前导点）换算为纳秒
fn fraction_to_nanos(fraction: &str) -> Option<u32> {
    let digits: String = fraction.strip_prefix('.')?.chars().take(9).collect();
    if digits.is_empty() {
        return None;
    }
    format!("{:0<9}", digits).parse().ok()
}

/// 将时区偏移文本转换为秒数
///
/// 支持 "Z"、"+08:00"、"-0500"、"+08" 三类写法
fn parse_offset_seconds(text: &str) -> Option<i32> {
    if text == "Z" {
        return Some(0);
    }

    let sign = if text.starts_with('-') { -1 } else { 1 };
    let digits: String = text[1..].chars().filter(|c| c.is_ascii_digit()).collect();
    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };

    Some(sign * (hours * 3600 + minutes * 60))
}
