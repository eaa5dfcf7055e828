use regex::Regex;
use std::sync::OnceLock;

/// `<数字>)<RFC><空白><名称>`
static NUMBERED_SEGMENT: OnceLock<Regex> = OnceLock::new();

fn numbered_segment() -> &'static Regex {
    NUMBERED_SEGMENT.get_or_init(|| {
        Regex::new(r"^[0-9]+\)([A-Z0-9]+)\s(.+)$").expect("provider pattern is valid")
    })
}

/// 序号前缀 "3)"
static ORDINAL_PREFIX: OnceLock<Regex> = OnceLock::new();

fn ordinal_prefix() -> &'static Regex {
    ORDINAL_PREFIX.get_or_init(|| Regex::new(r"^[0-9]+\)\s*").expect("ordinal pattern is valid"))
}

/// 从打包字符串中解析出的一个候选供应商
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedProvider<'a> {
    /// 格式不符时为空串
    pub rfc: &'a str,
    pub name: &'a str,
}

/// 解析 "1)RFC123 Acme Corp;2)RFC456 Otro SA"
///
/// 按 `;` 切分, 去空白, 跳过空段, 顺序与原串一致。
/// 段落不符合 `<数字>)<RFC> <名称>` 时整段作为名称 (去掉序号前缀), RFC 为空。
pub fn parse_providers(packed: &str) -> impl Iterator<Item = ParsedProvider<'_>> + '_ {
    packed
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_segment)
}

fn parse_segment(segment: &str) -> ParsedProvider<'_> {
    if let Some(caps) = numbered_segment().captures(segment) {
        if let (Some(rfc), Some(name)) = (caps.get(1), caps.get(2)) {
            return ParsedProvider {
                rfc: rfc.as_str(),
                name: name.as_str(),
            };
        }
    }
    ParsedProvider {
        rfc: "",
        name: strip_ordinal(segment),
    }
}

/// 去掉 "3)" 这样的序号; 去掉后为空则保留原段
fn strip_ordinal(segment: &str) -> &str {
    match ordinal_prefix().find(segment) {
        Some(m) if m.end() < segment.len() => &segment[m.end()..],
        _ => segment,
    }
}
