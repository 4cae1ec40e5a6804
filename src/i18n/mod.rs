//! Bilingual UI strings.
//!
//! The tables map the English source keys used in markup (`data-i18n`,
//! `data-i18n-key`, `data-title`) to localized strings. Lookup misses mean
//! "leave the element untranslated" — never an error.

pub mod en;
pub mod zh_cn;

use serde_json::Value;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English.
    En,
    /// Simplified Chinese.
    ZhCn,
}

impl Lang {
    /// Language code as stored in `localStorage` and the `lang` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::ZhCn => "zh-CN",
        }
    }

    /// Parses a stored or document language code.
    pub fn from_code(code: &str) -> Option<Lang> {
        match code {
            "en" => Some(Lang::En),
            "zh-CN" => Some(Lang::ZhCn),
            _ => None,
        }
    }

    /// Maps a browser language tag (`navigator.language`) to a UI language:
    /// any `zh*` variant is Chinese, everything else English.
    pub fn from_browser_tag(tag: &str) -> Lang {
        if tag.starts_with("zh") {
            Lang::ZhCn
        } else {
            Lang::En
        }
    }

    /// The language a toggle switches to.
    pub fn other(self) -> Lang {
        match self {
            Lang::En => Lang::ZhCn,
            Lang::ZhCn => Lang::En,
        }
    }
}

/// Localized string for `key`, or `None` when the table has no entry.
pub fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    match lang {
        Lang::En => en::lookup(key),
        Lang::ZhCn => zh_cn::lookup(key),
    }
}

/// Substitutes `%name%` placeholders from a JSON object of vars. Unknown
/// names become empty, mirroring the markup contract; a non-object value
/// leaves the template untouched.
pub fn fill_placeholders(template: &str, vars: &Value) -> String {
    let Some(map) = vars.as_object() else {
        return template.to_string();
    };
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        let after = &rest[start + 1..];
        let Some(len) = after
            .char_indices()
            .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
            .last()
            .map(|(i, c)| i + c.len_utf8())
        else {
            // A stray '%' with no name after it.
            out.push_str(&rest[..start + 1]);
            rest = after;
            continue;
        };
        if after.as_bytes().get(len) != Some(&b'%') {
            out.push_str(&rest[..start + 1]);
            rest = after;
            continue;
        }
        out.push_str(&rest[..start]);
        let name = &after[..len];
        match map.get(name) {
            Some(Value::String(s)) => out.push_str(s),
            Some(other) => out.push_str(&other.to_string()),
            None => {},
        }
        rest = &after[len + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_translates_known_keys_per_language() {
        assert_eq!(lookup(Lang::ZhCn, "Home"), Some("首页"));
        assert_eq!(lookup(Lang::En, "Home"), Some("Home"));
        assert_eq!(lookup(Lang::ZhCn, "Older Posts"), Some("上一页"));
    }

    #[test]
    fn lookup_misses_mean_untranslated() {
        assert_eq!(lookup(Lang::ZhCn, "No Such Key"), None);
        assert_eq!(lookup(Lang::En, ""), None);
    }

    #[test]
    fn browser_tags_resolve_to_two_languages() {
        assert_eq!(Lang::from_browser_tag("zh-CN"), Lang::ZhCn);
        assert_eq!(Lang::from_browser_tag("zh-TW"), Lang::ZhCn);
        assert_eq!(Lang::from_browser_tag("en-US"), Lang::En);
        assert_eq!(Lang::from_browser_tag("fr"), Lang::En);
    }

    #[test]
    fn placeholders_fill_from_vars() {
        let vars = json!({ "name": "Ada", "count": 3 });
        assert_eq!(
            fill_placeholders("Hi %name%, %count% new", &vars),
            "Hi Ada, 3 new"
        );
    }

    #[test]
    fn unknown_placeholder_names_become_empty() {
        let vars = json!({ "name": "Ada" });
        assert_eq!(fill_placeholders("Hi %nobody%!", &vars), "Hi !");
    }

    #[test]
    fn non_object_vars_leave_the_template_untouched() {
        assert_eq!(
            fill_placeholders("50% done, %name%", &Value::Null),
            "50% done, %name%"
        );
    }

    #[test]
    fn stray_percent_signs_pass_through() {
        let vars = json!({ "p": "x" });
        assert_eq!(fill_placeholders("100% sure %p%", &vars), "100% sure x");
    }
}
