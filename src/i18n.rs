//! Localization provider: the active locale, a static message catalog, and
//! locale-aware clock formatting for message timestamps.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    Vi,
    En,
}

impl Locale {
    /// Value for the document `lang` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Vi => "vi",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts bare languages and region tags (`vi`, `vi-VN`, `en_US`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let language = raw
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "vi" => Ok(Locale::Vi),
            "en" => Ok(Locale::En),
            _ => Err(UnknownLocale(raw.to_string())),
        }
    }
}

static CATALOG: Lazy<HashMap<(Locale, &'static str), &'static str>> = Lazy::new(|| {
    let entries: &[(Locale, &str, &str)] = &[
        (Locale::Vi, "chat.title", "AZbot Support"),
        (Locale::Vi, "chat.online", "Trực tuyến"),
        (Locale::Vi, "chat.placeholder", "Nhập tin nhắn..."),
        (Locale::Vi, "chat.send", "Gửi"),
        (Locale::Vi, "chat.attachment_alt", "Tệp đính kèm {index}"),
        (Locale::Vi, "theme.toggle", "Đổi giao diện"),
        (Locale::En, "chat.title", "AZbot Support"),
        (Locale::En, "chat.online", "Online"),
        (Locale::En, "chat.placeholder", "Type a message..."),
        (Locale::En, "chat.send", "Send"),
        (Locale::En, "chat.attachment_alt", "Message attachment {index}"),
        (Locale::En, "theme.toggle", "Toggle theme"),
    ];
    entries
        .iter()
        .map(|(locale, key, text)| ((*locale, *key), *text))
        .collect()
});

/// Looks up `key`, falling back to the default locale and then to the key.
pub fn t(locale: Locale, key: &str) -> String {
    CATALOG
        .get(&(locale, key))
        .or_else(|| CATALOG.get(&(Locale::default(), key)))
        .map(|text| text.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// [`t`] with `{name}` placeholders substituted.
pub fn t_with(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(locale, key), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

const CLOCK_24H: &[FormatItem<'static>] =
    format_description!("[hour repr:24 padding:zero]:[minute padding:zero]");

const CLOCK_12H: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Hour and minute in the local time zone. Falls back to UTC when the
/// offset cannot be determined.
pub fn format_clock(timestamp: OffsetDateTime, locale: Locale) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_clock_at(timestamp, offset, locale)
}

pub fn format_clock_at(timestamp: OffsetDateTime, offset: UtcOffset, locale: Locale) -> String {
    let local = timestamp.to_offset(offset);
    let format = match locale {
        Locale::Vi => CLOCK_24H,
        Locale::En => CLOCK_12H,
    };
    local.format(format).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{datetime, offset};

    #[test]
    fn parses_region_tags() {
        assert_eq!("vi-VN".parse::<Locale>(), Ok(Locale::Vi));
        assert_eq!("en_US".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn translates_and_falls_back() {
        assert_eq!(t(Locale::Vi, "chat.placeholder"), "Nhập tin nhắn...");
        assert_eq!(t(Locale::En, "chat.send"), "Send");
        assert_eq!(t(Locale::En, "missing.key"), "missing.key");
    }

    #[test]
    fn interpolates_placeholders() {
        assert_eq!(
            t_with(Locale::En, "chat.attachment_alt", &[("index", "2")]),
            "Message attachment 2"
        );
    }

    #[test]
    fn clock_follows_locale() {
        let at = datetime!(2024-05-01 13:05:00 UTC);
        assert_eq!(format_clock_at(at, offset!(+7), Locale::Vi), "20:05");
        assert_eq!(format_clock_at(at, UtcOffset::UTC, Locale::En), "01:05 PM");
    }
}
