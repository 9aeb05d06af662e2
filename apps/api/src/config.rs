use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::PageGeometry;

/// Application configuration loaded from environment variables.
/// Every value is optional; unparsable values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub geometry: PageGeometry,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup so parsing can be tested without
    /// touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PageGeometry::default();

        let geometry = PageGeometry {
            page_width: parse_or(&lookup, "PAGE_WIDTH", defaults.page_width)?,
            page_height: parse_or(&lookup, "PAGE_HEIGHT", defaults.page_height)?,
            margin_left: parse_or(&lookup, "PAGE_MARGIN_LEFT", defaults.margin_left)?,
            margin_top: parse_or(&lookup, "PAGE_MARGIN_TOP", defaults.margin_top)?,
            margin_right: parse_or(&lookup, "PAGE_MARGIN_RIGHT", defaults.margin_right)?,
            margin_bottom: parse_or(&lookup, "PAGE_MARGIN_BOTTOM", defaults.margin_bottom)?,
            footer_reservation: parse_or(
                &lookup,
                "PAGE_FOOTER_RESERVATION",
                defaults.footer_reservation,
            )?,
            auto_page_break_threshold: parse_optional(&lookup, "PAGE_BREAK_THRESHOLD")?,
            line_height: parse_or(&lookup, "PAGE_LINE_HEIGHT", defaults.line_height)?,
            label_column_width: parse_or(
                &lookup,
                "PAGE_LABEL_COLUMN_WIDTH",
                defaults.label_column_width,
            )?,
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            geometry,
        })
    }
}

fn parse_optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        _ => Ok(None),
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}
