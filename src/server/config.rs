use chrono::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWT_EXPIRES_IN: &str = "24h";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_CAFE_NAME: &str = "SiipCoffee";
const DEFAULT_CAFE_ADDRESS: &str = "Jl. Cafe No. 123, Jakarta";
const DEFAULT_CAFE_PHONE: &str = "+62 812-3456-7890";

pub struct Config {
    pub database_url: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_expires_in: Duration,

    /// Empty key disables the remote concierge; chat falls back to keyword replies.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,

    pub cafe_name: String,
    pub cafe_address: String,
    pub cafe_phone: String,

    pub seed_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "PORT".to_string(),
                    value,
                })?,
            Err(_) => DEFAULT_PORT,
        };

        let expires_in = env_or("JWT_EXPIRES_IN", DEFAULT_JWT_EXPIRES_IN);
        let jwt_expires_in =
            parse_duration(&expires_in).ok_or_else(|| ConfigError::InvalidEnvVar {
                name: "JWT_EXPIRES_IN".to_string(),
                value: expires_in.clone(),
            })?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            port,
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?,
            jwt_expires_in,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            cafe_name: env_or("CAFE_NAME", DEFAULT_CAFE_NAME),
            cafe_address: env_or("CAFE_ADDRESS", DEFAULT_CAFE_ADDRESS),
            cafe_phone: env_or("CAFE_PHONE", DEFAULT_CAFE_PHONE),
            seed_data: std::env::var("SEED_DATA")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses `<n>{s,m,h,d}` into a duration. A bare number is read as hours.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let (digits, unit) = match value.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&value[..idx], c.to_ascii_lowercase()),
        _ => (value, 'h'),
    };

    let amount: i64 = digits.trim().parse().ok()?;
    if amount <= 0 {
        return None;
    }

    match unit {
        's' => Some(Duration::seconds(amount)),
        'm' => Some(Duration::minutes(amount)),
        'h' => Some(Duration::hours(amount)),
        'd' => Some(Duration::days(amount)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duration_units() {
        assert_eq!(parse_duration("30s"), Some(Duration::seconds(30)));
        assert_eq!(parse_duration("15m"), Some(Duration::minutes(15)));
        assert_eq!(parse_duration("24h"), Some(Duration::hours(24)));
        assert_eq!(parse_duration("7d"), Some(Duration::days(7)));
        assert_eq!(parse_duration("12"), Some(Duration::hours(12)));
    }

    #[test]
    fn rejects_invalid_durations() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("0h"), None);
        assert_eq!(parse_duration("-5m"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("abc"), None);
    }
}
