//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "DEFAULT_URL" => {
            if !RE_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "DEFAULT_SIZE" | "MIN_SIZE" | "MAX_SIZE" => validate_int_range(value, 50, 2000)?,
        "DEBOUNCE_DELAY_MS" => validate_int_range(value, 0, 10_000)?,
        "RENDER_DELAY_MS" => validate_int_range(value, 0, 10_000)?,
        "RENDER_SYNC" => {
            if value != "signal" && value != "delay" {
                return Err("must be 'signal' or 'delay'".into());
            }
        }
        "LOGO_MARGIN" => validate_int_range(value, 0, 100)?,
        "LOGO_SIZE" => {
            let v: f64 = value.parse().map_err(|_| "must be a float")?;
            if !(v > 0.0 && v <= 1.0) {
                return Err("must be greater than 0.0 and at most 1.0".into());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Check that the size settings are ordered `MIN_SIZE <= DEFAULT_SIZE <= MAX_SIZE`.
pub fn validate_size_bounds(min: u32, default: u32, max: u32) -> Result<(), String> {
    if min > max {
        return Err(format!("MIN_SIZE ({min}) is larger than MAX_SIZE ({max})"));
    }
    if !(min..=max).contains(&default) {
        return Err(format!("DEFAULT_SIZE ({default}) must be between {min} and {max}"));
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(validate_setting("DEFAULT_URL", "https://example.com/menu").is_ok());
        assert!(validate_setting("DEFAULT_URL", "http://localhost:3000").is_ok());
        assert!(validate_setting("DEFAULT_URL", "ftp://example.com").is_err());
        assert!(validate_setting("DEFAULT_URL", "not a url").is_err());
    }

    #[test]
    fn test_size_ranges() {
        assert!(validate_setting("MAX_SIZE", "400").is_ok());
        assert!(validate_setting("MAX_SIZE", "10").is_err());
        assert!(validate_setting("MIN_SIZE", "abc").is_err());
    }

    #[test]
    fn test_delay_ranges() {
        assert!(validate_setting("DEBOUNCE_DELAY_MS", "0").is_ok());
        assert!(validate_setting("DEBOUNCE_DELAY_MS", "-1").is_err());
        assert!(validate_setting("RENDER_DELAY_MS", "20000").is_err());
    }

    #[test]
    fn test_render_sync_values() {
        assert!(validate_setting("RENDER_SYNC", "signal").is_ok());
        assert!(validate_setting("RENDER_SYNC", "delay").is_ok());
        assert!(validate_setting("RENDER_SYNC", "timer").is_err());
    }

    #[test]
    fn test_logo_size() {
        assert!(validate_setting("LOGO_SIZE", "0.4").is_ok());
        assert!(validate_setting("LOGO_SIZE", "1").is_ok());
        assert!(validate_setting("LOGO_SIZE", "0").is_err());
        assert!(validate_setting("LOGO_SIZE", "1.5").is_err());
    }

    #[test]
    fn test_size_bounds() {
        assert!(validate_size_bounds(150, 250, 400).is_ok());
        assert!(validate_size_bounds(400, 250, 150).is_err());
        assert!(validate_size_bounds(150, 500, 400).is_err());
    }

    #[test]
    fn test_unknown_keys_pass() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
