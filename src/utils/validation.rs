use crate::utils::error::{ExpandError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ExpandError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("api_url", "https://api-ssl.bitly.com").is_ok());
        assert!(validate_url("api_url", "http://localhost:8080").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(validate_url("api_url", "ftp://example.com").is_err());
        assert!(validate_url("api_url", "not a url").is_err());
        assert!(validate_url("api_url", "").is_err());
    }

    #[test]
    fn rejects_empty_paths() {
        assert!(validate_path("input_path", "").is_err());
        assert!(validate_path("input_path", "data/shortened_links").is_ok());
    }

    #[test]
    fn range_check_is_inclusive() {
        assert!(validate_range("politeness_secs", 0u64, 0, 60).is_ok());
        assert!(validate_range("politeness_secs", 60u64, 0, 60).is_ok());
        assert!(validate_range("politeness_secs", 61u64, 0, 60).is_err());
    }

    #[test]
    fn positive_number_floor() {
        assert!(validate_positive_number("batch_size", 0, 1).is_err());
        assert!(validate_positive_number("batch_size", 15, 1).is_ok());
    }
}
