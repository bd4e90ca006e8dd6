use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on retry attempts per request
const MAX_RETRIES_LIMIT: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.landing_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid landing-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "landing-url '{}' must use http or https",
            config.landing_url
        )));
    }

    if let Some(placeholder) = &config.author_placeholder {
        if placeholder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "author-placeholder cannot be blank; omit it instead".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_retries > MAX_RETRIES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= {}, got {}",
            MAX_RETRIES_LIMIT, config.max_retries
        )));
    }

    Ok(())
}

/// Validates crawl limits
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_categories == Some(0) {
        return Err(ConfigError::Validation(
            "max-categories must be >= 1 when set".to_string(),
        ));
    }

    if config.max_pages_per_category == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages-per-category must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
