use dotenvy::dotenv;
use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use workouts_domain::models::hour::HourFactoryConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub hour_factory: HourFactoryConfig,
    pub handler_timeout: Duration,
    pub http_port: u16,
    pub metrics_addr: Option<SocketAddr>,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hour_factory: HourFactoryConfig::default(),
            handler_timeout: Duration::from_millis(5000),
            http_port: 8080,
            metrics_addr: None,
            database_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Missing or unparseable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|val| val.trim().parse::<u32>().ok());

        let hour_factory = HourFactoryConfig {
            max_weeks_in_the_future: number("WORKOUTS_MAX_WEEKS_IN_FUTURE")
                .unwrap_or(defaults.hour_factory.max_weeks_in_the_future),
            min_utc_hour: number("WORKOUTS_MIN_UTC_HOUR").unwrap_or(defaults.hour_factory.min_utc_hour),
            max_utc_hour: number("WORKOUTS_MAX_UTC_HOUR").unwrap_or(defaults.hour_factory.max_utc_hour),
        };

        let handler_timeout = lookup("WORKOUTS_HANDLER_TIMEOUT_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.handler_timeout);

        let http_port = lookup("WORKOUTS_HTTP_PORT")
            .and_then(|val| u16::from_str(val.trim()).ok())
            .unwrap_or(defaults.http_port);

        let metrics_addr = lookup("WORKOUTS_METRICS_ADDR")
            .and_then(|val| SocketAddr::from_str(val.trim()).ok());

        let database_url = lookup("DATABASE_URL").filter(|val| !val.trim().is_empty());

        Self {
            hour_factory,
            handler_timeout,
            http_port,
            metrics_addr,
            database_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.hour_factory, HourFactoryConfig::default());
        assert_eq!(config.handler_timeout, Duration::from_secs(5));
        assert_eq!(config.http_port, 8080);
        assert!(config.metrics_addr.is_none());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("WORKOUTS_MIN_UTC_HOUR", "8"),
            ("WORKOUTS_MAX_UTC_HOUR", "18"),
            ("WORKOUTS_MAX_WEEKS_IN_FUTURE", "4"),
            ("WORKOUTS_HANDLER_TIMEOUT_MS", "250"),
            ("WORKOUTS_HTTP_PORT", "3000"),
            ("WORKOUTS_METRICS_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/workouts"),
        ]);

        assert_eq!(config.hour_factory.min_utc_hour, 8);
        assert_eq!(config.hour_factory.max_utc_hour, 18);
        assert_eq!(config.hour_factory.max_weeks_in_the_future, 4);
        assert_eq!(config.handler_timeout, Duration::from_millis(250));
        assert_eq!(config.http_port, 3000);
        assert_eq!(
            config.metrics_addr,
            Some("127.0.0.1:9000".parse().unwrap())
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/workouts")
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("WORKOUTS_MIN_UTC_HOUR", "noon"),
            ("WORKOUTS_HTTP_PORT", "99999"),
            ("WORKOUTS_METRICS_ADDR", "nowhere"),
            ("DATABASE_URL", " "),
        ]);

        assert_eq!(config.hour_factory.min_utc_hour, 12);
        assert_eq!(config.http_port, 8080);
        assert!(config.metrics_addr.is_none());
        assert!(config.database_url.is_none());
    }
}
