use std::net::IpAddr;

use axum_extra::extract::cookie::SameSite;

/// One year. Keeps token expiry and cookie max-age arithmetic in range.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub cookie: CookieConfig,
    pub bcrypt_cost: u32,
    pub member_role_id: Option<i32>,
    pub cors_origins: Vec<String>,
    pub max_body_size: usize,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    pub same_site: SameSite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn default_cookie(self) -> CookieConfig {
        match self {
            Environment::Development => CookieConfig {
                secure: false,
                same_site: SameSite::Lax,
            },
            Environment::Production => CookieConfig {
                secure: true,
                same_site: SameSite::Strict,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let db_max_connections: u32 = or("MULTIDEPORTIVO_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_DB_MAX_CONNECTIONS: {e}"))?;

        let token_ttl_hours: i64 = or("MULTIDEPORTIVO_TOKEN_TTL_HOURS", "24")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_TOKEN_TTL_HOURS: {e}"))?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(format!(
                "MULTIDEPORTIVO_TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {token_ttl_hours}"
            ));
        }

        let host: IpAddr = or("MULTIDEPORTIVO_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_HOST: {e}"))?;

        let port: u16 = or("MULTIDEPORTIVO_PORT", "8800")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_PORT: {e}"))?;

        let environment = match or("MULTIDEPORTIVO_ENV", "development").as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("Invalid MULTIDEPORTIVO_ENV: {other}")),
        };

        let mut cookie = environment.default_cookie();
        if let Some(secure) = lookup("MULTIDEPORTIVO_COOKIE_SECURE") {
            cookie.secure = parse_bool(&secure)
                .ok_or_else(|| format!("Invalid MULTIDEPORTIVO_COOKIE_SECURE: {secure}"))?;
        }
        if let Some(same_site) = lookup("MULTIDEPORTIVO_COOKIE_SAME_SITE") {
            cookie.same_site = match same_site.to_ascii_lowercase().as_str() {
                "strict" => SameSite::Strict,
                "lax" => SameSite::Lax,
                _ => {
                    return Err(format!(
                        "Invalid MULTIDEPORTIVO_COOKIE_SAME_SITE '{same_site}': expected strict or lax"
                    ));
                }
            };
        }
        if environment == Environment::Production && !cookie.secure {
            return Err("Insecure cookies are not allowed in production".to_string());
        }

        let bcrypt_cost: u32 = or("MULTIDEPORTIVO_BCRYPT_COST", "10")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_BCRYPT_COST: {e}"))?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(format!(
                "MULTIDEPORTIVO_BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}"
            ));
        }

        let member_role_id = match lookup("MULTIDEPORTIVO_MEMBER_ROLE_ID") {
            Some(v) if !v.trim().is_empty() => Some(
                v.trim()
                    .parse()
                    .map_err(|e| format!("Invalid MULTIDEPORTIVO_MEMBER_ROLE_ID: {e}"))?,
            ),
            _ => None,
        };

        let cors_origins: Vec<String> = or("MULTIDEPORTIVO_CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let max_body_size: usize = or("MULTIDEPORTIVO_MAX_BODY_SIZE", "5242880")
            .parse()
            .map_err(|e| format!("Invalid MULTIDEPORTIVO_MAX_BODY_SIZE: {e}"))?;

        let log_level = or("MULTIDEPORTIVO_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            db_max_connections,
            jwt_secret,
            token_ttl_hours,
            host,
            port,
            environment,
            cookie,
            bcrypt_cost,
            member_role_id,
            cors_origins,
            max_body_size,
            log_level,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
