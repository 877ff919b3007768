use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// USDA FoodData Central search settings.
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub usda: UsdaConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "smarteats".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "smarteats-users".into()),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let usda = UsdaConfig {
            api_key: std::env::var("USDA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".into()),
            base_url: std::env::var("USDA_BASE_URL")
                .unwrap_or_else(|_| "https://api.nal.usda.gov/fdc/v1".into()),
            timeout_secs: env_parse("USDA_TIMEOUT_SECS", 5),
        };
        Ok(Self {
            database_url,
            jwt,
            usda,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_on_missing_or_garbage() {
        assert_eq!(env_parse::<u64>("SMARTEATS_TEST_SURELY_UNSET", 7), 7);
        std::env::set_var("SMARTEATS_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_parse::<i64>("SMARTEATS_TEST_GARBAGE", 60), 60);
        std::env::set_var("SMARTEATS_TEST_NUMBER", "15");
        assert_eq!(env_parse::<i64>("SMARTEATS_TEST_NUMBER", 60), 15);
    }
}
