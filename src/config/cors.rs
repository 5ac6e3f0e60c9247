use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins() {
        // SAFETY: tests in this module run single-threaded over env access
        unsafe { env::remove_var("CORS_ALLOWED_ORIGINS") };
        let config = CorsConfig::from_env();
        assert_eq!(config.allowed_origins, vec!["http://localhost:5173"]);
    }
}
