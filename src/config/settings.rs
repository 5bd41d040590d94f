// Configuration structs

use serde::Deserialize;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key used for every completion call.
    pub api_key: String,
}

/// On-disk shape of `~/.quill/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_parses() {
        let file: ConfigFile = toml::from_str(r#"api_key = "gsk_test_123""#).unwrap();
        assert_eq!(file.api_key, "gsk_test_123");
    }

    #[test]
    fn test_config_file_requires_api_key() {
        assert!(toml::from_str::<ConfigFile>("").is_err());
    }
}
