use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ShopifyError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub shop: ShopSection,
    pub client: Option<ClientSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSection {
    /// `my-league.myshopify.com`; optional when `client.endpoint` is set.
    pub domain: Option<String>,
    pub api_version: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
    /// Full GraphQL endpoint, overriding the one derived from the shop.
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

fn env_placeholder() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopifyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ShopifyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHOPIFY_ACCESS_TOKEN})；未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn client_endpoint(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.endpoint.as_deref())
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.client_endpoint() {
            Some(endpoint) => validation::validate_url("client.endpoint", endpoint)?,
            None => {
                let domain = validation::validate_required_field("shop.domain", &self.shop.domain)?;
                validation::validate_non_empty_string("shop.domain", domain)?;
                validation::validate_resolved("shop.domain", domain)?;
                validation::validate_url("shop.domain", &self.graphql_endpoint())?;
            }
        }

        validation::validate_api_version("shop.api_version", &self.shop.api_version)?;

        validation::validate_non_empty_string("shop.access_token", &self.shop.access_token)?;
        validation::validate_resolved("shop.access_token", &self.shop.access_token)?;

        if let Some(timeout) = self.client.as_ref().and_then(|c| c.timeout_seconds) {
            validation::validate_range("client.timeout_seconds", timeout, 1, 300)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn graphql_endpoint(&self) -> String {
        match self.client_endpoint() {
            Some(endpoint) => endpoint.to_string(),
            None => format!(
                "https://{}/admin/api/{}/graphql.json",
                self.shop.domain.as_deref().unwrap_or_default(),
                self.shop.api_version
            ),
        }
    }

    fn access_token(&self) -> &str {
        &self.shop.access_token
    }

    fn timeout_seconds(&self) -> u64 {
        self.client
            .as_ref()
            .and_then(|c| c.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn user_agent(&self) -> Option<&str> {
        self.client.as_ref().and_then(|c| c.user_agent.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[shop]
domain = "rec-league.myshopify.com"
api_version = "2024-10"
access_token = "shpat_test"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.graphql_endpoint(),
            "https://rec-league.myshopify.com/admin/api/2024-10/graphql.json"
        );
        assert_eq!(config.timeout_seconds(), 30);
        assert_eq!(config.user_agent(), None);
    }

    #[test]
    fn test_endpoint_override() {
        let toml_content = r#"
[shop]
api_version = "unstable"
access_token = "shpat_test"

[client]
endpoint = "http://127.0.0.1:8080/graphql"
timeout_seconds = 5
user_agent = "league-scripts/1.0"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.graphql_endpoint(), "http://127.0.0.1:8080/graphql");
        assert_eq!(config.timeout_seconds(), 5);
        assert_eq!(config.user_agent(), Some("league-scripts/1.0"));
    }

    #[test]
    fn test_missing_domain_without_endpoint() {
        let toml_content = r#"
[shop]
api_version = "2024-10"
access_token = "shpat_test"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ShopifyError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHOPIFY_GQL_TEST_TOKEN", "shpat_from_env");
        let toml_content = r#"
[shop]
domain = "rec-league.myshopify.com"
api_version = "2024-10"
access_token = "${SHOPIFY_GQL_TEST_TOKEN}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.access_token(), "shpat_from_env");
        std::env::remove_var("SHOPIFY_GQL_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let toml_content = r#"
[shop]
domain = "rec-league.myshopify.com"
api_version = "2024-10"
access_token = "${SHOPIFY_GQL_DEFINITELY_UNSET}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ShopifyError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        let bad_version = r#"
[shop]
domain = "rec-league.myshopify.com"
api_version = "latest"
access_token = "shpat_test"
"#;
        assert!(TomlConfig::from_toml_str(bad_version).unwrap().validate().is_err());

        let bad_timeout = r#"
[shop]
domain = "rec-league.myshopify.com"
api_version = "2024-10"
access_token = "shpat_test"

[client]
timeout_seconds = 0
"#;
        assert!(TomlConfig::from_toml_str(bad_timeout).unwrap().validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[shop]\ndomain = \"rec-league.myshopify.com\"\napi_version = \"2025-01\"\naccess_token = \"shpat_file\""
        )
        .unwrap();
        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.shop.api_version, "2025-01");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[shop"),
            Err(ShopifyError::ConfigValidationError { .. })
        ));
    }
}
