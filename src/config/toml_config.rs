use crate::domain::model::PatternCategory;
use crate::patterns::behavioral::iterator::NetworkKind;
use crate::patterns::creational::factory_method::Platform;
use crate::patterns::structural::decorator::Channel;
use crate::patterns::DemoSettings;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_ip_address, validate_non_empty_string, validate_one_of, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const NETWORKS: [&str; 2] = ["facebook", "linkedin"];
const PLATFORMS: [&str; 3] = ["windows", "linux", "mac"];

/// Every section is optional; missing ones keep the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: Option<CatalogSection>,
    pub chain: Option<ChainSection>,
    pub iterator: Option<IteratorSection>,
    pub decorator: Option<DecoratorSection>,
    pub factory: Option<FactorySection>,
    pub proxy: Option<ProxySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub patterns: Option<Vec<String>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSection {
    pub blacklisted_ips: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IteratorSection {
    pub network: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoratorSection {
    pub channels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorySection {
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxySection {
    pub latency_ms: Option<u64>,
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${BLOCKED_IP})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn patterns(&self) -> &[String] {
        self.catalog
            .as_ref()
            .and_then(|c| c.patterns.as_deref())
            .unwrap_or(&[])
    }

    pub fn category(&self) -> Result<Option<PatternCategory>> {
        self.catalog
            .as_ref()
            .and_then(|c| c.category.as_deref())
            .map(str::parse)
            .transpose()
    }

    /// Settings for the configurable demos, falling back to defaults per section.
    pub fn demo_settings(&self) -> Result<DemoSettings> {
        let mut settings = DemoSettings::default();

        if let Some(chain) = &self.chain {
            settings.blacklisted_ips =
                validate_required_field("chain.blacklisted_ips", &chain.blacklisted_ips)?.clone();
        }
        if let Some(iterator) = &self.iterator {
            let network = validate_required_field("iterator.network", &iterator.network)?;
            settings.network = parse_network(network)?;
        }
        if let Some(decorator) = &self.decorator {
            settings.channels = validate_required_field("decorator.channels", &decorator.channels)?
                .iter()
                .map(|channel| channel.parse::<Channel>())
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(factory) = &self.factory {
            let platform = validate_required_field("factory.platform", &factory.platform)?;
            settings.platform = parse_platform(platform)?;
        }
        if let Some(proxy) = &self.proxy {
            let latency_ms = validate_required_field("proxy.latency_ms", &proxy.latency_ms)?;
            settings.proxy_latency = Duration::from_millis(*latency_ms);
        }

        Ok(settings)
    }
}

fn parse_network(value: &str) -> Result<NetworkKind> {
    validate_one_of("iterator.network", value, &NETWORKS)?;
    Ok(match value {
        "linkedin" => NetworkKind::LinkedIn,
        _ => NetworkKind::Facebook,
    })
}

fn parse_platform(value: &str) -> Result<Platform> {
    validate_one_of("factory.platform", value, &PLATFORMS)?;
    Platform::ALL
        .into_iter()
        .find(|platform| platform.as_str() == value)
        .ok_or_else(|| CatalogError::InvalidConfigValueError {
            field: "factory.platform".to_string(),
            value: value.to_string(),
            reason: format!("Allowed values: {}", PLATFORMS.join(", ")),
        })
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        for pattern in self.patterns() {
            validate_non_empty_string("catalog.patterns", pattern)?;
        }
        self.category()?;

        let settings = self.demo_settings()?;
        for ip in &settings.blacklisted_ips {
            validate_ip_address("chain.blacklisted_ips", ip)?;
        }

        if self.decorator.is_some() && settings.channels.is_empty() {
            return Err(CatalogError::ConfigValidationError {
                field: "decorator.channels".to_string(),
                message: "At least one channel is required".to_string(),
            });
        }

        Ok(())
    }
}
