use pagebuilder_document::SiteSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagebuilder.config.json";

/// Page files are `<name>.page.json`
pub const PAGE_EXTENSION: &str = ".page.json";

/// Pagebuilder configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing page files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory exported pages are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Site settings given to newly created pages
    #[serde(default)]
    pub site: SiteSettings,
}

fn default_src_dir() -> String {
    "pages".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            site: SiteSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "content",
            "outDir": "public",
            "site": { "siteName": "Trail Notes", "author": "Sam" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "content");
        assert_eq!(config.out_dir, "public");
        assert_eq!(config.site.site_name, "Trail Notes");
        assert_eq!(config.site.author, "Sam");
        assert_eq!(config.site.base_url, "https://yourdomain.com");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "pages");
        assert_eq!(config.out_dir, "dist");
        assert_eq!(config.site.site_name, "My Blog");

        let partial: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(partial.src_dir, "pages");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load("/nonexistent/pagebuilder/dir").unwrap();
        assert_eq!(config.out_dir, "dist");
    }
}
