// src/config.rs

//! Repository build configuration
//!
//! Every knob has a default matching the classic layout of a jailbreak
//! repository hosted as static files:
//!
//! ```text
//! debs/            input archives
//! Packages         index
//! Packages.bz2     compressed index
//! descriptions/    per-package depiction pages
//! ```
//!
//! A TOML file may set any subset of fields; CLI flags override it.

use crate::compression::CompressionFormat;
use crate::depiction::DepictionTemplate;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// What to do when a single archive cannot be indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, leave the archive out of the index, keep going
    #[default]
    Skip,
    /// Fail the whole run on the first bad archive
    Abort,
}

/// Values substituted for control fields an archive does not set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FieldDefaults {
    pub architecture: String,
    pub version: String,
    pub section: String,
    pub maintainer: String,
    pub installed_size: String,
    pub description: String,
    pub name: String,
    pub author: String,
    pub sponsor: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            architecture: "iphoneos-arm64".to_string(),
            version: "1.0.0".to_string(),
            section: "Tweaks".to_string(),
            maintainer: "Unknown".to_string(),
            installed_size: "1024".to_string(),
            description: "No description".to_string(),
            name: String::new(),
            author: String::new(),
            sponsor: String::new(),
        }
    }
}

/// Full configuration of one repository build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RepoConfig {
    /// Directory scanned for package archives
    pub deb_dir: PathBuf,
    /// File extension (without the dot) an archive must have
    pub extension: String,
    /// Prefix written before the file name in `Filename:`; derived from
    /// `deb_dir` when unset
    pub pool_prefix: Option<String>,
    /// Index output path
    pub index_file: PathBuf,
    /// Bzip2 copy of the index
    pub compressed_file: PathBuf,
    /// Further compressed copies, written as `<index_file><ext>`
    pub extra_compression: Vec<String>,
    /// Root directory of generated depictions
    pub depiction_dir: PathBuf,
    /// URL path of the depiction root; the `depiction_dir` text when unset
    pub depiction_url_path: Option<String>,
    /// Absolute URL the repository is served from
    pub base_url: String,
    /// Value of every `Icon:` line
    pub icon_url: String,
    pub error_policy: ErrorPolicy,
    /// Extract and hash archives on a thread pool
    pub parallel: bool,
    /// Also generate the HTML depiction page
    pub html: bool,
    pub defaults: FieldDefaults,
    pub depiction: DepictionTemplate,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            deb_dir: PathBuf::from("debs"),
            extension: "deb".to_string(),
            pool_prefix: None,
            index_file: PathBuf::from("Packages"),
            compressed_file: PathBuf::from("Packages.bz2"),
            extra_compression: Vec::new(),
            depiction_dir: PathBuf::from("descriptions"),
            depiction_url_path: None,
            base_url: "https://example.github.io/repo".to_string(),
            icon_url: "file:///var/jb/Library/IconRepo/icon.png".to_string(),
            error_policy: ErrorPolicy::Skip,
            parallel: false,
            html: true,
            defaults: FieldDefaults::default(),
            depiction: DepictionTemplate::default(),
        }
    }
}

impl RepoConfig {
    /// Load a configuration file; omitted fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Check the configuration and normalize the base URL
    pub fn validate(mut self) -> Result<Self> {
        if self.deb_dir.as_os_str().is_empty() {
            return Err(Error::Config("deb-dir must not be empty".to_string()));
        }
        if self.index_file.as_os_str().is_empty() {
            return Err(Error::Config("index-file must not be empty".to_string()));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base-url '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base-url '{}' cannot be used as a base for links",
                self.base_url
            )));
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();

        self.extra_formats()?;
        Ok(self)
    }

    /// Parsed `extra_compression` entries
    pub fn extra_formats(&self) -> Result<Vec<CompressionFormat>> {
        self.extra_compression
            .iter()
            .map(|name| {
                match name.parse::<CompressionFormat>() {
                    Ok(CompressionFormat::None) | Err(_) => Err(Error::Config(format!(
                        "unsupported extra compression '{}'",
                        name
                    ))),
                    Ok(format) => Ok(format),
                }
            })
            .collect()
    }

    /// Output path of an extra compressed copy
    pub fn extra_output(&self, format: CompressionFormat) -> PathBuf {
        let mut name = self.index_file.clone().into_os_string();
        name.push(format.extension());
        PathBuf::from(name)
    }

    /// Prefix of the `Filename:` field
    ///
    /// A relative `deb_dir` is used as written (`pool` gives `./pool`). An
    /// absolute one, or one climbing out with `..`, contributes only its
    /// last component.
    pub fn pool_prefix(&self) -> String {
        if let Some(prefix) = &self.pool_prefix {
            return prefix.clone();
        }

        let escapes = self.deb_dir.is_absolute()
            || self
                .deb_dir
                .components()
                .any(|c| matches!(c, Component::ParentDir));
        let dir = if escapes {
            self.deb_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            self.deb_dir.to_string_lossy().into_owned()
        };

        let dir = dir.trim_start_matches("./").trim_matches('/');
        if dir.is_empty() || dir == "." {
            ".".to_string()
        } else {
            format!("./{}", dir)
        }
    }

    /// URL of the directory holding a package's depiction files
    pub fn depiction_dir_url(&self, package_id: &str) -> String {
        let path = match &self.depiction_url_path {
            Some(path) => path.clone(),
            None => self.depiction_dir.to_string_lossy().into_owned(),
        };
        let path = path.trim_start_matches("./").trim_matches('/');
        if path.is_empty() {
            format!("{}/{}/", self.base_url, package_id)
        } else {
            format!("{}/{}/{}/", self.base_url, path, package_id)
        }
    }

    /// Absolute URL of a file under the repository base
    pub fn asset_url(&self, relative: &str) -> String {
        format!("{}/{}", self.base_url, relative.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepoConfig::default();
        assert_eq!(config.deb_dir, PathBuf::from("debs"));
        assert_eq!(config.index_file, PathBuf::from("Packages"));
        assert_eq!(config.compressed_file, PathBuf::from("Packages.bz2"));
        assert_eq!(config.defaults.architecture, "iphoneos-arm64");
        assert_eq!(config.defaults.version, "1.0.0");
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
        assert_eq!(config.pool_prefix(), "./debs");
    }

    #[test]
    fn test_pool_prefix_follows_deb_dir() {
        let prefix = |deb_dir: &str| {
            RepoConfig {
                deb_dir: PathBuf::from(deb_dir),
                ..Default::default()
            }
            .pool_prefix()
        };

        assert_eq!(prefix("pool"), "./pool");
        assert_eq!(prefix("./pool/main/"), "./pool/main");
        assert_eq!(prefix("/srv/repo/pool"), "./pool");
        assert_eq!(prefix("../shared/pool"), "./pool");
        assert_eq!(prefix("."), ".");

        let config = RepoConfig {
            deb_dir: PathBuf::from("/srv/repo/pool"),
            pool_prefix: Some("./files".to_string()),
            ..Default::default()
        };
        assert_eq!(config.pool_prefix(), "./files");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RepoConfig = toml::from_str(
            r#"
base-url = "https://repo.example.com/"
error-policy = "abort"
extra-compression = ["gzip"]

[defaults]
section = "Utilities"
"#,
        )
        .unwrap();

        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.defaults.section, "Utilities");
        assert_eq!(config.defaults.version, "1.0.0");
        assert_eq!(config.deb_dir, PathBuf::from("debs"));

        let config = config.validate().unwrap();
        assert_eq!(config.base_url, "https://repo.example.com");
        assert_eq!(config.extra_formats().unwrap(), vec![CompressionFormat::Gzip]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.toml");
        fs::write(&path, "deb-dir = \"pool\"\nparallel = true\n").unwrap();

        let config = RepoConfig::load(&path).unwrap();
        assert_eq!(config.deb_dir, PathBuf::from("pool"));
        assert!(config.parallel);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.toml");
        fs::write(&path, "parallel = \"sometimes\"\n").unwrap();

        assert!(matches!(RepoConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = RepoConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = RepoConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_compression() {
        let config = RepoConfig {
            extra_compression: vec!["none".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_urls() {
        let config = RepoConfig {
            base_url: "https://repo.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.depiction_dir_url("demo"),
            "https://repo.example.com/descriptions/demo/"
        );

        let config = RepoConfig {
            depiction_dir: PathBuf::from("/srv/www/repo/depictions"),
            depiction_url_path: Some("/depictions/".to_string()),
            ..config
        };
        assert_eq!(
            config.depiction_dir_url("demo"),
            "https://repo.example.com/depictions/demo/"
        );
        assert_eq!(
            config.asset_url("/images/header.png"),
            "https://repo.example.com/images/header.png"
        );
        assert_eq!(
            config.extra_output(CompressionFormat::Xz),
            PathBuf::from("Packages.xz")
        );
    }
}
