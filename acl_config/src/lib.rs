use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// Tool and path overrides read from `Acl.toml` in the invocation directory.
/// Every field has a default, so an absent file or section still produces a
/// usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    pub build: BuildConfig,
    pub setup: SetupConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Scratch directory for generated build files and artifacts
    pub build_dir: PathBuf,
    /// Configuration generator invoked against the parent directory
    pub generator: String,
    /// Build driver invoked inside the build directory
    pub driver: String,
    /// Compiled binary produced by the driver, relative to the build directory
    pub artifact: String,
    /// System-wide install location for the binary
    pub install_to: String,
    /// Privilege escalation tool for the install copy
    pub elevate: String,
    /// Alternative escalation tool, selected with --use-doas
    pub elevate_alt: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_dir: "build".into(),
            generator: "cmake".into(),
            driver: "make".into(),
            artifact: "./ACL".into(),
            install_to: "/bin/acl".into(),
            elevate: "sudo".into(),
            elevate_alt: "doas".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Standard library source tree
    pub lib_dir: PathBuf,
    /// Destination below the home directory
    pub dest_suffix: PathBuf,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            lib_dir: "./lib".into(),
            dest_suffix: ".acl/std".into(),
        }
    }
}

impl AclConfig {
    pub const CONFIG_FILE: &'static str = "Acl.toml";

    /// Load `Acl.toml` from `dir`. A missing file is not an error, the
    /// defaults stand in for it.
    pub fn load(dir: &Path) -> Result<AclConfig, ConfigError> {
        let path = dir.join(AclConfig::CONFIG_FILE);
        if !path.exists() {
            return Ok(AclConfig::default());
        }

        let mut file = File::open(&path).map_err(|_| ConfigError::FileReadError(path.clone()))?;

        let mut config_file = String::new();
        file.read_to_string(&mut config_file)
            .map_err(|_| ConfigError::FileReadError(path.clone()))?;

        toml::from_str(&config_file).map_err(|_| ConfigError::MalformedFormat(path))
    }
}

#[derive(Debug, Clone)]
pub enum ConfigError {
    FileReadError(PathBuf),
    MalformedFormat(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileReadError(p) => write!(f, "Could not read {:?}", p),
            ConfigError::MalformedFormat(p) => write!(f, "Malformed config in {:?}", p),
        }
    }
}
