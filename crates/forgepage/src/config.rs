use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{self, Format, Serialized},
};
use serde::{Deserialize, Serialize};

/// Service configuration, merged from defaults, the TOML file, and
/// `FORGEPAGE_*` environment variables.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP service listens on.
    pub listen: String,
    /// Base URL of the forge theme, ending in a slash.
    pub themeroot: String,
    /// Host assumed when a request carries no Host header.
    pub default_host: String,
    /// Directory with a replacement `page.html` template.
    pub template_dir: Option<PathBuf>,
    /// Entity-escape the fetched fragment instead of inlining it verbatim.
    pub escape_fragment: bool,
    /// Fragment fetch timeout; absent means unbounded.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: "127.0.0.1:8080".into(),
            themeroot: "http://r-forge.r-project.org/themes/rforge/".into(),
            default_host: "localhost".into(),
            template_dir: None,
            escape_fragment: false,
            fetch_timeout_secs: Some(10),
        }
    }
}

impl Config {
    const CONFIG_FILE: &str = "forgepage.toml";

    pub fn load(path: Option<&Path>) -> Result<Config, figment::Error> {
        let file = path.unwrap_or(Path::new(Self::CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(providers::Toml::file(file))
            .merge(providers::Env::prefixed("FORGEPAGE_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_inline_the_fragment_verbatim() {
        let config = Config::default();
        assert!(!config.escape_fragment);
        assert_eq!(config.themeroot, "http://r-forge.r-project.org/themes/rforge/");
    }

    #[test]
    fn file_values_override_defaults() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(providers::Toml::string(
                "listen = \"0.0.0.0:80\"\nescape_fragment = true\n",
            ))
            .extract()
            .unwrap();
        assert_eq!(config.listen, "0.0.0.0:80");
        assert!(config.escape_fragment);
        assert_eq!(config.default_host, "localhost");
    }
}
