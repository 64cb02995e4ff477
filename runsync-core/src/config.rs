use std::fs::File;
use std::net::SocketAddr;
use std::net::ToSocketAddrs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

pub fn load<P: AsRef<Path>>(config_path: P) -> Arc<Config> {
    let config_path = config_path.as_ref();
    let reader = File::open(config_path).unwrap_or_else(|err| {
        panic!("Failed to open {}: {}", config_path.display(), err);
    });
    let config: Config = serde_yaml::from_reader(reader).unwrap_or_else(|err| {
        panic!("Failed to parse {}: {}", config_path.display(), err);
    });

    config.validate();

    Arc::new(config)
}

// result

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub boxart: BoxartConfig,
}

impl Config {
    fn validate(&self) {
        self.server.validate();
        self.tracker.validate();
        self.boxart.validate();
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_addrs")]
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub addrs: Vec<ServerAddr>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum ServerAddr {
    Http(String),
}

impl ServerConfig {
    fn default_addrs() -> Vec<ServerAddr> {
        vec![ServerAddr::Http("localhost:40780".to_string())]
    }

    pub fn http_addrs(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.addrs
            .iter()
            .map(|addr| match addr {
                ServerAddr::Http(addr) => addr,
            })
            .flat_map(|addr| match addr.to_socket_addrs() {
                Ok(addrs) => addrs.collect::<Vec<_>>(),
                Err(err) => {
                    tracing::error!(%err, %addr, "Failed to resolve");
                    vec![]
                }
            })
    }

    fn validate(&self) {
        assert!(
            !self.addrs.is_empty(),
            "config.server: `addrs` must be a non-empty list"
        );
        for addr in self.addrs.iter() {
            match addr {
                ServerAddr::Http(addr) => assert!(
                    !addr.is_empty(),
                    "config.server.addrs: `http` must be a non-empty string"
                ),
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addrs: Self::default_addrs(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    #[serde(default = "TrackerConfig::default_url")]
    pub url: String,
    #[serde(default = "TrackerConfig::default_event")]
    pub event: u32,
    #[serde(default = "TrackerConfig::default_poll_interval")]
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl TrackerConfig {
    fn default_url() -> String {
        "https://gamesdonequick.com/tracker/search".to_string()
    }

    fn default_event() -> u32 {
        17
    }

    fn default_poll_interval() -> Duration {
        Duration::from_secs(60)
    }

    fn validate(&self) {
        const POLL_INTERVAL_MIN: Duration = Duration::from_secs(1);

        assert!(
            !self.url.is_empty(),
            "config.tracker: `url` must be a non-empty string"
        );
        assert!(
            self.poll_interval >= POLL_INTERVAL_MIN,
            "config.tracker: `poll-interval` must be larger than or equal to {}",
            humantime::format_duration(POLL_INTERVAL_MIN)
        );
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            url: Self::default_url(),
            event: Self::default_event(),
            poll_interval: Self::default_poll_interval(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct BoxartConfig {
    #[serde(default = "BoxartConfig::default_url_template")]
    pub url_template: String,
    #[serde(default = "BoxartConfig::default_width")]
    pub width: u32,
    #[serde(default = "BoxartConfig::default_aspect_ratio")]
    pub aspect_ratio: f64,
    #[serde(default = "BoxartConfig::default_placeholder")]
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub placeholder: Option<PlaceholderConfig>,
    #[serde(default)]
    pub fallback_path: Option<String>,
}

/// Where the image provider's generic "no art" image comes from.
///
/// Defaults to the provider's 404 boxart.  `null` disables the substitution.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PlaceholderConfig {
    Url(String),
    Path(String),
}

impl BoxartConfig {
    fn default_url_template() -> String {
        "http://static-cdn.jtvnw.net/ttv-boxart/{name}-{width}x{height}.jpg".to_string()
    }

    fn default_width() -> u32 {
        469
    }

    fn default_aspect_ratio() -> f64 {
        1.397
    }

    fn default_placeholder() -> Option<PlaceholderConfig> {
        Some(PlaceholderConfig::Url(
            "https://static-cdn.jtvnw.net/ttv-static/404_boxart-{width}x{height}.jpg".to_string(),
        ))
    }

    pub fn height(&self) -> u32 {
        (self.width as f64 * self.aspect_ratio).round() as u32
    }

    fn validate(&self) {
        assert!(
            self.url_template.contains("{name}"),
            "config.boxart: `url-template` must contain {{name}}"
        );
        assert!(self.width > 0, "config.boxart: `width` must be larger than 0");
        assert!(
            self.aspect_ratio > 0.0,
            "config.boxart: `aspect-ratio` must be larger than 0"
        );
        match self.placeholder {
            Some(PlaceholderConfig::Url(ref url)) => assert!(
                !url.is_empty(),
                "config.boxart.placeholder: `url` must be a non-empty string"
            ),
            Some(PlaceholderConfig::Path(ref path)) => assert!(
                Path::new(path).is_file(),
                "config.boxart.placeholder: `path` must be a path to an existing file"
            ),
            None => (),
        }
        if let Some(ref path) = self.fallback_path {
            assert!(
                Path::new(path).is_file(),
                "config.boxart: `fallback-path` must be a path to an existing file"
            );
        }
    }
}

impl Default for BoxartConfig {
    fn default() -> Self {
        BoxartConfig {
            url_template: Self::default_url_template(),
            width: Self::default_width(),
            aspect_ratio: Self::default_aspect_ratio(),
            placeholder: Self::default_placeholder(),
            fallback_path: None,
        }
    }
}

// </coverage:exclude>
