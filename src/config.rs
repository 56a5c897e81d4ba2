//------------ Config --------------------------------------------------------

//! Configuration for a simulator node's routing table.
//!
//! A configuration is read from a JSON file. Every field is optional:
//!
//! ```
//! use bgpsim_store::config::Config;
//!
//! let config = Config::from_json(r#"{
//!     "log": { "output": "", "level": "debug" },
//!     "static_routes": [
//!         { "network": "10.0.0.0/8", "next_hop_ip": "192.0.2.1",
//!           "type": "STATIC" }
//!     ]
//! }"#)?;
//!
//! let table = config.route_table()?;
//! assert_eq!(table.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::types::errors::ConfigError;
use crate::{Ipv4Prefix, RadixTrie};

pub const DEFAULT_LOCAL_ADMIN_COST: u32 = 220;

/// The top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub static_routes: Vec<StaticRouteConfig>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        debug!(
            "configuration has {} static routes",
            config.static_routes.len()
        );
        Ok(config)
    }

    /// Builds a routing table from the configured static routes. A network
    /// that appears more than once keeps the route listed last.
    pub fn route_table(&self) -> Result<RadixTrie<StaticRoute>, ConfigError> {
        let mut table = RadixTrie::new();
        for route in &self.static_routes {
            let route = StaticRoute::try_from(route)?;
            if table.insert(route.network, route).is_some() {
                debug!("duplicate static route replaced");
            }
        }
        Ok(table)
    }
}

//------------ LogConfig -----------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// File to append the log to. Logs go to the console when empty.
    pub output: String,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            output: String::new(),
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

//------------ StaticRouteConfig / StaticRoute -------------------------------

/// How a route was learned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteType {
    Local,
    Connected,
    Bgp,
    #[default]
    Static,
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteType::Local => write!(f, "local"),
            RouteType::Connected => write!(f, "connected"),
            RouteType::Bgp => write!(f, "bgp"),
            RouteType::Static => write!(f, "static"),
        }
    }
}

/// A static route as written in the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticRouteConfig {
    pub network: String,
    pub next_hop_ip: Option<Ipv4Addr>,
    pub next_hop_interface: Option<String>,
    pub administrative_cost: Option<u32>,
    pub tag: u32,
    pub weight: u32,
    pub metric: u32,
    #[serde(rename = "type")]
    pub route_type: RouteType,
}

/// A validated static route, the payload stored in the routing table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticRoute {
    pub network: Ipv4Prefix,
    pub next_hop_ip: Option<Ipv4Addr>,
    pub next_hop_interface: Option<String>,
    pub administrative_cost: u32,
    pub tag: u32,
    pub weight: u32,
    pub metric: u32,
    pub route_type: RouteType,
}

impl TryFrom<&StaticRouteConfig> for StaticRoute {
    type Error = ConfigError;

    fn try_from(cfg: &StaticRouteConfig) -> Result<Self, Self::Error> {
        let network = cfg
            .network
            .parse::<Ipv4Prefix>()
            .map_err(|_| ConfigError::Route(cfg.network.clone()))?;
        Ok(Self {
            network,
            next_hop_ip: cfg.next_hop_ip,
            next_hop_interface: cfg.next_hop_interface.clone(),
            administrative_cost: cfg
                .administrative_cost
                .unwrap_or(DEFAULT_LOCAL_ADMIN_COST),
            tag: cfg.tag,
            weight: cfg.weight,
            metric: cfg.metric,
            route_type: cfg.route_type,
        })
    }
}

impl fmt::Display for StaticRoute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.route_type)?;
        match (&self.next_hop_ip, &self.next_hop_interface) {
            (Some(ip), Some(iface)) => write!(f, " via {} dev {}", ip, iface)?,
            (Some(ip), None) => write!(f, " via {}", ip)?,
            (None, Some(iface)) => write!(f, " dev {}", iface)?,
            (None, None) => {}
        }
        write!(f, " [{}/{}]", self.administrative_cost, self.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() -> Result<(), ConfigError> {
        let config = Config::from_json("{}")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level_filter(), log::LevelFilter::Info);
        assert!(config.route_table()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_route_table() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_json(
            r#"{
            "log": { "output": "/tmp/bgpsim.log", "level": "trace" },
            "static_routes": [
                { "network": "0.0.0.0/0", "next_hop_ip": "192.0.2.1",
                  "next_hop_interface": "eth0" },
                { "network": "10.0.0.0/8", "next_hop_interface": "eth1",
                  "administrative_cost": 1, "type": "CONNECTED" },
                { "network": "10.0.0.0/8", "next_hop_interface": "eth2",
                  "type": "CONNECTED" }
            ]
        }"#,
        )?;
        assert_eq!(config.log.level_filter(), log::LevelFilter::Trace);

        let table = config.route_table()?;
        assert_eq!(table.len(), 2);

        let m = table.query("10.1.2.3".parse()?);
        let route = m.value().ok_or("no route")?;
        assert_eq!(route.route_type, RouteType::Connected);
        assert_eq!(route.next_hop_interface.as_deref(), Some("eth2"));
        assert_eq!(route.administrative_cost, DEFAULT_LOCAL_ADMIN_COST);
        assert_eq!(route.to_string(), "connected dev eth2 [220/0]");

        let m = table.query("8.8.8.8".parse()?);
        assert_eq!(
            m.value().map(|r| r.to_string()).as_deref(),
            Some("static via 192.0.2.1 dev eth0 [220/0]")
        );
        Ok(())
    }

    #[test]
    fn test_invalid_network() -> Result<(), ConfigError> {
        let config = Config::from_json(
            r#"{ "static_routes": [ { "network": "10.0.0.0/40" } ] }"#,
        )?;
        assert_eq!(
            config.route_table().err(),
            Some(ConfigError::Route("10.0.0.0/40".to_string()))
        );
        Ok(())
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json("{ \"log\": 3 }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_file("/nonexistent/bgpsim/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
