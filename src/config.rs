// src/config.rs
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use anyhow::Context;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_INDEX_TEMPLATE: &str = "assets/index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub index_template: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match var("PORT") {
            Some(p) => p.parse().with_context(|| format!("invalid PORT {p:?}"))?,
            None => DEFAULT_PORT,
        };
        let host = match var("HOST") {
            Some(h) => h.parse().with_context(|| format!("invalid HOST {h:?}"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let index_template = var("INDEX_TEMPLATE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_TEMPLATE));

        Ok(Self {
            host,
            port,
            index_template,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[rstest]
    #[case::unset(&[], 8080)]
    #[case::empty(&[("PORT", "")], 8080)]
    #[case::blank(&[("PORT", "  ")], 8080)]
    #[case::explicit(&[("PORT", "9000")], 9000)]
    fn resolves_port(#[case] vars: &[(&str, &str)], #[case] expected: u16) {
        let config = Config::from_lookup(lookup(vars)).expect("config should resolve");

        assert_eq!(config.port, expected);
    }

    #[rstest]
    #[case("http")]
    #[case("70000")]
    #[case("-1")]
    fn rejects_unparseable_port(#[case] port: &str) {
        let outcome = Config::from_lookup(lookup(&[("PORT", port)]));

        assert!(outcome.is_err(), "expected {port:?} to be rejected");
    }

    #[rstest]
    fn defaults_bind_every_interface() {
        let config = Config::from_lookup(lookup(&[])).expect("config should resolve");

        assert_eq!(config.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.index_template, PathBuf::from("assets/index.html"));
    }

    #[rstest]
    fn honours_host_and_template_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("INDEX_TEMPLATE", "/srv/www/index.html"),
        ]))
        .expect("config should resolve");

        assert_eq!(config.addr(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.index_template, PathBuf::from("/srv/www/index.html"));
    }

    #[rstest]
    fn rejects_unparseable_host() {
        assert!(Config::from_lookup(lookup(&[("HOST", "localhost:80")])).is_err());
    }
}
