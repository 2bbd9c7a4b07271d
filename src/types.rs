// src/types.rs
use axum::http::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::bad;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ManifestReq {
    pub ipa: String,
    pub identifier: String,
    pub version: String,
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QrReq {
    pub manifest: String,
}

impl ManifestReq {
    pub fn validate(&self) -> Result<(), (StatusCode, String)> {
        if !is_https_url(&self.ipa) {
            return Err(bad("ipa"));
        }
        if self.identifier.trim().is_empty() {
            return Err(bad("identifier"));
        }
        if self.version.trim().is_empty() {
            return Err(bad("version"));
        }
        if self.title.trim().is_empty() {
            return Err(bad("title"));
        }
        Ok(())
    }
}

impl QrReq {
    pub fn validate(&self) -> Result<(), (StatusCode, String)> {
        if !is_https_url(&self.manifest) {
            return Err(bad("manifest"));
        }
        Ok(())
    }
}

/// Devices refuse OTA installs over anything but TLS.
fn is_https_url(s: &str) -> bool {
    Url::parse(s)
        .map(|u| u.scheme() == "https" && u.host().is_some())
        .unwrap_or(false)
}
