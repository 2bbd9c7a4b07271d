// src/manifest.rs
use askama::Template;

use crate::types::ManifestReq;

pub const FILENAME: &str = "manifest.plist";

/// Over-the-air install property list for one package.
///
/// `.plist` is not an extension askama escapes by default, so the escaper is
/// named explicitly; every field comes out XML-safe.
#[derive(Template)]
#[template(path = "manifest.plist", escape = "html")]
struct ManifestTemplate<'a> {
    ipa: &'a str,
    identifier: &'a str,
    version: &'a str,
    title: &'a str,
}

pub fn render(req: &ManifestReq) -> askama::Result<String> {
    ManifestTemplate {
        ipa: &req.ipa,
        identifier: &req.identifier,
        version: &req.version,
        title: &req.title,
    }
    .render()
}
