//! Asset loading and media conversion.
//!
//! Fetching bytes and turning them into something a terminal can show are
//! both done by collaborators outside the engine. [`Document::load_assets`]
//! awaits them for every image in the document before layout, which itself
//! never blocks. Failures are logged and leave the asset marked missing; the
//! layout then draws the alt text placeholder instead.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};

use crate::document::{AssetState, Document, NodeId};
use crate::error::{CellboxError, Result};
use crate::grapheme::{byte_index_at_width, display_width};

/// The format every image is converted to before layout.
pub const TARGET_FORMAT: &str = "ansi";

/// Fetches the bytes behind a resolved URI.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn load(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Converts media between formats.
///
/// `cols` and `rows` are the cell size the result should fit, when known.
#[async_trait]
pub trait MediaConverter: Send + Sync {
    async fn convert(
        &self,
        data: &[u8],
        from: &str,
        to: &str,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Result<String>;
}

/// Serves assets from memory, plus non-base64 `data:` URIs.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    assets: HashMap<String, Vec<u8>>,
    latency: Option<Duration>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, uri: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(uri, data);
        self
    }

    pub fn insert(&mut self, uri: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.assets.insert(uri.into(), data.into());
    }

    /// Delays every load, to simulate a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl AssetLoader for MemoryLoader {
    async fn load(&self, uri: &str) -> Result<Vec<u8>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(data) = self.assets.get(uri) {
            return Ok(data.clone());
        }
        if let Some(payload) = data_uri_payload(uri) {
            return payload;
        }
        Err(CellboxError::Asset {
            uri: uri.to_string(),
            reason: "not found".to_string(),
        })
    }
}

fn data_uri_payload(uri: &str) -> Option<Result<Vec<u8>>> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    if header.ends_with(";base64") {
        return Some(Err(CellboxError::Asset {
            uri: uri.chars().take(32).collect(),
            reason: "base64 data URIs are not supported".to_string(),
        }));
    }
    Some(Ok(percent_decode(payload)))
}

fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let hex = |b: u8| (b as char).to_digit(16).map(|d| d as u8);
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

/// Converts UTF-8 text to itself, cropped to the requested size.
///
/// Any other source format has no route.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

#[async_trait]
impl MediaConverter for TextConverter {
    async fn convert(
        &self,
        data: &[u8],
        from: &str,
        to: &str,
        cols: Option<usize>,
        rows: Option<usize>,
    ) -> Result<String> {
        let routable = matches!(from, "text" | "ansi") && matches!(to, "text" | "ansi");
        if !routable {
            return Err(CellboxError::Conversion {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let text = std::str::from_utf8(data).map_err(|_| CellboxError::Conversion {
            from: "binary".to_string(),
            to: to.to_string(),
        })?;
        let lines = text
            .lines()
            .take(rows.unwrap_or(usize::MAX))
            .map(|line| match cols {
                Some(cols) if display_width(line) > cols => &line[..byte_index_at_width(line, cols)],
                _ => line,
            })
            .collect::<Vec<_>>();
        Ok(lines.join("\n"))
    }
}

/// Guesses a media format from a URI's `data:` type or file extension.
///
/// ```
/// use cellbox::media::format_of;
///
/// assert_eq!(format_of("https://x.org/a/logo.PNG?v=2"), "png");
/// assert_eq!(format_of("data:text/plain,hello"), "text");
/// assert_eq!(format_of("notes.txt"), "text");
/// ```
pub fn format_of(uri: &str) -> String {
    if let Some(rest) = uri.strip_prefix("data:") {
        let mime = rest.split([',', ';']).next().unwrap_or("");
        return match mime {
            "" | "text/plain" => "text".to_string(),
            "image/svg+xml" => "svg".to_string(),
            other => other.rsplit('/').next().unwrap_or(other).to_string(),
        };
    }
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "txt" => "text".to_string(),
        Some(ext) if ext == "jpeg" => "jpg".to_string(),
        Some(ext) => ext,
        None => "unknown".to_string(),
    }
}

impl Document {
    /// Loads and converts the source of every `img` in the document.
    ///
    /// Loads run concurrently; conversions follow once every load has
    /// finished. URIs already known to the document are skipped, so calling
    /// this again only fetches what is new. Returns the number of assets
    /// that loaded.
    pub async fn load_assets(&mut self, loader: &dyn AssetLoader, converter: &dyn MediaConverter) -> usize {
        let mut wanted: Vec<(String, Option<usize>, Option<usize>)> = Vec::new();
        for img in self.find_all("img") {
            let Some(uri) = self.image_source(img) else {
                continue;
            };
            if self.assets.contains_key(&uri) || wanted.iter().any(|(u, _, _)| *u == uri) {
                continue;
            }
            let (cols, rows) = self.image_cell_size(img);
            wanted.push((uri, cols, rows));
        }
        if wanted.is_empty() {
            return 0;
        }
        debug!("loading {} asset(s)", wanted.len());

        let loads = join_all(wanted.iter().map(|(uri, _, _)| loader.load(uri))).await;

        let conversions = join_all(wanted.iter().zip(&loads).map(|((uri, cols, rows), loaded)| async move {
            match loaded {
                Ok(data) => {
                    let from = format_of(uri);
                    Some(converter.convert(data, &from, TARGET_FORMAT, *cols, *rows).await)
                }
                Err(_) => None,
            }
        }))
        .await;

        let mut loaded_count = 0;
        for (((uri, _, _), loaded), converted) in wanted.into_iter().zip(loads).zip(conversions) {
            let state = match loaded {
                Ok(data) => {
                    loaded_count += 1;
                    let rendered = match converted {
                        Some(Ok(text)) => Some(text),
                        Some(Err(err)) => {
                            warn!("no rendering for `{uri}`: {err}");
                            None
                        }
                        None => None,
                    };
                    AssetState::Loaded {
                        data: Arc::new(data),
                        rendered,
                    }
                }
                Err(err) => {
                    warn!("asset `{uri}` is missing: {err}");
                    AssetState::Missing(err.to_string())
                }
            };
            self.set_asset(uri, state);
        }
        loaded_count
    }

    /// The cell size an image is styled to, if any.
    fn image_cell_size(&self, img: NodeId) -> (Option<usize>, Option<usize>) {
        let theme = self.theme(img);
        let config = self.config();
        let across = config.length_context(Some(config.width as f64));
        let down = config.length_context(Some(config.height as f64));
        (theme.width(&across), theme.height(&down))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_loader() {
        let loader = MemoryLoader::new().with_asset("a.txt", "hello");
        assert_eq!(loader.load("a.txt").await.unwrap(), b"hello");
        assert_eq!(loader.load("data:,a%20b").await.unwrap(), b"a b");
        assert!(matches!(
            loader.load("b.txt").await,
            Err(CellboxError::Asset { .. })
        ));
        assert!(loader.load("data:image/png;base64,AAAA").await.is_err());
    }

    #[tokio::test]
    async fn test_text_converter_crops() {
        let out = TextConverter
            .convert("one two\nthree\nfour".as_bytes(), "text", "ansi", Some(3), Some(2))
            .await
            .unwrap();
        assert_eq!(out, "one\nthr");

        let err = TextConverter.convert(b"\x89PNG", "png", "ansi", None, None).await;
        assert!(matches!(err, Err(CellboxError::Conversion { .. })));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("a%2Cb%"), b"a,b%");
        assert_eq!(percent_decode("%zz"), b"%zz");
    }
}
