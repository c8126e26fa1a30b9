//! Render configuration.
//!
//! ```
//! use cellbox::RenderConfig;
//!
//! let config = RenderConfig::default().with_viewport(100, 30).with_user_agent_styles(false);
//! assert_eq!(config.width, 100);
//! assert!(!config.user_agent_styles);
//! ```

use cellcss::types::LengthContext;
use cellcss::MediaContext;

/// Everything a render depends on besides the document itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Viewport width in cells.
    pub width: usize,
    /// Viewport height in cells.
    pub height: usize,
    /// Size of one cell in CSS pixels, used to convert `px` lengths.
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    /// Narrowest column a table may shrink a column to.
    pub min_column_width: usize,
    /// Drawn at the cut when `overflow-x: auto` truncates a line.
    pub overflow_marker: char,
    /// Whether the built-in user agent style sheet takes part in the cascade.
    pub user_agent_styles: bool,
    /// When set, margins at the document edges collapse away instead of
    /// moving onto the root box.
    pub collapse_root_margin: bool,
    /// Prefix for relative `href` and `src` values.
    pub base_uri: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            cell_width_px: 10.0,
            cell_height_px: 20.0,
            min_column_width: 2,
            overflow_marker: '▹',
            user_agent_styles: true,
            collapse_root_margin: false,
            base_uri: None,
        }
    }
}

impl RenderConfig {
    pub fn with_viewport(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_cell_size(mut self, width_px: f64, height_px: f64) -> Self {
        self.cell_width_px = width_px;
        self.cell_height_px = height_px;
        self
    }

    pub fn with_min_column_width(mut self, width: usize) -> Self {
        self.min_column_width = width;
        self
    }

    pub fn with_overflow_marker(mut self, marker: char) -> Self {
        self.overflow_marker = marker;
        self
    }

    pub fn with_user_agent_styles(mut self, enabled: bool) -> Self {
        self.user_agent_styles = enabled;
        self
    }

    pub fn with_collapse_root_margin(mut self, collapse: bool) -> Self {
        self.collapse_root_margin = collapse;
        self
    }

    pub fn with_base_uri(mut self, base: impl Into<String>) -> Self {
        self.base_uri = Some(base.into());
        self
    }

    /// The media features `@media` conditions are evaluated against.
    pub fn media_context(&self) -> MediaContext {
        MediaContext {
            width: self.width as f64,
            height: self.height as f64,
            cell_width_px: self.cell_width_px,
            cell_height_px: self.cell_height_px,
        }
    }

    /// Length conversion context with the given available space.
    pub fn length_context(&self, available: Option<f64>) -> LengthContext {
        LengthContext {
            available,
            viewport_width: self.width as f64,
            viewport_height: self.height as f64,
            cell_width_px: self.cell_width_px,
            cell_height_px: self.cell_height_px,
        }
    }

    /// Joins a relative reference onto [`base_uri`](Self::base_uri).
    ///
    /// ```
    /// use cellbox::RenderConfig;
    ///
    /// let config = RenderConfig::default().with_base_uri("https://example.com/docs/index.html");
    /// assert_eq!(config.resolve_uri("img/a.png"), "https://example.com/docs/img/a.png");
    /// assert_eq!(config.resolve_uri("/b.png"), "https://example.com/b.png");
    /// assert_eq!(config.resolve_uri("data:text/plain,x"), "data:text/plain,x");
    /// ```
    pub fn resolve_uri(&self, reference: &str) -> String {
        let Some(base) = self.base_uri.as_deref() else {
            return reference.to_string();
        };
        if reference.contains("://") || reference.starts_with("data:") || reference.starts_with('#') {
            return reference.to_string();
        }
        if let Some(path) = reference.strip_prefix('/') {
            let origin_end = base
                .find("://")
                .and_then(|scheme| base[scheme + 3..].find('/').map(|i| scheme + 3 + i))
                .unwrap_or(base.len());
            return format!("{}/{}", &base[..origin_end], path);
        }
        let dir = match base.rfind('/') {
            Some(i) if !base[..i].ends_with('/') => &base[..=i],
            _ => return format!("{}/{}", base.trim_end_matches('/'), reference),
        };
        format!("{dir}{reference}")
    }
}
