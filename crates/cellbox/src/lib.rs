//! # cellbox - box-model layout for character cells
//!
//! Renders HTML-like documents styled with [`cellcss`] into rows of styled
//! terminal cells: a small browser pipeline (cascade, margin collapsing,
//! inline line breaking, floats, tables) measured in cells instead of
//! pixels.
//!
//! ## Quick Start
//!
//! ```rust
//! use cellbox::{RenderConfig, markup::parse_markup};
//!
//! let mut doc = parse_markup(r#"
//!     <style>h1 { border-bottom: none; padding: 0; margin: 0 }</style>
//!     <h1>Title</h1>
//!     <ul style="margin: 0"><li>one</li><li>two</li></ul>
//! "#).expect("well-formed markup");
//!
//! let output = doc.render(&RenderConfig::default().with_viewport(20, 10));
//! assert_eq!(output.to_plain_text(), "Title\n • one\n • two");
//! ```
//!
//! ## Modules
//!
//! - [`line_style`], [`box_drawing`], [`grid_style`]: line weights, glyph
//!   resolution and the 4×4 border grids built from them
//! - [`segment`], [`strip`], [`text`]: styled text runs and the line
//!   operations layout is made of (wrap, align, pad, border, paste)
//! - [`table`]: the tabular layout engine with row and column spans
//! - [`document`], [`markup`]: the document arena and a strict markup reader
//! - [`theme`]: cascade results per node, with the user agent style sheet
//! - [`media`]: asynchronous asset loading and media conversion
//! - [`output`], [`ansi`]: render results and their terminal encoding
//! - [`config`], [`error`]: render settings and error types

pub mod ansi;
pub mod box_drawing;
pub mod config;
pub mod document;
pub mod edges;
pub mod error;
mod grapheme;
pub mod grid_style;
mod layout;
pub mod line_style;
mod log_init;
pub mod markup;
pub mod media;
pub mod output;
pub mod segment;
pub mod strip;
pub mod table;
pub mod text;
pub mod theme;

pub use box_drawing::{Junction, resolve_glyph};
pub use config::RenderConfig;
pub use document::{Document, NodeId};
pub use error::{CellboxError, Result};
pub use grid_style::{GridStyle, Mask};
pub use line_style::LineStyle;
pub use log_init::init_logger;
pub use media::{AssetLoader, MediaConverter};
pub use output::RenderOutput;
pub use theme::Theme;

// Re-export the log crate so callers can filter on the same facade.
pub use log;
