//! Terminal box-model rendering.
//!
//! This package bundles the two workspace crates:
//!
//! - [`cellcss`]: the style sheet language, its parser and the cascade
//! - [`cellbox`]: documents, layout, tables and terminal output
//!
//! ```rust
//! use cellbox_rs::prelude::*;
//!
//! let mut doc = parse_markup("<p style='margin: 0'>hello <b>world</b></p>").unwrap();
//! let output = doc.render(&RenderConfig::default().with_viewport(12, 4));
//! assert_eq!(output.to_plain_text(), "hello world");
//! ```

pub use cellbox;
pub use cellcss;

/// The types most callers need.
pub mod prelude {
    pub use cellbox::ansi::to_ansi_string;
    pub use cellbox::markup::parse_markup;
    pub use cellbox::media::{MemoryLoader, TextConverter};
    pub use cellbox::table::{Cell, Table};
    pub use cellbox::{
        AssetLoader, CellboxError, Document, LineStyle, MediaConverter, NodeId, RenderConfig, RenderOutput,
        init_logger,
    };
    pub use cellcss::parser::parse_stylesheet;
}
