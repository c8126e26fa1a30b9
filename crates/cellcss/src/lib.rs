//! # cellcss - style sheets for character-cell layout
//!
//! The style language used by the `cellbox` rendering engine: a practical
//! subset of CSS whose lengths resolve to terminal cells.
//!
//! - **Parsing**: Convert style sheet source into a structured [`StyleSheet`](parser::StyleSheet)
//! - **Cascade**: Match selectors against elements and order declarations by
//!   specificity, source order and `!important`
//! - **Types**: A typed property schema folded into a [`ComputedStyle`]
//!
//! ## Quick Start
//!
//! ```rust
//! use cellcss::parser::parse_stylesheet;
//! use cellcss::parser::cascade::{compute_style, ElementMeta};
//! use cellcss::parser::media::MediaContext;
//! use cellcss::types::{FontWeight, RgbaColor};
//!
//! let source = r#"
//!     h1 { font-weight: bold; }
//!     h1 { color: red; }
//!
//!     @media (max-width: 40) {
//!         h1 { color: blue; }
//!     }
//! "#;
//!
//! let stylesheet = parse_stylesheet(source).expect("valid CSS");
//! assert_eq!(stylesheet.rules.len(), 3);
//!
//! let h1 = ElementMeta::new("h1");
//! let style = compute_style(&h1, &[], &stylesheet, &MediaContext::new(80.0, 24.0), None);
//! assert_eq!(style.font_weight, Some(FontWeight::Bold));
//! assert_eq!(style.color, Some(RgbaColor::rgb(255, 0, 0)));
//! ```
//!
//! ## Supported Features
//!
//! ### Selectors
//! - Type, universal, class and ID selectors: `p`, `*`, `.note`, `#main`
//! - Attribute tests: `[open]`, `[type=text]`, `[href^="http"]`, `*=`, `$=`, `~=`, `|=`
//! - Pseudo-classes: `:first-child`, `:last-child`, `:only-child`, `:nth-child()`, `:link`
//! - Pseudo-elements: `::before`, `::after`, `::marker`
//! - Descendant and child combinators: `ul li`, `ol > li`
//!
//! ### Units
//! - Cells (a bare number): `10`
//! - Percentage of the containing block: `50%`
//! - Viewport: `50vw`, `100vh`
//! - Font relative, one cell wide: `2em`, `1rem`, `3ch`
//! - Pixels through the cell size: `20px`
//! - Fraction: `1fr`
//! - Keywords: `auto`, `min-content`, `max-content`
//!
//! ### At-rules
//! - `@media` with types, `not`, `and`, `or` and width/height/aspect-ratio features
//! - Other at-rules are skipped
//!
//! ## Modules
//!
//! - [`parser`]: Parsing, media conditions and the cascade
//! - [`types`]: Colours, lengths, keywords and the property schema
//! - [`error`]: Error types for parsing failures

pub mod error;
pub mod parser;
pub mod types;

pub use error::CssError;
pub use parser::cascade::ElementMeta;
pub use parser::media::{MediaContext, MediaQuery};
pub use types::ComputedStyle;
