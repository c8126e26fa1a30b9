use thiserror::Error;

use crate::document::NodeId;

#[derive(Error, Debug)]
pub enum CellboxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSS error: {0}")]
    Css(#[from] cellcss::CssError),

    #[error("Markup error at byte {offset}: {message}")]
    Markup { offset: usize, message: String },

    #[error("No node with id {0:?} in this document")]
    UnknownNode(NodeId),

    #[error("Invalid tree edit: {0}")]
    InvalidTree(String),

    #[error("Could not load asset `{uri}`: {reason}")]
    Asset { uri: String, reason: String },

    #[error("No conversion route from `{from}` to `{to}`")]
    Conversion { from: String, to: String },

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, CellboxError>;
