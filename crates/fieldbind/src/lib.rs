//! fieldbind - bidirectional record/document binding
//!
//! Projects a nested JSON record onto the `data-field`/`data-list`/`data-item`
//! tagged nodes of a [`DomTree`], and reads trees and forms back into records.
//!
//! The pieces, leaves first:
//! - [`value`]: classifies a value as empty, scalar, nested or list
//! - [`path`]: dotted key paths and tag resolution
//! - [`widget`]: per-element read/write semantics
//! - [`Binder`]: recursive record binding, list rendering and scraping,
//!   templates and request orchestration
//! - [`form`]: urlencoded form bodies to nested records

pub mod binder;
pub mod config;
pub mod form;
mod list;
pub mod path;
pub mod request;
mod template;
pub mod value;
pub mod widget;

pub use binder::{BindOptions, Binder};
pub use config::{BindConfig, DEFAULT_FIELD_VALUE, Settings};
pub use form::{FormError, parse_form_body, serialize_form};
pub use path::{KeyPath, Resolver};
pub use request::{ApiCall, ChainFailure, ChainReport, Flow, FormSubmit, Submission};
pub use value::{BoundValue, Record};
pub use widget::{Widget, WidgetKind};

pub use fieldbind_dom::{DomError, DomTree, NodeId};
pub use fieldbind_net::{ApiClient, ApiConfig, NetError};

/// Binding error
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Net(#[from] NetError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl BindError {
    /// Message to surface to a user-facing error handler
    pub fn user_message(&self) -> String {
        match self {
            Self::Net(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type BindResult<T> = Result<T, BindError>;
