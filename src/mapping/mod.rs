//! The field-mapping editor core.
//!
//! State lives in [`app::State`]; user actions arrive as [`Msg`] values and
//! every mutation is followed by a full recomputation pass that rebuilds the
//! ports for the visible page and reconciles edges against the pairing
//! invariant. Async work (field listing, type translation) is prepared by
//! the helpers in [`fetch`] and applied through configuration messages, so
//! control flow stays unidirectional.

pub mod app;
pub mod edges;
pub mod fetch;
pub mod models;
pub mod ports;
pub mod typemap;
pub mod update;
pub mod visibility;

pub use app::{State, ValidationError};
pub use edges::{ConnectError, Edge, EdgeManager};
pub use models::{
    EmptyState, Field, FormInfo, NameStatus, PageDirection, Side, TableNode, PAGE_SIZE,
    UNDEFINED_TYPE,
};
pub use ports::{Port, PortLayout, PortSide};
pub use typemap::{parse_type_descriptor, translate_fields, ParsedType, VIRTUAL_ENGINE};

/// User actions and async completions handled by [`update::update`]
#[derive(Debug, Clone)]
pub enum Msg {
    SearchChanged(String),
    PageChanged(Side, PageDirection),
    FieldSelected(Side, u32),
    SelectionCleared,
    /// User dragged a connection between two ports
    ConnectRequested { from_port: String, to_port: String },
    /// Explicit unlink control on the edge of a field pair
    EdgeUnlinked(u32),
    /// Graph-level removal event carrying the edge id
    EdgeRemoved(String),
    TargetNameEdited(u32, String),
    DescriptionEdited(Side, u32, String),
    /// Source table fetch finished; carries re-translated target fields
    /// when a target table was already configured
    SourceTableConfigured {
        info: FormInfo,
        fields: Vec<Field>,
        translated_target: Option<Vec<Field>>,
        epoch: u64,
    },
    /// Target table configured; fields are the source list translated into
    /// the new target engine
    TargetTableConfigured {
        info: FormInfo,
        fields: Vec<Field>,
        epoch: u64,
    },
    ConfigureFailed { error: String, epoch: u64 },
}

/// Transient user-visible message emitted by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
