//! Error types for the simulation core.
//!
//! Every error here is a programming error surfaced synchronously at the call
//! site. Absence (no component, no previous location) is never an error and is
//! reported through `Option` or an empty collection instead.

use thiserror::Error;

use crate::component::ComponentKind;
use crate::entity::EntityId;

/// Raised when a component cannot be filed under its declared kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// Two different Rust types declared the same `ComponentKind` on one entity.
    #[error("component kind {kind:?} already holds `{existing}`, refusing `{incoming}`")]
    KindConflict {
        kind: ComponentKind,
        existing: &'static str,
        incoming: &'static str,
    },
    /// A game-defined type claimed one of the built-in families.
    #[error("component kind {kind:?} is reserved for sprig's own type, refusing `{incoming}`")]
    ReservedKind {
        kind: ComponentKind,
        incoming: &'static str,
    },
}

/// Raised for geometry the shape module does not know how to compare.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{operation} is not implemented between a {lhs} and a {rhs}")]
    Unsupported {
        operation: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

/// Raised when a vector cannot be mapped onto a compass direction.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DirectionError {
    #[error("cannot classify direction of non-finite vector ({x}, {y})")]
    Unclassifiable { x: f32, y: f32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[error("border width {width} is wider than the {columns}x{rows} map")]
    BorderTooWide {
        width: usize,
        columns: usize,
        rows: usize,
    },
    #[error("cell ({column}, {row}) is outside the {columns}x{rows} map")]
    OutOfBounds {
        column: usize,
        row: usize,
        columns: usize,
        rows: usize,
    },
}

/// Scene-level failures. Wraps the lower-level errors so callers can use `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity {0:?} does not exist in this scene")]
    UnknownEntity(EntityId),
    #[error(transparent)]
    Component(#[from] ComponentError),
}
