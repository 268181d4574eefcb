// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree operations.

use crate::types::PlaneId;

/// A mutation would break the tree structure. The tree is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// Attaching `child` under `parent` would make a plane its own ancestor.
    #[error("cannot attach plane {child} under {parent}: it is the same plane or one of its ancestors")]
    Cycle {
        /// Requested parent.
        parent: PlaneId,
        /// Plane that was to be attached.
        child: PlaneId,
    },
    /// The identifier refers to a destroyed plane.
    #[error("plane {0} has been destroyed")]
    StalePlane(PlaneId),
}

/// A child lookup by name or identifier failed. The tree is unaffected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("plane {parent} has no child {name:?}")]
pub struct NotFoundError {
    /// Plane whose children were searched.
    pub parent: PlaneId,
    /// Requested child name.
    pub name: String,
}

/// A widget could not be constructed from its identifying label.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The label contains no alphanumeric character to derive a name from.
    #[error("invalid label {label:?}: it must contain at least one alphanumeric character")]
    EmptyLabel {
        /// The rejected label.
        label: String,
    },
}

/// Any error raised by a tree operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// See [`StructuralError`].
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// See [`NotFoundError`].
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
