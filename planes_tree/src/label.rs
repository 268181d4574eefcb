// Copyright 2025 the Planes Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane names derived from human-readable labels.

use crate::error::ValidationError;

/// Derive a plane name from a widget label.
///
/// The name is the lowercase form of the label's alphanumeric characters, so
/// `"Play again!"` becomes `"playagain"`. Widgets call this before creating any plane,
/// so a rejected label leaves no partial state behind.
pub fn widget_name(label: &str) -> Result<String, ValidationError> {
    let name: String = label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if name.is_empty() {
        return Err(ValidationError::EmptyLabel {
            label: label.to_owned(),
        });
    }
    Ok(name)
}
