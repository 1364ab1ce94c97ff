use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity - matches the SQL schema.
///
/// The `(first_name, last_name)` pair is unique across all persisted users;
/// ids are assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier, immutable once persisted
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// DTO for creating a user, and for the full-replace (PUT) payload.
///
/// Both fields are required: a replace overwrites every mutable field of the
/// existing record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255))]
    pub last_name: String,
}

impl NewUser {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// DTO for partial updates (PATCH).
///
/// Absent fields are `None` and leave the target untouched; a patch with every
/// field `None` is a valid no-op merge.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,
}

impl User {
    pub fn new(id: i32, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Overwrite every field except the id (full replace).
    pub fn replace_with(&mut self, replacement: NewUser) {
        self.first_name = replacement.first_name;
        self.last_name = replacement.last_name;
    }

    /// Merge the non-`None` fields of the patch onto this record.
    ///
    /// Each field is checked explicitly; when adding a field to [`User`], add
    /// the matching arm here and in [`UserPatch`].
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
    }
}
