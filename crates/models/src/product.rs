use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::bounded;

pub const NAME_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 500;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Public URL of the product image (`/uploads/<id><ext>`), empty when none.
    #[serde(default, alias = "image_url")]
    pub image_path: String,
}

/// Client-supplied product fields; id and image are assigned server side.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
}

impl ProductInput {
    /// Trimmed copy of the input, or the first violated constraint.
    pub fn validated(&self) -> Result<Self, ModelError> {
        Ok(Self {
            name: bounded("name", &self.name, 1, NAME_MAX)?,
            description: bounded("description", &self.description, 1, DESCRIPTION_MAX)?,
        })
    }
}
