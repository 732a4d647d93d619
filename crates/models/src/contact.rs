use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate::bounded;

pub const DEFAULT_MESSAGE_TYPE: &str = "where_to_buy";
const MESSAGE_TYPE_MAX: usize = 50;

fn default_message_type() -> String {
    DEFAULT_MESSAGE_TYPE.to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessageInput {
    pub name: String,
    pub email: String,
    #[serde(default = "default_message_type")]
    pub message_type: String,
    pub message: String,
}

impl ContactMessageInput {
    pub fn validated(&self) -> Result<Self, ModelError> {
        let name = bounded("name", &self.name, 1, 120)?;
        let email = bounded("email", &self.email, 3, 200)?;
        if !email.contains('@') {
            return Err(ModelError::Validation("email must contain '@'".into()));
        }
        let message_type = match self.message_type.trim() {
            "" => default_message_type(),
            t => bounded("message_type", t, 1, MESSAGE_TYPE_MAX)?,
        };
        let message = bounded("message", &self.message, 5, 2000)?;
        Ok(Self { name, email, message_type, message })
    }

    pub fn into_message(self, id: String) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            message_type: self.message_type,
            message: self.message,
        }
    }
}
