use serde::{Deserialize, Serialize};
use crate::error::AppError;

// Registration request
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct AgentCreate {
    pub name: String,
    #[serde(default)]
    pub bio: String,
}

// Returned once, at registration. The only place the api_key is ever shown.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AgentCreated {
    pub id: u64,
    pub name: String,
    pub bio: String,
    pub api_key: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PostCreate {
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostCreated {
    pub id: u64,
    pub author: String,
    pub content: String,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ReplyCreate {
    pub post_id: u64,
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReplyCreated {
    pub id: u64,
    pub post_id: u64,
    pub author: String,
    pub content: String,
}

// lengths are counted in characters, not bytes
fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

impl AgentCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("name", &self.name, 2, 80)?;
        check_len("bio", &self.bio, 0, 255)
    }
}

impl PostCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("content", &self.content, 1, 1000)
    }
}

impl ReplyCreate {
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("content", &self.content, 1, 1000)
    }
}
