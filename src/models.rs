//! Records exchanged with the Blogify backend.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty bucket of a DSA question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in display order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// CSS modifier class for the difficulty summary.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Parse a form value, accepting any casing.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DSA question as returned by `loadAllQuestions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub question_link: Vec<String>,
    pub section: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub done: bool,
}

/// Body of `addNewQuestion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub name: String,
    pub question_link: Vec<String>,
    pub difficulty: Difficulty,
    pub section: String,
}

/// Whether a selection update adds or removes the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionAction {
    Add,
    Remove,
}

impl SelectionAction {
    #[must_use]
    pub const fn from_done(done: bool) -> Self {
        if done {
            Self::Add
        } else {
            Self::Remove
        }
    }
}

/// Body of `updateSelection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionUpdate {
    pub email: String,
    pub question_to_be_added_or_removed: String,
    pub add_or_remove: SelectionAction,
}

/// Generic backend envelope: an optional message and an optional payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub object: Option<serde_json::Value>,
}

impl ApiMessage {
    /// Question ids carried in `object`, as returned by `getUserSelections`.
    ///
    /// Ids are compared as trimmed strings; numeric ids are stringified.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        let Some(serde_json::Value::Array(items)) = &self.object else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.trim().to_string()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

/// A blog post as returned by `getAllPosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `createPost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub content: String,
}

/// Body of `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `registerUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of `login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub object: Option<serde_json::Value>,
}

impl LoginResponse {
    /// The issued token: `token` if present, else `object` when the backend
    /// wraps a bare token string in its envelope.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let wrapped = || match &self.object {
            Some(serde_json::Value::String(s)) => Some(s.as_str()),
            _ => None,
        };
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| wrapped().filter(|t| !t.trim().is_empty()))
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
