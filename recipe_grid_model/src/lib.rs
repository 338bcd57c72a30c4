use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recipe as served by the recipes endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    pub title: String,
    /// Bare filename, resolved against the image prefix when rendering.
    pub image: String,
    /// Minutes to cook.
    pub time: u32,
    pub description: String,
    pub vegan: bool,
    pub id: RecipeId,
}

impl Recipe {
    pub fn duration_text(&self) -> String {
        format!("{} mins to cook.", self.time)
    }

    /// First two characters of the title, shown when there is no image.
    pub fn avatar_fallback(&self) -> String {
        self.title.chars().take(2).collect()
    }
}

/// Only unique within a single fetched collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        RecipeId(id.to_string())
    }
}
