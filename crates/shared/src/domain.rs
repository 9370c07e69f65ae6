use std::{fmt, str::FromStr, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const EXPORT_FILE_PREFIX: &str = "MapMaker";
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapId(pub Uuid);

impl MapId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MapId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    Cartographic,
    Gaming,
    Artistic,
    Futuristic,
    Technical,
    Cultural,
    Playful,
    Narrative,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 8] = [
        StyleCategory::Cartographic,
        StyleCategory::Gaming,
        StyleCategory::Artistic,
        StyleCategory::Futuristic,
        StyleCategory::Technical,
        StyleCategory::Cultural,
        StyleCategory::Playful,
        StyleCategory::Narrative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StyleCategory::Cartographic => "Cartographic",
            StyleCategory::Gaming => "Gaming",
            StyleCategory::Artistic => "Artistic",
            StyleCategory::Futuristic => "Futuristic",
            StyleCategory::Technical => "Technical",
            StyleCategory::Cultural => "Cultural",
            StyleCategory::Playful => "Playful",
            StyleCategory::Narrative => "Narrative",
        }
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown style category '{0}'")]
pub struct ParseCategoryError(pub String);

impl FromStr for StyleCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StyleCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A named visual preset. Catalog entries are `'static` and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: StyleCategory,
    pub description: &'static str,
    pub prompt_fragment: &'static str,
    pub icon: &'static str,
}

/// Decoded image bytes returned by the generation service.
#[derive(Clone, PartialEq, Eq)]
pub struct MapImage {
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl MapImage {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for MapImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapImage")
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub id: MapId,
    pub image: MapImage,
    pub city_name: String,
    pub style: &'static StyleDescriptor,
    pub created_at: DateTime<Utc>,
}

impl GeneratedMap {
    pub fn new(
        city_name: impl Into<String>,
        style: &'static StyleDescriptor,
        image: MapImage,
    ) -> Self {
        Self {
            id: MapId::new(),
            image,
            city_name: city_name.into(),
            style,
            created_at: Utc::now(),
        }
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(&self.city_name, self.style.id)
    }
}

/// `MapMaker-{city}-{style}.png`, with path separators in the city swapped for `_`.
pub fn export_file_name(city_name: &str, style_id: &str) -> String {
    let city: String = city_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{EXPORT_FILE_PREFIX}-{city}-{style_id}.png")
}

/// The current map's image offered for saving.
#[derive(Debug, Clone)]
pub struct MapExport {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl From<&GeneratedMap> for MapExport {
    fn from(map: &GeneratedMap) -> Self {
        Self {
            file_name: map.export_file_name(),
            mime_type: map.image.mime_type.clone(),
            bytes: Arc::clone(&map.image.bytes),
        }
    }
}
