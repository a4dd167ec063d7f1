use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Plant health status as tracked by the garden log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PlantStatus {
    #[default]
    Healthy,
    NeedsAttention,
    Critical,
    Sick,
    Other(String),
}

impl PlantStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "Healthy" => Self::Healthy,
            "Needs Attention" => Self::NeedsAttention,
            "Critical" => Self::Critical,
            "Sick" => Self::Sick,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs Attention",
            Self::Critical => "Critical",
            Self::Sick => "Sick",
            Self::Other(other) => other,
        }
    }

    pub const fn grade(&self) -> HealthGrade {
        match self {
            Self::Sick | Self::Critical => HealthGrade::Poor,
            Self::NeedsAttention => HealthGrade::Fair,
            Self::Healthy | Self::Other(_) => HealthGrade::Good,
        }
    }
}

impl Display for PlantStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlantStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlantStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Coarse grade shown next to a plant card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthGrade {
    Good,
    Fair,
    Poor,
}

/// One entry in a plant's care history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareAction {
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Plant record from the garden log. Fields this client does not interpret
/// are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlantStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<PlantStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub care_history: Vec<CareAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plant {
    /// `status`, else `health`, else healthy.
    pub fn current_status(&self) -> PlantStatus {
        self.status
            .clone()
            .or_else(|| self.health.clone())
            .unwrap_or_default()
    }

    pub fn health_grade(&self) -> HealthGrade {
        self.current_status().grade()
    }

    pub fn display_image(&self) -> Option<&str> {
        self.main_image.as_deref().or(self.image.as_deref())
    }

    fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.species, &self.nickname]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Partial update body of `PUT /plants/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PlantStatus>,
}

impl PlantUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn status(status: PlantStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Case-insensitive search over name, species and nickname.
pub fn filter_plants<'a>(plants: &'a [Plant], term: &str) -> Vec<&'a Plant> {
    let needle = term.trim().to_lowercase();
    plants
        .iter()
        .filter(|plant| needle.is_empty() || plant.matches(&needle))
        .collect()
}

/// Most recent entry of `action_type`; the history is newest first.
pub fn last_care_action<'a>(history: &'a [CareAction], action_type: &str) -> Option<&'a CareAction> {
    history
        .iter()
        .find(|action| action.action_type == action_type)
}
