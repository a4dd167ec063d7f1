use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::PlantStatus;
use crate::error::ValidationError;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A validated plant photo, held as the base64 payload the backend expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    base64: String,
}

impl ImageUpload {
    /// Validates raw image bytes and encodes them.
    pub fn from_bytes(content_type: &str, bytes: &[u8]) -> Result<Self, ValidationError> {
        if !content_type.starts_with("image/") {
            return Err(ValidationError::NotAnImage {
                content_type: content_type.to_owned(),
            });
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: bytes.len(),
                max_bytes: MAX_IMAGE_BYTES,
            });
        }
        Ok(Self {
            base64: STANDARD.encode(bytes),
        })
    }

    /// Takes the payload of a `data:image/...;base64,` URL.
    pub fn from_data_url(data_url: &str) -> Result<Self, ValidationError> {
        let payload = data_url
            .split_once(',')
            .map(|(_, payload)| payload)
            .filter(|payload| !payload.is_empty())
            .ok_or(ValidationError::InvalidImageData)?;
        Ok(Self {
            base64: payload.to_owned(),
        })
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }
}

/// Body of `POST /diagnosis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub plant_id: Option<String>,
    pub base64_image: String,
    pub notes: String,
}

impl DiagnosisRequest {
    pub fn new(image: ImageUpload, plant_id: Option<String>, notes: &str) -> Self {
        Self {
            plant_id: plant_id.filter(|id| !id.trim().is_empty()),
            base64_image: image.base64,
            notes: notes.trim().to_owned(),
        }
    }
}

/// Headline of a diagnosis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisSummary {
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_health: Option<String>,
    #[serde(default)]
    pub disease_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_priority: Option<String>,
}

impl DiagnosisSummary {
    /// Status the plant should carry after this diagnosis.
    pub fn plant_status(&self) -> PlantStatus {
        if self.is_healthy {
            PlantStatus::Healthy
        } else if self.treatment_priority.as_deref() == Some("high") {
            PlantStatus::Critical
        } else {
            PlantStatus::NeedsAttention
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_image_content_is_rejected() {
        let error = ImageUpload::from_bytes("application/pdf", b"%PDF").expect_err("must reject");
        assert!(matches!(error, ValidationError::NotAnImage { .. }));
    }

    #[test]
    fn oversized_image_is_rejected() {
        let bytes = vec![0_u8; MAX_IMAGE_BYTES + 1];
        let error = ImageUpload::from_bytes("image/png", &bytes).expect_err("must reject");
        assert!(matches!(error, ValidationError::ImageTooLarge { .. }));
    }

    #[test]
    fn image_at_the_limit_is_accepted() {
        let bytes = vec![0_u8; MAX_IMAGE_BYTES];
        assert!(ImageUpload::from_bytes("image/jpeg", &bytes).is_ok());
    }

    #[test]
    fn data_url_payload_is_extracted() {
        let image = ImageUpload::from_data_url("data:image/png;base64,iVBORw0KGgo=").expect("valid");
        assert_eq!(image.base64(), "iVBORw0KGgo=");
        assert!(ImageUpload::from_data_url("data:image/png;base64,").is_err());
        assert!(ImageUpload::from_data_url("iVBORw0KGgo=").is_err());
    }

    #[test]
    fn request_trims_notes_and_drops_blank_plant_id() {
        let image = ImageUpload::from_bytes("image/png", b"png").expect("valid");
        let request = DiagnosisRequest::new(image, Some(String::from(" ")), "  yellow leaves ");
        assert_eq!(request.plant_id, None);
        assert_eq!(request.notes, "yellow leaves");
        assert_eq!(request.base64_image, "cG5n");
    }

    #[test]
    fn summary_maps_to_plant_status() {
        let mut summary = DiagnosisSummary {
            is_healthy: true,
            overall_health: None,
            disease_count: 0,
            treatment_priority: None,
        };
        assert_eq!(summary.plant_status(), PlantStatus::Healthy);

        summary.is_healthy = false;
        summary.treatment_priority = Some(String::from("high"));
        assert_eq!(summary.plant_status(), PlantStatus::Critical);

        summary.treatment_priority = Some(String::from("medium"));
        assert_eq!(summary.plant_status(), PlantStatus::NeedsAttention);
    }
}
