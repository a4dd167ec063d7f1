use std::path::Path;

use sprouty_core::{
    ApiResult, DiagnosisRequest, DiagnosisSummary, ImageUpload, PlantStatus, SproutyClient,
};

use super::CommandOutput;
use crate::cli::DiagnosisCommand;
use crate::error::CliError;

pub async fn run(
    command: &DiagnosisCommand,
    client: &SproutyClient,
) -> Result<CommandOutput, CliError> {
    let diagnosis = client.diagnosis();

    let result = match command {
        DiagnosisCommand::Run {
            image,
            plant,
            notes,
        } => {
            let upload = load_image(image)?;
            let request = DiagnosisRequest::new(upload, plant.clone(), notes);
            let result = diagnosis.diagnose(&request).await;
            if let Some(status) = suggested_status(&result) {
                tracing::info!(%status, "plant health status from diagnosis");
            }
            result
        }
        DiagnosisCommand::History { plant_id } => diagnosis.plant_history(plant_id).await,
    };

    CommandOutput::from_result(&result)
}

fn load_image(path: &Path) -> Result<ImageUpload, CliError> {
    let content_type = content_type_for(path);
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadImage {
        path: path.display().to_string(),
        source,
    })?;
    Ok(ImageUpload::from_bytes(content_type, &bytes)?)
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

fn suggested_status(result: &ApiResult) -> Option<PlantStatus> {
    let summary = result.data.as_ref()?.get("summary")?.clone();
    serde_json::from_value::<DiagnosisSummary>(summary)
        .ok()
        .map(|summary| summary.plant_status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sprouty_core::ValidationError;
    use std::io::Write;

    #[test]
    fn known_extensions_map_to_image_types() {
        assert_eq!(content_type_for(Path::new("leaf.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("leaf.png")), "image/png");
        assert_eq!(content_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("no-extension")), "application/octet-stream");
    }

    #[test]
    fn image_file_is_read_and_encoded() {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("temp file");
        file.write_all(b"png").expect("write image");

        let upload = load_image(file.path()).expect("valid image");
        assert_eq!(upload.base64(), "cG5n");
    }

    #[test]
    fn non_image_file_is_a_validation_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("temp file");
        file.write_all(b"hello").expect("write file");

        let error = load_image(file.path()).expect_err("must reject");
        assert!(matches!(
            error,
            CliError::Validation(ValidationError::NotAnImage { .. })
        ));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = load_image(Path::new("/definitely/not/here.png")).expect_err("must fail");
        assert_eq!(error.exit_code(), 10);
    }

    #[test]
    fn summary_in_result_suggests_a_status() {
        let result = ApiResult::ok(json!({
            "summary": { "isHealthy": false, "diseaseCount": 2, "treatmentPriority": "high" }
        }));
        assert_eq!(suggested_status(&result), Some(PlantStatus::Critical));
        assert_eq!(suggested_status(&ApiResult::ok(json!({}))), None);
    }
}
