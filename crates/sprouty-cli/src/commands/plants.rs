use serde_json::Value;
use sprouty_core::{filter_plants, ApiResult, Plant, PlantStatus, PlantUpdate, SproutyClient};

use super::CommandOutput;
use crate::cli::PlantCommand;
use crate::error::CliError;

pub async fn run(command: &PlantCommand, client: &SproutyClient) -> Result<CommandOutput, CliError> {
    let plants = client.plants();

    let result = match command {
        PlantCommand::List { search } => {
            let result = plants.list_plants().await;
            garden_log(result, search.as_deref().unwrap_or(""))?
        }
        PlantCommand::Show { id } => plants.get_plant(id).await,
        PlantCommand::Notes { id, text } => {
            plants.update_plant(id, &PlantUpdate::notes(text.as_str())).await
        }
        PlantCommand::Status { id, status } => {
            let update = PlantUpdate::status(PlantStatus::parse(status.trim()));
            plants.update_plant(id, &update).await
        }
    };

    CommandOutput::from_result(&result)
}

/// Applies the search term and tags each plant with its health grade.
/// Payloads that are not a plant list are passed through untouched.
fn garden_log(mut result: ApiResult, search: &str) -> Result<ApiResult, serde_json::Error> {
    let plants: Vec<Plant> = match result.data_as() {
        Some(Ok(plants)) => plants,
        Some(Err(error)) => {
            tracing::warn!(%error, "plant list did not match the expected shape");
            return Ok(result);
        }
        None => return Ok(result),
    };

    let entries = filter_plants(&plants, search)
        .into_iter()
        .map(|plant| {
            let mut entry = serde_json::to_value(plant)?;
            if let Value::Object(fields) = &mut entry {
                fields.insert(
                    String::from("healthGrade"),
                    serde_json::to_value(plant.health_grade())?,
                );
            }
            Ok(entry)
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;

    result.data = Some(Value::Array(entries));
    Ok(result)
}
