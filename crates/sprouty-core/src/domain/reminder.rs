use serde::{Deserialize, Serialize};

use super::UtcDateTime;

/// Version of the reminder wire shape that [`fallback_reminders`] mirrors.
/// Bump together with [`Reminder`].
pub const FALLBACK_SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_FREQUENCY_DAYS: i64 = 7;
pub const DEFAULT_NOTIFICATION_METHOD: &str = "popup";
pub const DEFAULT_SNOOZE_MINUTES: i64 = 30;

/// Reminder as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub reminder_type: String,
    pub title: String,
    pub plant: ReminderPlant,
    pub scheduled_date: UtcDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The populated plant reference embedded in a reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderPlant {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Placeholder reminders handed out when the backend cannot be reached.
pub fn fallback_reminders() -> Vec<Reminder> {
    vec![Reminder {
        id: String::from("mock-reminder-1"),
        reminder_type: String::from("Water"),
        title: String::from("Water Reminder"),
        plant: ReminderPlant {
            id: None,
            name: Some(String::from("Plant")),
            nickname: Some(String::from("Your Plant")),
        },
        scheduled_date: UtcDateTime::now(),
        notes: Some(String::from(
            "This is a mock reminder since the API is currently unreachable",
        )),
    }]
}

/// Cadence as callers supply it: a named cadence, a day count as text, or a
/// raw number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyInput {
    Days(f64),
    Text(String),
}

impl FrequencyInput {
    /// Day count sent to the backend. Unparsable or zero values fall back to
    /// weekly.
    pub fn to_days(&self) -> i64 {
        let days = match self {
            Self::Text(text) => match text.as_str() {
                "daily" => Some(1),
                "weekly" => Some(7),
                "monthly" => Some(30),
                other => leading_integer(other),
            },
            Self::Days(days) if days.is_finite() => Some(days.trunc() as i64),
            Self::Days(_) => None,
        };

        days.filter(|days| *days != 0)
            .unwrap_or(DEFAULT_FREQUENCY_DAYS)
    }
}

impl From<&str> for FrequencyInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for FrequencyInput {
    fn from(value: i64) -> Self {
        Self::Days(value as f64)
    }
}

/// Parses an optional sign followed by digits at the start of `input`,
/// ignoring leading whitespace and anything after the digits.
fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..digits_end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Loosely shaped reminder input, as a form or a command line would supply it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderInput {
    pub plant: String,
    #[serde(rename = "type")]
    pub reminder_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
    #[serde(default)]
    pub recurring: Option<bool>,
    #[serde(default)]
    pub frequency: Option<FrequencyInput>,
    #[serde(default)]
    pub notification_methods: Option<Vec<String>>,
}

impl ReminderInput {
    pub fn new(plant: impl Into<String>, reminder_type: impl Into<String>) -> Self {
        Self {
            plant: plant.into(),
            reminder_type: reminder_type.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_scheduled_date(mut self, scheduled_date: impl Into<String>) -> Self {
        self.scheduled_date = Some(scheduled_date.into());
        self
    }

    pub fn with_recurring(mut self, recurring: bool) -> Self {
        self.recurring = Some(recurring);
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<FrequencyInput>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    pub fn with_notification_methods(mut self, methods: Vec<String>) -> Self {
        self.notification_methods = Some(methods);
        self
    }

    /// Fills every default the backend expects.
    pub fn normalize(self) -> NewReminder {
        let title = self
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| format!("{} reminder", self.reminder_type));
        let notes = self
            .notes
            .filter(|notes| !notes.is_empty())
            .unwrap_or_else(|| format!("{} reminder for plant", self.reminder_type));

        NewReminder {
            plant: self.plant,
            reminder_type: self.reminder_type,
            title,
            notes,
            scheduled_date: self.scheduled_date,
            recurring: self.recurring != Some(false),
            frequency: self
                .frequency
                .as_ref()
                .map_or(DEFAULT_FREQUENCY_DAYS, FrequencyInput::to_days),
            notification_methods: self
                .notification_methods
                .unwrap_or_else(|| vec![String::from(DEFAULT_NOTIFICATION_METHOD)]),
        }
    }
}

/// Request body of `POST /reminders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub plant: String,
    #[serde(rename = "type")]
    pub reminder_type: String,
    pub title: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    pub recurring: bool,
    pub frequency: i64,
    pub notification_methods: Vec<String>,
}

/// Partial update body of `PUT /reminders/{id}`; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_methods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_sent: Option<bool>,
}

impl ReminderUpdate {
    /// Moves the reminder to `minutes` from `now` and re-arms its notification.
    /// `None` when the new date is out of range.
    pub fn snooze(now: UtcDateTime, minutes: i64) -> Option<Self> {
        let scheduled = now.checked_add_minutes(minutes)?;
        Some(Self {
            scheduled_date: Some(scheduled.format_rfc3339()),
            notification_sent: Some(false),
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_input_gets_every_default() {
        let body = ReminderInput::new("p1", "Water").normalize();

        assert_eq!(
            serde_json::to_value(&body).expect("serializable"),
            json!({
                "plant": "p1",
                "type": "Water",
                "title": "Water reminder",
                "notes": "Water reminder for plant",
                "recurring": true,
                "frequency": 7,
                "notificationMethods": ["popup"]
            })
        );
    }

    #[test]
    fn named_cadences_map_to_days() {
        assert_eq!(FrequencyInput::from("daily").to_days(), 1);
        assert_eq!(FrequencyInput::from("weekly").to_days(), 7);
        assert_eq!(FrequencyInput::from("monthly").to_days(), 30);
    }

    #[test]
    fn numeric_text_is_parsed_leniently() {
        assert_eq!(FrequencyInput::from("5").to_days(), 5);
        assert_eq!(FrequencyInput::from(" 10days").to_days(), 10);
        assert_eq!(FrequencyInput::from("-3").to_days(), -3);
        assert_eq!(FrequencyInput::from("bogus").to_days(), 7);
        assert_eq!(FrequencyInput::from("").to_days(), 7);
    }

    #[test]
    fn zero_and_non_finite_fall_back_to_weekly() {
        assert_eq!(FrequencyInput::from("0").to_days(), 7);
        assert_eq!(FrequencyInput::Days(0.0).to_days(), 7);
        assert_eq!(FrequencyInput::Days(f64::NAN).to_days(), 7);
        assert_eq!(FrequencyInput::Days(14.9).to_days(), 14);
    }

    #[test]
    fn recurring_is_only_off_when_explicitly_false() {
        assert!(ReminderInput::new("p1", "Prune").normalize().recurring);
        assert!(ReminderInput::new("p1", "Prune").with_recurring(true).normalize().recurring);
        assert!(!ReminderInput::new("p1", "Prune").with_recurring(false).normalize().recurring);
    }

    #[test]
    fn empty_title_and_notes_take_the_default_phrase() {
        let body = ReminderInput::new("p1", "Fertilize")
            .with_title("")
            .with_notes("Use half strength")
            .normalize();
        assert_eq!(body.title, "Fertilize reminder");
        assert_eq!(body.notes, "Use half strength");
    }

    #[test]
    fn loose_json_input_deserializes_both_frequency_shapes() {
        let text: ReminderInput =
            serde_json::from_value(json!({ "plant": "p1", "type": "Water", "frequency": "monthly" }))
                .expect("valid input");
        let number: ReminderInput =
            serde_json::from_value(json!({ "plant": "p1", "type": "Water", "frequency": 3 }))
                .expect("valid input");

        assert_eq!(text.normalize().frequency, 30);
        assert_eq!(number.normalize().frequency, 3);
    }

    #[test]
    fn snooze_update_only_sends_date_and_flag() {
        let now = UtcDateTime::parse("2024-03-01T10:00:00Z").expect("valid");
        let update = ReminderUpdate::snooze(now, 45).expect("in range");
        assert_eq!(
            serde_json::to_value(&update).expect("serializable"),
            json!({ "scheduledDate": "2024-03-01T10:45:00Z", "notificationSent": false })
        );
    }

    #[test]
    fn snooze_past_the_date_range_has_no_update() {
        let now = UtcDateTime::parse("2024-03-01T10:00:00Z").expect("valid");
        assert_eq!(ReminderUpdate::snooze(now, i64::MAX), None);
    }

    #[test]
    fn fallback_dataset_matches_the_reminder_shape() {
        let reminders = fallback_reminders();
        assert_eq!(reminders.len(), 1);

        let json = serde_json::to_value(&reminders).expect("serializable");
        let round: Vec<Reminder> = serde_json::from_value(json).expect("same schema");
        assert_eq!(round[0].id, "mock-reminder-1");
        assert_eq!(round[0].plant.nickname.as_deref(), Some("Your Plant"));
    }
}
