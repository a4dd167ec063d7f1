//! # Domain Models
//!
//! Wire types exchanged with the sprouty backend.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Reminder`] | Care reminder as stored by the backend |
//! | [`ReminderInput`] | Loosely shaped reminder input, normalized into [`NewReminder`] |
//! | [`ReminderUpdate`] | Partial reminder update |
//! | [`Plant`] | Garden log entry with care history |
//! | [`PlantUpdate`] | Partial plant update (notes, status) |
//! | [`ImageUpload`] | Validated photo for diagnosis |
//! | [`DiagnosisSummary`] | Diagnosis headline |
//! | [`UtcDateTime`] | Millisecond UTC timestamp |

mod diagnosis;
mod plant;
mod reminder;
mod timestamp;

pub use diagnosis::{DiagnosisRequest, DiagnosisSummary, ImageUpload, MAX_IMAGE_BYTES};
pub use plant::{
    filter_plants, last_care_action, CareAction, HealthGrade, Plant, PlantStatus, PlantUpdate,
};
pub use reminder::{
    fallback_reminders, FrequencyInput, NewReminder, Reminder, ReminderInput, ReminderPlant,
    ReminderUpdate, DEFAULT_FREQUENCY_DAYS, DEFAULT_NOTIFICATION_METHOD, DEFAULT_SNOOZE_MINUTES,
    FALLBACK_SCHEMA_VERSION,
};
pub use timestamp::UtcDateTime;
