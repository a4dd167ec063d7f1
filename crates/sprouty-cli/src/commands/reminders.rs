use sprouty_core::{FetchMode, ReminderInput, SproutyClient};

use super::CommandOutput;
use crate::cli::{CreateReminderArgs, ReminderCommand};
use crate::error::CliError;

pub async fn run(command: &ReminderCommand, client: &SproutyClient) -> Result<CommandOutput, CliError> {
    let reminders = client.reminders();

    let result = match command {
        ReminderCommand::List => reminders.list_reminders().await,
        ReminderCommand::Upcoming => reminders.list_upcoming_reminders().await,
        ReminderCommand::Due { fallback } => {
            let mode = if *fallback {
                FetchMode::Fallback
            } else {
                FetchMode::Network
            };
            reminders.list_due_reminders(mode).await
        }
        ReminderCommand::Create(args) => reminders.create_reminder(reminder_input(args)).await,
        ReminderCommand::Complete { id } => reminders.complete_reminder(id).await,
        ReminderCommand::Delete { id } => reminders.delete_reminder(id).await,
        ReminderCommand::Notified { id } => reminders.mark_notification_sent(id).await,
        ReminderCommand::Snooze { id, minutes } => {
            reminders.snooze_reminder(id, Some(*minutes)).await
        }
        ReminderCommand::Stats => reminders.reminder_stats().await,
        ReminderCommand::Ping => {
            let report = reminders.check_api_connectivity().await;
            return CommandOutput::new(&report, report.success);
        }
    };

    CommandOutput::from_result(&result)
}

fn reminder_input(args: &CreateReminderArgs) -> ReminderInput {
    let mut input = ReminderInput::new(args.plant.as_str(), args.reminder_type.as_str());
    input.title = args.title.clone();
    input.notes = args.notes.clone();
    input.scheduled_date = args.date.clone();
    if args.no_recurring {
        input.recurring = Some(false);
    }
    if let Some(frequency) = &args.frequency {
        input = input.with_frequency(frequency.as_str());
    }
    if !args.notify.is_empty() {
        input.notification_methods = Some(args.notify.clone());
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CreateReminderArgs {
        CreateReminderArgs {
            plant: String::from("p1"),
            reminder_type: String::from("Water"),
            title: None,
            notes: None,
            date: None,
            frequency: None,
            no_recurring: false,
            notify: Vec::new(),
        }
    }

    #[test]
    fn bare_arguments_leave_defaults_to_normalization() {
        let body = reminder_input(&args()).normalize();
        assert_eq!(body.title, "Water reminder");
        assert!(body.recurring);
        assert_eq!(body.frequency, 7);
        assert_eq!(body.notification_methods, vec!["popup"]);
    }

    #[test]
    fn flags_are_carried_into_the_input() {
        let mut args = args();
        args.frequency = Some(String::from("monthly"));
        args.no_recurring = true;
        args.notify = vec![String::from("email")];

        let body = reminder_input(&args).normalize();
        assert_eq!(body.frequency, 30);
        assert!(!body.recurring);
        assert_eq!(body.notification_methods, vec!["email"]);
    }
}
