//! Reminder and meeting operations for the Planner.

use log::info;

use super::{non_empty, Planner};
use crate::{
    display::{Reminders, UpdateResult},
    error::{PlannerError, Result},
    ids::generate_id,
    models::{Meeting, MeetingDay, Reminder},
    params::{CreateMeeting, CreateReminder, EditMeeting, Id},
};

fn meeting_not_found(id: &str) -> PlannerError {
    PlannerError::MeetingNotFound { id: id.to_string() }
}

impl Planner {
    /// Every reminder in the order it was added.
    pub async fn list_reminders(&self) -> Result<Reminders> {
        self.with_database(|db, _| db.reminders().map(Reminders))
            .await
    }

    pub async fn add_reminder(&self, params: &CreateReminder) -> Result<Reminder> {
        let reminder = Reminder {
            id: generate_id(),
            text: non_empty("text", &params.text)?,
        };

        self.with_database(move |db, _| {
            db.update_reminders(|reminders| {
                reminders.push(reminder.clone());
                Ok(())
            })?;
            info!("Added reminder {}", reminder.id);
            Ok(reminder)
        })
        .await
    }

    pub async fn delete_reminder(&self, params: &Id) -> Result<Reminder> {
        let id = params.id.clone();

        self.with_database(move |db, _| {
            db.update_reminders(|reminders| {
                let position = reminders
                    .iter()
                    .position(|reminder| reminder.id == id)
                    .ok_or_else(|| PlannerError::ReminderNotFound { id: id.clone() })?;
                Ok(reminders.remove(position))
            })
        })
        .await
    }

    /// Today's meetings by time. Meetings stored for an earlier day are gone.
    pub async fn meetings(&self) -> Result<MeetingDay> {
        self.with_database(|db, now| db.meetings(now)).await
    }

    pub async fn add_meeting(&self, params: &CreateMeeting) -> Result<Meeting> {
        let meeting = Meeting {
            id: generate_id(),
            time: params.time,
            title: non_empty("title", &params.title)?,
            description: params.description.clone().unwrap_or_default(),
        };

        self.with_database(move |db, now| {
            db.update_meetings(now, |day| {
                day.insert(meeting.clone());
                Ok(())
            })?;
            info!("Added meeting {} at {}", meeting.id, meeting.time);
            Ok(meeting)
        })
        .await
    }

    /// Edits one of today's meetings, moving it if its time changed.
    pub async fn update_meeting(&self, params: &EditMeeting) -> Result<UpdateResult<Meeting>> {
        let title = params
            .title
            .as_deref()
            .map(|title| non_empty("title", title))
            .transpose()?;
        let params = params.clone();

        self.with_database(move |db, now| {
            db.update_meetings(now, |day| {
                let meeting = day
                    .get_mut(&params.id)
                    .ok_or_else(|| meeting_not_found(&params.id))?;
                let mut changes = Vec::new();
                if let Some(time) = params.time {
                    meeting.time = time;
                    changes.push(format!("Moved to {time}"));
                }
                if let Some(title) = title {
                    meeting.title = title;
                    changes.push("Updated title".to_string());
                }
                if let Some(description) = params.description {
                    meeting.description = description;
                    changes.push("Updated description".to_string());
                }
                let meeting = meeting.clone();
                day.sort();
                Ok(UpdateResult::with_changes(meeting, changes))
            })
        })
        .await
    }

    pub async fn delete_meeting(&self, params: &Id) -> Result<Meeting> {
        let id = params.id.clone();

        self.with_database(move |db, now| {
            db.update_meetings(now, |day| day.remove(&id).ok_or_else(|| meeting_not_found(&id)))
        })
        .await
    }
}
