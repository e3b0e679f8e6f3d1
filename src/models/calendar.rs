// src/models/calendar.rs

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{
        filter::{related, selected, text_matches, DateRange, RecordFilter},
        serde_utils::{hh_mm, option_hh_mm},
    },
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Court,
    Meeting,
    Deadline,
    Reminder,
    Other,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(with = "option_hh_mm")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub attendees: Vec<Uuid>,
    pub all_day: bool,
    pub reminder_set: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_new_event_window"))]
pub struct NewEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(default, with = "option_hh_mm")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub attendees: Vec<Uuid>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub reminder_set: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_event_patch_window"))]
pub struct EventPatch {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "option_hh_mm")]
    pub time: Option<NaiveTime>,
    #[serde(default, with = "option_hh_mm")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub attendees: Option<Vec<Uuid>>,
    pub all_day: Option<bool>,
    pub reminder_set: Option<bool>,
}

fn window_error() -> ValidationError {
    let mut err = ValidationError::new("end_time");
    err.message = Some(Cow::Borrowed("End time must be after start time"));
    err
}

fn validate_new_event_window(event: &NewEvent) -> Result<(), ValidationError> {
    match event.end_time {
        Some(end) if !event.all_day && end <= event.time => Err(window_error()),
        _ => Ok(()),
    }
}

// No patch só dá para checar quando os dois horários vêm juntos.
fn validate_event_patch_window(patch: &EventPatch) -> Result<(), ValidationError> {
    match (patch.time, patch.end_time) {
        (Some(start), Some(end)) if end <= start && patch.all_day != Some(true) => Err(window_error()),
        _ => Ok(()),
    }
}

impl Event {
    /// Confere o horário de término contra o registro já mesclado com o patch.
    pub fn check_patched_window(&self, patch: &EventPatch) -> Result<(), ValidationErrors> {
        let start = patch.time.unwrap_or(self.time);
        let end = patch.end_time.or(self.end_time);
        let all_day = patch.all_day.unwrap_or(self.all_day);

        match end {
            Some(end) if !all_day && end <= start => {
                let mut errors = ValidationErrors::new();
                errors.add("__all__", window_error());
                Err(errors)
            }
            _ => Ok(()),
        }
    }
}

impl Entity for Event {
    type Draft = NewEvent;
    type Patch = EventPatch;

    const LABEL: &'static str = "event";
    const TITLE: &'static str = "Event";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewEvent) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            time: draft.time,
            // Dia inteiro não tem horário de término
            end_time: if draft.all_day { None } else { draft.end_time },
            location: draft.location,
            event_type: draft.event_type,
            case_id: draft.case_id,
            client_id: draft.client_id,
            attendees: draft.attendees,
            all_day: draft.all_day,
            reminder_set: draft.reminder_set,
            created_by: meta.user_id,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: EventPatch) {
        apply_patch!(
            self, patch;
            title, description, date, time, event_type, attendees, all_day, reminder_set;
            optional: end_time, location, case_id, client_id
        );
        if self.all_day {
            self.end_time = None;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventFilter {
    pub search: String,
    #[serde(rename = "type")]
    pub event_type: Vec<EventType>,
    pub case_id: Option<Uuid>,
    pub date_range: DateRange,
}

impl RecordFilter<Event> for EventFilter {
    fn matches(&self, event: &Event) -> bool {
        text_matches(&self.search, &[&event.title, &event.description])
            && selected(&self.event_type, &event.event_type)
            && related(self.case_id, event.case_id)
            && self.date_range.contains_date(event.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_event(json: serde_json::Value) -> NewEvent {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn end_time_must_follow_start() {
        let event = new_event(serde_json::json!({
            "title": "Court Hearing",
            "date": "2024-04-12",
            "time": "10:00",
            "endTime": "09:30",
            "type": "court"
        }));
        assert!(event.validate().is_err());

        let event = new_event(serde_json::json!({
            "title": "Court Hearing",
            "date": "2024-04-12",
            "time": "10:00",
            "endTime": "11:30",
            "type": "court"
        }));
        assert!(event.validate().is_ok());
    }

    #[test]
    fn patched_end_time_is_checked_against_the_stored_start() {
        let event = Event::from_draft(
            RecordMeta { id: Uuid::new_v4(), company_id: None, user_id: Uuid::nil(), now: Utc::now() },
            new_event(serde_json::json!({
                "title": "Court Hearing",
                "date": "2024-04-12",
                "time": "10:00",
                "type": "court"
            })),
        );

        let early: EventPatch = serde_json::from_value(serde_json::json!({ "endTime": "08:00" })).unwrap();
        assert!(early.validate().is_ok());
        assert!(event.check_patched_window(&early).is_err());

        let late: EventPatch = serde_json::from_value(serde_json::json!({ "endTime": "11:00" })).unwrap();
        assert!(event.check_patched_window(&late).is_ok());

        let all_day: EventPatch =
            serde_json::from_value(serde_json::json!({ "endTime": "08:00", "allDay": true })).unwrap();
        assert!(event.check_patched_window(&all_day).is_ok());
    }

    #[test]
    fn all_day_events_ignore_end_time() {
        let event = new_event(serde_json::json!({
            "title": "Filing Deadline",
            "date": "2024-04-18",
            "time": "17:00",
            "endTime": "08:00",
            "type": "deadline",
            "allDay": true
        }));
        assert!(event.validate().is_ok());
    }

    #[test]
    fn filter_by_type_and_day() {
        let at = Utc::now();
        let make = |title: &str, kind: EventType, day: u32| Event {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            title: title.into(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: None,
            location: None,
            event_type: kind,
            case_id: None,
            client_id: None,
            attendees: vec![],
            all_day: false,
            reminder_set: false,
            created_by: Uuid::nil(),
            created_at: at,
            updated_at: at,
        };
        let list = vec![
            make("Hearing", EventType::Court, 12),
            make("Client Meeting", EventType::Meeting, 14),
            make("Team Meeting", EventType::Meeting, 15),
        ];

        let filter = EventFilter {
            event_type: vec![EventType::Meeting],
            date_range: DateRange::new(None, NaiveDate::from_ymd_opt(2024, 4, 14)),
            ..Default::default()
        };
        let titles: Vec<_> = filter.apply(&list).into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Client Meeting"]);
    }
}
