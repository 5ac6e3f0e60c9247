use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::classrooms::model::ClassRoom;
use crate::modules::subjects::model::Subject;

/// Weekday a period is scheduled on. Stored as SMALLINT, 0 = Monday.
/// Timetable submissions carry the human-readable label ("Monday" .. "Sunday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl DayOfWeek {
    pub const LABELS: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Monday" => Some(Self::Monday),
            "Tuesday" => Some(Self::Tuesday),
            "Wednesday" => Some(Self::Wednesday),
            "Thursday" => Some(Self::Thursday),
            "Friday" => Some(Self::Friday),
            "Saturday" => Some(Self::Saturday),
            "Sunday" => Some(Self::Sunday),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        Self::LABELS[self as usize]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Period {
    pub id: Uuid,
    pub classroom_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Calendar entry shape consumed by the timetable widget.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PeriodDescriptor {
    pub id: Uuid,
    /// "{subject name} ({teacher username})"
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Hex color derived from the subject's seq; presentation hint only.
    pub color: String,
}

#[derive(Debug, FromRow)]
pub struct PeriodListingRow {
    pub id: Uuid,
    pub subject_name: String,
    pub subject_seq: i64,
    pub teacher_username: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TeacherListing {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Scheduling context returned when no classroom filter is given.
#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableContext {
    pub classrooms: Vec<ClassRoom>,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<TeacherListing>,
}

/// Either the period list for one classroom, or the scheduling context.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TimetableResponse {
    Periods(Vec<PeriodDescriptor>),
    Context(TimetableContext),
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TimetableQuery {
    /// Classroom name; when present the period list for it is returned.
    pub classroom: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePeriodDto {
    /// Classroom display name, resolved within the caller's school.
    #[validate(length(min = 1, message = "classroom is required"))]
    pub classroom: String,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    /// Human-readable weekday label, e.g. "Monday".
    #[validate(length(min = 1, message = "day_of_week is required"))]
    pub day_of_week: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}
