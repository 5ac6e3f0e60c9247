use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::modules::academic_years::model::AcademicYear;
use crate::modules::classrooms::model::ClassRoom;

/// Per-student mark for one session. Submissions carry free-form strings;
/// anything other than the literal "present" is recorded as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn from_submission(value: &str) -> Self {
        if value == "present" {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RosterStudent {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceMark {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
}

/// Marking view for one classroom/date: the school's classrooms for the
/// picker, plus roster and existing marks once both filters are given.
/// `attendances` is empty when no session exists yet (the client defaults
/// everyone to present).
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceSheet {
    pub classrooms: Vec<ClassRoom>,
    pub classroom_id: Option<Uuid>,
    pub date: Option<String>,
    pub students: Option<Vec<RosterStudent>>,
    pub attendances: Option<Vec<AttendanceMark>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    pub classroom_id: Option<Uuid>,
    /// DD/MM/YYYY
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveAttendanceDto {
    pub classroom_id: Uuid,
    /// DD/MM/YYYY
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    /// Status per enrolled student, keyed by student user id. Every student
    /// currently enrolled in the classroom must have an entry.
    #[schema(value_type = Object)]
    pub statuses: HashMap<Uuid, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceReportQuery {
    pub classroom_id: Option<Uuid>,
    pub academic_year_id: Option<Uuid>,
    /// Calendar month, 1-12.
    pub month: Option<i32>,
}

#[derive(Debug, FromRow)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub student_id: Uuid,
    pub username: String,
    pub status: AttendanceStatus,
}

/// One student's month: a fixed 31-slot array indexed by calendar day
/// (slot 0 = day 1), `null` where no session recorded that day.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentMonthlyReport {
    pub student_id: Uuid,
    pub username: String,
    pub days: Vec<Option<AttendanceStatus>>,
}

/// Report view: filter context plus, when classroom/year/month are all
/// given, the aggregated per-student rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceReport {
    pub classrooms: Vec<ClassRoom>,
    pub academic_years: Vec<AcademicYear>,
    pub months: Vec<String>,
    pub classroom_id: Option<Uuid>,
    pub academic_year_id: Option<Uuid>,
    pub month: Option<i32>,
    pub rows: Option<Vec<StudentMonthlyReport>>,
}
