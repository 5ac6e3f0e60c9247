use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::academic_years::service::AcademicYearService;
use crate::modules::attendance::model::{
    AttendanceMark, AttendanceQuery, AttendanceReport, AttendanceReportQuery, AttendanceSheet,
    AttendanceStatus, ReportRow, RosterStudent, SaveAttendanceDto, StudentMonthlyReport,
};
use crate::modules::classrooms::service::ClassroomService;
use crate::utils::errors::AppError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Days in the report matrix; slot 0 holds day 1.
const REPORT_DAYS: usize = 31;

pub fn parse_attendance_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y").map_err(|_| {
        AppError::bad_request(anyhow::anyhow!("Invalid date '{}', expected DD/MM/YYYY", value))
    })
}

/// Fold session rows (ordered or not) into per-student day arrays. Each
/// status lands at its calendar-day slot, so insertion order is irrelevant.
pub fn build_report_rows(rows: Vec<ReportRow>) -> Vec<StudentMonthlyReport> {
    let mut by_student: HashMap<Uuid, StudentMonthlyReport> = HashMap::new();

    for row in rows {
        let entry = by_student
            .entry(row.student_id)
            .or_insert_with(|| StudentMonthlyReport {
                student_id: row.student_id,
                username: row.username.clone(),
                days: vec![None; REPORT_DAYS],
            });
        entry.days[row.date.day() as usize - 1] = Some(row.status);
    }

    let mut reports: Vec<_> = by_student.into_values().collect();
    reports.sort_by(|a, b| a.username.cmp(&b.username));
    reports
}

pub struct AttendanceService;

impl AttendanceService {
    /// Marking view for a classroom/date. The classroom picker is always
    /// populated; roster and existing marks only when both filters are given.
    #[instrument(skip(db))]
    pub async fn get_sheet(
        db: &PgPool,
        school_id: Uuid,
        query: AttendanceQuery,
    ) -> Result<AttendanceSheet, AppError> {
        let classrooms = ClassroomService::get_classrooms_by_school(db, school_id).await?;

        let mut sheet = AttendanceSheet {
            classrooms,
            classroom_id: query.classroom_id,
            date: query.date.clone(),
            students: None,
            attendances: None,
        };

        let (Some(classroom_id), Some(date_raw)) = (query.classroom_id, query.date.as_deref())
        else {
            return Ok(sheet);
        };

        ClassroomService::find_by_id(db, school_id, classroom_id).await?;
        let date = parse_attendance_date(date_raw)?;

        sheet.students = Some(Self::get_roster(db, classroom_id).await?);

        // No active year means no session can exist yet; the sheet then
        // shows the roster with no recorded marks.
        let Some(year) = AcademicYearService::get_active(db, school_id).await? else {
            return Ok(sheet);
        };

        let session_id = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT id FROM attendance_classes
               WHERE academic_year_id = $1 AND classroom_id = $2 AND date = $3"#,
        )
        .bind(year.id)
        .bind(classroom_id)
        .bind(date)
        .fetch_optional(db)
        .await?;

        if let Some(session_id) = session_id {
            let marks = sqlx::query_as::<_, AttendanceMark>(
                r#"SELECT a.student_id, a.status
                   FROM attendances a
                   JOIN users u ON u.id = a.student_id
                   WHERE a.attendance_class_id = $1
                   ORDER BY u.username"#,
            )
            .bind(session_id)
            .fetch_all(db)
            .await?;
            sheet.attendances = Some(marks);
        }

        Ok(sheet)
    }

    /// Record attendance for every student enrolled in the classroom on the
    /// given date. The session row and each mark are single conditional
    /// upserts inside one transaction, so concurrent submissions for the
    /// same session cannot duplicate it or lose updates.
    #[instrument(skip(db, dto), fields(classroom_id = %dto.classroom_id, date = %dto.date))]
    pub async fn save_attendance(
        db: &PgPool,
        school_id: Uuid,
        dto: SaveAttendanceDto,
    ) -> Result<(), AppError> {
        ClassroomService::find_by_id(db, school_id, dto.classroom_id).await?;
        let date = parse_attendance_date(&dto.date)?;

        let year = AcademicYearService::get_active(db, school_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("No active academic year configured"))
            })?;

        // Enrollment is read at save time; the submitted key set does not
        // decide who gets a mark.
        let roster = Self::get_roster(db, dto.classroom_id).await?;

        let mut marks = Vec::with_capacity(roster.len());
        for student in &roster {
            let raw = dto.statuses.get(&student.user_id).ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!(
                    "Missing attendance status for student {}",
                    student.username
                ))
            })?;
            marks.push((student.user_id, AttendanceStatus::from_submission(raw)));
        }

        let mut tx = db.begin().await?;

        let session_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO attendance_classes (academic_year_id, classroom_id, date)
               VALUES ($1, $2, $3)
               ON CONFLICT (academic_year_id, classroom_id, date)
               DO UPDATE SET date = EXCLUDED.date
               RETURNING id"#,
        )
        .bind(year.id)
        .bind(dto.classroom_id)
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        for (student_id, status) in marks {
            sqlx::query(
                r#"INSERT INTO attendances (attendance_class_id, student_id, status)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (attendance_class_id, student_id)
                   DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()"#,
            )
            .bind(session_id)
            .bind(student_id)
            .bind(status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Monthly report. Filter context is always returned; the aggregated
    /// rows only when classroom, year and month are all given.
    #[instrument(skip(db))]
    pub async fn get_report(
        db: &PgPool,
        school_id: Uuid,
        query: AttendanceReportQuery,
    ) -> Result<AttendanceReport, AppError> {
        let classrooms = ClassroomService::get_classrooms_by_school(db, school_id).await?;
        let academic_years =
            AcademicYearService::get_academic_years_by_school(db, school_id).await?;

        let mut report = AttendanceReport {
            classrooms,
            academic_years,
            months: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
            classroom_id: query.classroom_id,
            academic_year_id: query.academic_year_id,
            month: query.month,
            rows: None,
        };

        let (Some(classroom_id), Some(academic_year_id), Some(month)) =
            (query.classroom_id, query.academic_year_id, query.month)
        else {
            return Ok(report);
        };

        if !(1..=12).contains(&month) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Month must be between 1 and 12"
            )));
        }

        ClassroomService::find_by_id(db, school_id, classroom_id).await?;

        let rows = sqlx::query_as::<_, ReportRow>(
            r#"SELECT ac.date, a.student_id, u.username, a.status
               FROM attendance_classes ac
               JOIN attendances a ON a.attendance_class_id = ac.id
               JOIN users u ON u.id = a.student_id
               WHERE ac.academic_year_id = $1
                 AND ac.classroom_id = $2
                 AND EXTRACT(MONTH FROM ac.date)::int = $3
               ORDER BY ac.date"#,
        )
        .bind(academic_year_id)
        .bind(classroom_id)
        .bind(month)
        .fetch_all(db)
        .await?;

        report.rows = Some(build_report_rows(rows));

        Ok(report)
    }

    async fn get_roster(db: &PgPool, classroom_id: Uuid) -> Result<Vec<RosterStudent>, AppError> {
        let roster = sqlx::query_as::<_, RosterStudent>(
            r#"SELECT s.user_id, u.username, u.first_name, u.last_name
               FROM students s
               JOIN users u ON u.id = s.user_id
               WHERE s.classroom_id = $1
               ORDER BY u.username"#,
        )
        .bind(classroom_id)
        .fetch_all(db)
        .await?;

        Ok(roster)
    }
}
