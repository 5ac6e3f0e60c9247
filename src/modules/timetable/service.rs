use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classrooms::service::ClassroomService;
use crate::modules::subjects::service::SubjectService;
use crate::modules::timetable::model::{
    CreatePeriodDto, DayOfWeek, Period, PeriodDescriptor, PeriodListingRow, TeacherListing,
    TimetableContext,
};
use crate::utils::errors::AppError;

/// Fixed display palette; a subject always renders with
/// `COLOR_PALETTE[seq % 15]` so its color is stable across views.
pub const COLOR_PALETTE: [&str; 15] = [
    "#008744", "#0057e7", "#d62d20", "#ffa700", "#ffffff", "#96ceb4", "#ffeead", "#ff6f69",
    "#ffcc5c", "#88d8b0", "#ffb3ba", "#ffdfba", "#ffffba", "#baffc9", "#bae1ff",
];

pub fn subject_color(seq: i64) -> &'static str {
    COLOR_PALETTE[seq.rem_euclid(COLOR_PALETTE.len() as i64) as usize]
}

pub struct TimetableService;

impl TimetableService {
    /// Period descriptors for one classroom, resolved by name within the
    /// school. 404 when the classroom does not exist there.
    #[instrument(skip(db))]
    pub async fn get_periods(
        db: &PgPool,
        school_id: Uuid,
        classroom_name: &str,
    ) -> Result<Vec<PeriodDescriptor>, AppError> {
        let classroom = ClassroomService::find_by_name(db, school_id, classroom_name).await?;

        let rows = sqlx::query_as::<_, PeriodListingRow>(
            r#"SELECT
                p.id,
                s.name AS subject_name,
                s.seq AS subject_seq,
                u.username AS teacher_username,
                p.start_at,
                p.end_at
               FROM periods p
               JOIN subjects s ON s.id = p.subject_id
               JOIN users u ON u.id = p.teacher_id
               WHERE p.classroom_id = $1
               ORDER BY p.start_at"#,
        )
        .bind(classroom.id)
        .fetch_all(db)
        .await?;

        let descriptors = rows
            .into_iter()
            .map(|row| PeriodDescriptor {
                id: row.id,
                title: format!("{} ({})", row.subject_name, row.teacher_username),
                start: row.start_at,
                end: row.end_at,
                color: subject_color(row.subject_seq).to_string(),
            })
            .collect();

        Ok(descriptors)
    }

    /// Classrooms, subjects and teachers of the school, for the scheduling
    /// form.
    #[instrument(skip(db))]
    pub async fn get_context(db: &PgPool, school_id: Uuid) -> Result<TimetableContext, AppError> {
        let classrooms = ClassroomService::get_classrooms_by_school(db, school_id).await?;
        let subjects = SubjectService::get_subjects_by_school(db, school_id).await?;

        let teachers = sqlx::query_as::<_, TeacherListing>(
            r#"SELECT id, username, first_name, last_name
               FROM users
               WHERE school_id = $1 AND role = 'teacher'
               ORDER BY username"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(TimetableContext {
            classrooms,
            subjects,
            teachers,
        })
    }

    #[instrument(skip(db))]
    pub async fn create_period(
        db: &PgPool,
        school_id: Uuid,
        dto: CreatePeriodDto,
    ) -> Result<Period, AppError> {
        let classroom = ClassroomService::find_by_name(db, school_id, &dto.classroom).await?;

        let day_of_week = DayOfWeek::from_label(&dto.day_of_week).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!(
                "Unknown day of the week: {}",
                dto.day_of_week
            ))
        })?;

        if dto.start_at >= dto.end_at {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Start time must be before end time"
            )));
        }

        SubjectService::find_by_id(db, school_id, dto.subject_id).await?;

        let teacher_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND school_id = $2 AND role = 'teacher')",
        )
        .bind(dto.teacher_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if !teacher_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        let period = sqlx::query_as::<_, Period>(
            r#"INSERT INTO periods (classroom_id, subject_id, teacher_id, day_of_week, start_at, end_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id, classroom_id, subject_id, teacher_id, day_of_week, start_at, end_at, created_at, updated_at"#,
        )
        .bind(classroom.id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(day_of_week)
        .bind(dto.start_at)
        .bind(dto.end_at)
        .fetch_one(db)
        .await?;

        Ok(period)
    }

    /// Delete a period, scoped to the caller's school through its classroom.
    #[instrument(skip(db))]
    pub async fn delete_period(
        db: &PgPool,
        school_id: Uuid,
        period_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"DELETE FROM periods p
               USING classrooms c
               WHERE p.id = $1 AND p.classroom_id = c.id AND c.school_id = $2"#,
        )
        .bind(period_id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Period not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::classrooms::model::CreateClassroomDto;
    use crate::modules::subjects::model::CreateSubjectDto;
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_palette_has_fifteen_entries() {
        assert_eq!(COLOR_PALETTE.len(), 15);
    }

    #[test]
    fn test_subject_color_wraps_modulo_palette() {
        assert_eq!(subject_color(0), "#008744");
        assert_eq!(subject_color(1), "#0057e7");
        assert_eq!(subject_color(14), "#bae1ff");
        assert_eq!(subject_color(15), "#008744");
        assert_eq!(subject_color(16), "#0057e7");
    }

    #[test]
    fn test_day_of_week_labels_round_trip() {
        for label in DayOfWeek::LABELS {
            let day = DayOfWeek::from_label(label).unwrap();
            assert_eq!(day.label(), label);
        }
        assert!(DayOfWeek::from_label("Funday").is_none());
        assert!(DayOfWeek::from_label("monday").is_none());
    }

    #[test]
    fn test_day_of_week_ordinals() {
        assert_eq!(DayOfWeek::Monday as i16, 0);
        assert_eq!(DayOfWeek::Sunday as i16, 6);
    }

    async fn create_test_school(pool: &PgPool, name: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>("INSERT INTO schools (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn create_test_teacher(pool: &PgPool, school_id: Uuid, username: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO users (username, first_name, last_name, role, school_id)
               VALUES ($1, 'Test', 'Teacher', 'teacher', $2) RETURNING id"#,
        )
        .bind(username)
        .bind(school_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    struct Fixture {
        school_id: Uuid,
        subject_id: Uuid,
        subject_seq: i64,
        teacher_id: Uuid,
    }

    async fn setup(pool: &PgPool) -> Fixture {
        let school_id = create_test_school(pool, &format!("School {}", Uuid::new_v4())).await;
        ClassroomService::create_classroom(
            pool,
            school_id,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await
        .unwrap();
        let subject = SubjectService::create_subject(
            pool,
            school_id,
            CreateSubjectDto {
                name: "Mathematics".to_string(),
            },
        )
        .await
        .unwrap();
        let teacher_id =
            create_test_teacher(pool, school_id, &format!("teacher-{}", Uuid::new_v4())).await;

        Fixture {
            school_id,
            subject_id: subject.id,
            subject_seq: subject.seq,
            teacher_id,
        }
    }

    fn period_dto(fx: &Fixture, day: &str) -> CreatePeriodDto {
        CreatePeriodDto {
            classroom: "10A".to_string(),
            subject_id: fx.subject_id,
            teacher_id: fx.teacher_id,
            day_of_week: day.to_string(),
            start_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_and_list_periods(pool: PgPool) {
        let fx = setup(&pool).await;

        let period = TimetableService::create_period(&pool, fx.school_id, period_dto(&fx, "Monday"))
            .await
            .unwrap();
        assert_eq!(period.day_of_week, DayOfWeek::Monday);

        TimetableService::create_period(&pool, fx.school_id, period_dto(&fx, "Wednesday"))
            .await
            .unwrap();

        let descriptors = TimetableService::get_periods(&pool, fx.school_id, "10A")
            .await
            .unwrap();
        assert_eq!(descriptors.len(), 2);
        for descriptor in &descriptors {
            assert_eq!(descriptor.color, subject_color(fx.subject_seq));
            assert!(descriptor.title.starts_with("Mathematics ("));
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_periods_unknown_classroom(pool: PgPool) {
        let fx = setup(&pool).await;

        let result = TimetableService::get_periods(&pool, fx.school_id, "11Z").await;

        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_period_unknown_day_label(pool: PgPool) {
        let fx = setup(&pool).await;

        let result =
            TimetableService::create_period(&pool, fx.school_id, period_dto(&fx, "Someday")).await;

        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_period_start_after_end(pool: PgPool) {
        let fx = setup(&pool).await;

        let mut dto = period_dto(&fx, "Monday");
        std::mem::swap(&mut dto.start_at, &mut dto.end_at);
        let result = TimetableService::create_period(&pool, fx.school_id, dto).await;

        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_period_foreign_subject(pool: PgPool) {
        let fx = setup(&pool).await;
        let other_school = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;
        let foreign_subject = SubjectService::create_subject(
            &pool,
            other_school,
            CreateSubjectDto {
                name: "Chemistry".to_string(),
            },
        )
        .await
        .unwrap();

        let mut dto = period_dto(&fx, "Monday");
        dto.subject_id = foreign_subject.id;
        let result = TimetableService::create_period(&pool, fx.school_id, dto).await;

        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_period(pool: PgPool) {
        let fx = setup(&pool).await;
        let period = TimetableService::create_period(&pool, fx.school_id, period_dto(&fx, "Friday"))
            .await
            .unwrap();

        TimetableService::delete_period(&pool, fx.school_id, period.id)
            .await
            .unwrap();

        let descriptors = TimetableService::get_periods(&pool, fx.school_id, "10A")
            .await
            .unwrap();
        assert!(descriptors.is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_period_not_found(pool: PgPool) {
        let fx = setup(&pool).await;

        let result = TimetableService::delete_period(&pool, fx.school_id, Uuid::new_v4()).await;

        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_period_other_school(pool: PgPool) {
        let fx = setup(&pool).await;
        let other_school = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;
        let period = TimetableService::create_period(&pool, fx.school_id, period_dto(&fx, "Monday"))
            .await
            .unwrap();

        let result = TimetableService::delete_period(&pool, other_school, period.id).await;

        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
