use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::academic_years::model::AcademicYear;
use crate::utils::errors::AppError;

pub struct AcademicYearService;

impl AcademicYearService {
    #[instrument(skip(db))]
    pub async fn get_academic_years_by_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<AcademicYear>, AppError> {
        let years = sqlx::query_as::<_, AcademicYear>(
            r#"SELECT id, name, school_id, is_active, created_at, updated_at
               FROM academic_years
               WHERE school_id = $1
               ORDER BY name DESC"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(years)
    }

    /// The active year for a school, if one is configured. The schema keeps
    /// at most one active per school (partial unique index).
    #[instrument(skip(db))]
    pub async fn get_active(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Option<AcademicYear>, AppError> {
        let year = sqlx::query_as::<_, AcademicYear>(
            r#"SELECT id, name, school_id, is_active, created_at, updated_at
               FROM academic_years
               WHERE school_id = $1 AND is_active = TRUE"#,
        )
        .bind(school_id)
        .fetch_optional(db)
        .await?;

        Ok(year)
    }
}
