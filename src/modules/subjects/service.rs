use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::subjects::model::{CreateSubjectDto, Subject};
use crate::utils::errors::AppError;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (name, school_id)
               VALUES ($1, $2)
               RETURNING id, seq, name, school_id, created_at, updated_at"#,
        )
        .bind(&dto.name)
        .bind(school_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "A subject with this name already exists in this school"
                ));
            }
            AppError::from(e)
        })?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn get_subjects_by_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(
            r#"SELECT id, seq, name, school_id, created_at, updated_at
               FROM subjects
               WHERE school_id = $1
               ORDER BY name"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &PgPool,
        school_id: Uuid,
        subject_id: Uuid,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(
            r#"SELECT id, seq, name, school_id, created_at, updated_at
               FROM subjects
               WHERE id = $1 AND school_id = $2"#,
        )
        .bind(subject_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Subject not found")))?;

        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn create_test_school(pool: &PgPool, name: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>("INSERT INTO schools (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_subject_assigns_increasing_seq(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        let maths = SubjectService::create_subject(
            &pool,
            school_id,
            CreateSubjectDto {
                name: "Mathematics".to_string(),
            },
        )
        .await
        .unwrap();

        let physics = SubjectService::create_subject(
            &pool,
            school_id,
            CreateSubjectDto {
                name: "Physics".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(physics.seq > maths.seq);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_subject_duplicate_name(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        SubjectService::create_subject(
            &pool,
            school_id,
            CreateSubjectDto {
                name: "Mathematics".to_string(),
            },
        )
        .await
        .unwrap();

        let result = SubjectService::create_subject(
            &pool,
            school_id,
            CreateSubjectDto {
                name: "Mathematics".to_string(),
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_subjects_scoped_to_school(pool: PgPool) {
        let school1 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;
        let school2 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        let subject = SubjectService::create_subject(
            &pool,
            school1,
            CreateSubjectDto {
                name: "History".to_string(),
            },
        )
        .await
        .unwrap();

        let visible = SubjectService::get_subjects_by_school(&pool, school2)
            .await
            .unwrap();
        assert!(visible.is_empty());

        let result = SubjectService::find_by_id(&pool, school2, subject.id).await;
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
