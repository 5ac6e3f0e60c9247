use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classrooms::model::{ClassRoom, CreateClassroomDto};
use crate::utils::errors::AppError;

pub struct ClassroomService;

impl ClassroomService {
    #[instrument(skip(db))]
    pub async fn create_classroom(
        db: &PgPool,
        school_id: Uuid,
        dto: CreateClassroomDto,
    ) -> Result<ClassRoom, AppError> {
        let classroom = sqlx::query_as::<_, ClassRoom>(
            r#"INSERT INTO classrooms (name, school_id)
               VALUES ($1, $2)
               RETURNING id, name, school_id, created_at, updated_at"#,
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
                    "A classroom with this name already exists in this school"
                ));
            }
            AppError::from(e)
        })?;

        Ok(classroom)
    }

    #[instrument(skip(db))]
    pub async fn get_classrooms_by_school(
        db: &PgPool,
        school_id: Uuid,
    ) -> Result<Vec<ClassRoom>, AppError> {
        let classrooms = sqlx::query_as::<_, ClassRoom>(
            r#"SELECT id, name, school_id, created_at, updated_at
               FROM classrooms
               WHERE school_id = $1
               ORDER BY name"#,
        )
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classrooms)
    }

    /// Resolve a classroom by its display name within a school. Timetable
    /// submissions reference classrooms by name, not id.
    #[instrument(skip(db))]
    pub async fn find_by_name(
        db: &PgPool,
        school_id: Uuid,
        name: &str,
    ) -> Result<ClassRoom, AppError> {
        let classroom = sqlx::query_as::<_, ClassRoom>(
            r#"SELECT id, name, school_id, created_at, updated_at
               FROM classrooms
               WHERE school_id = $1 AND name = $2"#,
        )
        .bind(school_id)
        .bind(name)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Classroom not found")))?;

        Ok(classroom)
    }

    /// Verify a classroom id belongs to the given school.
    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &PgPool,
        school_id: Uuid,
        classroom_id: Uuid,
    ) -> Result<ClassRoom, AppError> {
        let classroom = sqlx::query_as::<_, ClassRoom>(
            r#"SELECT id, name, school_id, created_at, updated_at
               FROM classrooms
               WHERE id = $1 AND school_id = $2"#,
        )
        .bind(classroom_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Classroom not found")))?;

        Ok(classroom)
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
    async fn test_create_classroom_success(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        let dto = CreateClassroomDto {
            name: "10A".to_string(),
        };

        let classroom = ClassroomService::create_classroom(&pool, school_id, dto)
            .await
            .unwrap();
        assert_eq!(classroom.name, "10A");
        assert_eq!(classroom.school_id, school_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_classroom_duplicate_name(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        ClassroomService::create_classroom(
            &pool,
            school_id,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await
        .unwrap();

        let result = ClassroomService::create_classroom(
            &pool,
            school_id,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_classrooms_scoped_to_school(pool: PgPool) {
        let school1 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;
        let school2 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        ClassroomService::create_classroom(
            &pool,
            school1,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await
        .unwrap();

        let visible = ClassroomService::get_classrooms_by_school(&pool, school2)
            .await
            .unwrap();
        assert!(visible.is_empty());

        // same name in another school is allowed
        let result = ClassroomService::create_classroom(
            &pool,
            school2,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await;
        assert!(result.is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_ordered_by_name(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        for name in ["9C", "9A", "9B"] {
            ClassroomService::create_classroom(
                &pool,
                school_id,
                CreateClassroomDto {
                    name: name.to_string(),
                },
            )
            .await
            .unwrap();
        }

        let classrooms = ClassroomService::get_classrooms_by_school(&pool, school_id)
            .await
            .unwrap();
        let names: Vec<_> = classrooms.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["9A", "9B", "9C"]);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_find_by_name_not_found(pool: PgPool) {
        let school_id = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        let result = ClassroomService::find_by_name(&pool, school_id, "missing").await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_find_by_name_other_school_invisible(pool: PgPool) {
        let school1 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;
        let school2 = create_test_school(&pool, &format!("School {}", Uuid::new_v4())).await;

        ClassroomService::create_classroom(
            &pool,
            school1,
            CreateClassroomDto {
                name: "10A".to_string(),
            },
        )
        .await
        .unwrap();

        let result = ClassroomService::find_by_name(&pool, school2, "10A").await;
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
