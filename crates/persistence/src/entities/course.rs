//! Course entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Course;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the courses table.
#[derive(Debug, Clone, FromRow)]
pub struct CourseEntity {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub curriculum: String,
    pub thumbnail_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseEntity> for Course {
    fn from(entity: CourseEntity) -> Self {
        Course {
            id: entity.id,
            slug: entity.slug,
            title: entity.title,
            description: entity.description,
            curriculum: entity.curriculum,
            thumbnail_url: entity.thumbnail_url,
            category_id: entity.category_id,
            price: entity.price,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
