//! Enrollment application entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{
    Application, ApplicationStatus, ExperienceLevel, Gender, PaymentMethod,
};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatusDb {
    Pending,
    Approved,
    Rejected,
}

impl From<ApplicationStatus> for ApplicationStatusDb {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending => Self::Pending,
            ApplicationStatus::Approved => Self::Approved,
            ApplicationStatus::Rejected => Self::Rejected,
        }
    }
}

impl From<ApplicationStatusDb> for ApplicationStatus {
    fn from(status: ApplicationStatusDb) -> Self {
        match status {
            ApplicationStatusDb::Pending => Self::Pending,
            ApplicationStatusDb::Approved => Self::Approved,
            ApplicationStatusDb::Rejected => Self::Rejected,
        }
    }
}

/// Database enum for applicant gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum GenderDb {
    Male,
    Female,
}

impl From<Gender> for GenderDb {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Male,
            Gender::Female => Self::Female,
        }
    }
}

impl From<GenderDb> for Gender {
    fn from(gender: GenderDb) -> Self {
        match gender {
            GenderDb::Male => Self::Male,
            GenderDb::Female => Self::Female,
        }
    }
}

/// Database enum for the chosen payment method label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
pub enum PaymentMethodDb {
    Onsite,
    Card,
    Transfer,
}

impl From<PaymentMethod> for PaymentMethodDb {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Onsite => Self::Onsite,
            PaymentMethod::Card => Self::Card,
            PaymentMethod::Transfer => Self::Transfer,
        }
    }
}

impl From<PaymentMethodDb> for PaymentMethod {
    fn from(method: PaymentMethodDb) -> Self {
        match method {
            PaymentMethodDb::Onsite => Self::Onsite,
            PaymentMethodDb::Card => Self::Card,
            PaymentMethodDb::Transfer => Self::Transfer,
        }
    }
}

/// Database enum for the prior-experience bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
pub enum ExperienceLevelDb {
    None,
    Beginner,
    Intermediate,
    Advanced,
}

impl From<ExperienceLevel> for ExperienceLevelDb {
    fn from(level: ExperienceLevel) -> Self {
        match level {
            ExperienceLevel::None => Self::None,
            ExperienceLevel::Beginner => Self::Beginner,
            ExperienceLevel::Intermediate => Self::Intermediate,
            ExperienceLevel::Advanced => Self::Advanced,
        }
    }
}

impl From<ExperienceLevelDb> for ExperienceLevel {
    fn from(level: ExperienceLevelDb) -> Self {
        match level {
            ExperienceLevelDb::None => Self::None,
            ExperienceLevelDb::Beginner => Self::Beginner,
            ExperienceLevelDb::Intermediate => Self::Intermediate,
            ExperienceLevelDb::Advanced => Self::Advanced,
        }
    }
}

/// Database row mapping for the applications table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationEntity {
    pub id: Uuid,
    pub course_id: Uuid,
    pub schedule_id: Uuid,
    pub korean_name: String,
    pub english_name: Option<String>,
    pub email: String,
    pub normalized_email: String,
    pub phone: String,
    pub normalized_phone: String,
    pub gender: GenderDb,
    pub age: i32,
    pub occupation: String,
    pub region: String,
    pub pilates_experience: ExperienceLevelDb,
    pub question: Option<String>,
    pub payment_method: PaymentMethodDb,
    pub status: ApplicationStatusDb,
    pub price: Option<i64>,
    pub discounted_price: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationEntity> for Application {
    fn from(entity: ApplicationEntity) -> Self {
        Application {
            id: entity.id,
            course_id: entity.course_id,
            schedule_id: entity.schedule_id,
            korean_name: entity.korean_name,
            english_name: entity.english_name,
            email: entity.email,
            phone: entity.phone,
            gender: entity.gender.into(),
            age: entity.age,
            occupation: entity.occupation,
            region: entity.region,
            pilates_experience: entity.pilates_experience.into(),
            question: entity.question,
            payment_method: entity.payment_method.into(),
            status: entity.status.into(),
            price: entity.price,
            discounted_price: entity.discounted_price,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            let db: ApplicationStatusDb = status.into();
            let back: ApplicationStatus = db.into();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_enum_roundtrips() {
        for gender in [Gender::Male, Gender::Female] {
            assert_eq!(Gender::from(GenderDb::from(gender)), gender);
        }
        for method in [PaymentMethod::Onsite, PaymentMethod::Card, PaymentMethod::Transfer] {
            assert_eq!(PaymentMethod::from(PaymentMethodDb::from(method)), method);
        }
        for level in [
            ExperienceLevel::None,
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ] {
            assert_eq!(ExperienceLevel::from(ExperienceLevelDb::from(level)), level);
        }
    }
}
