use crate::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use lectio_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student of the tutoring business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    /// Phone number or messenger handle; masked in Debug output
    pub contact: Option<Masked<String>>,
    pub telegram_chat_id: Option<i64>,
    pub teacher_id: Option<Uuid>,
    /// Offset used to render lesson times for this student, minutes east of UTC
    pub tz_offset_minutes: i32,
    /// Set while the student has a weekly booking running until cancellation
    pub book_until_cancellation: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn new(full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            contact: None,
            telegram_chat_id: None,
            teacher_id: None,
            tz_offset_minutes: 0,
            book_until_cancellation: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "student name must not be empty".to_string(),
            ));
        }
        // Offsets beyond UTC-12:00..UTC+14:00 do not exist on any calendar
        if self.tz_offset_minutes < -12 * 60 || self.tz_offset_minutes > 14 * 60 {
            return Err(CoreError::ValidationError(format!(
                "timezone offset out of range: {} minutes",
                self.tz_offset_minutes
            )));
        }
        Ok(())
    }
}

/// A teacher employed by the tutoring business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub telegram_chat_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Teacher {
    pub fn new(full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name,
            email: None,
            telegram_chat_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "teacher name must not be empty".to_string(),
            ));
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(CoreError::ValidationError(format!(
                    "invalid email address: {}",
                    email
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_defaults() {
        let student = Student::new("Ivan Petrov".to_string());
        assert!(student.is_active);
        assert!(!student.book_until_cancellation);
        assert_eq!(student.tz_offset_minutes, 0);
        assert!(student.validate().is_ok());
    }

    #[test]
    fn test_student_offset_range() {
        let mut student = Student::new("Ivan Petrov".to_string());
        student.tz_offset_minutes = 15 * 60;
        assert!(student.validate().is_err());
        student.tz_offset_minutes = -13 * 60;
        assert!(student.validate().is_err());
        student.tz_offset_minutes = 3 * 60;
        assert!(student.validate().is_ok());
    }

    #[test]
    fn test_teacher_email_validation() {
        let mut teacher = Teacher::new("Anna K".to_string());
        assert!(teacher.validate().is_ok());
        teacher.email = Some("not-an-email".to_string());
        assert!(teacher.validate().is_err());
        teacher.email = Some("anna@example.com".to_string());
        assert!(teacher.validate().is_ok());
    }

    #[test]
    fn test_student_contact_is_masked_in_debug() {
        let mut student = Student::new("Ivan Petrov".to_string());
        student.contact = Some(Masked::new("+7 900 123-45-67".to_string()));
        let debug = format!("{:?}", student);
        assert!(!debug.contains("123-45-67"));
        assert!(debug.contains("********"));
    }
}
