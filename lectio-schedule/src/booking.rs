use crate::generator::{InvalidDateError, LessonDateGenerator};
use crate::models::BookingRequest;
use lectio_core::repository::{LessonRepository, PlanRepository, StudentRepository};
use lectio_lessons::Lesson;
use std::sync::Arc;
use uuid::Uuid;

/// Turns booking requests into persisted lessons.
///
/// Date generation itself is pure; this service owns the side effects
/// around it: the student's until-cancellation flag and one lesson insert
/// per generated date, in generated order. Nothing is written when the
/// request fails validation or date parsing.
pub struct BookingService {
    students: Arc<dyn StudentRepository>,
    plans: Arc<dyn PlanRepository>,
    lessons: Arc<dyn LessonRepository>,
    generator: LessonDateGenerator,
}

impl BookingService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        plans: Arc<dyn PlanRepository>,
        lessons: Arc<dyn LessonRepository>,
        generator: LessonDateGenerator,
    ) -> Self {
        Self {
            students,
            plans,
            lessons,
            generator,
        }
    }

    /// Book every lesson the request describes and return them in start
    /// order as generated.
    pub async fn book(&self, request: &BookingRequest) -> Result<Vec<Lesson>, BookingError> {
        let student = self
            .students
            .get_student(request.student_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::StudentNotFound(request.student_id))?;

        let plan = self
            .plans
            .get_plan(request.plan_id)
            .await
            .map_err(|e| BookingError::Storage(e.to_string()))?
            .ok_or(BookingError::PlanNotFound(request.plan_id))?;

        if !plan.is_active {
            return Err(BookingError::PlanInactive(plan.id));
        }

        let dates = self.generator.generate(request)?;

        if request.book_until_cancellation {
            self.students
                .set_book_until_cancellation(student.id, true)
                .await
                .map_err(|e| BookingError::Storage(e.to_string()))?;
        }

        let mut booked = Vec::with_capacity(dates.len());
        for start_at in dates {
            let lesson = Lesson::new(request.student_id, request.plan_id, start_at);
            self.lessons
                .create_lesson(&lesson)
                .await
                .map_err(|e| BookingError::Storage(e.to_string()))?;
            booked.push(lesson);
        }

        Ok(booked)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Student not found: {0}")]
    StudentNotFound(Uuid),

    #[error("Plan not found: {0}")]
    PlanNotFound(Uuid),

    #[error("Plan is not active: {0}")]
    PlanInactive(Uuid),

    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, FixedOffset, Utc};
    use lectio_core::people::Student;
    use lectio_core::repository::LessonQuery;
    use lectio_lessons::LessonStatus;
    use lectio_plans::{Plan, PlanType};
    use std::sync::Mutex;

    /// In-memory stand-in for all three repositories
    #[derive(Default)]
    struct MemoryStore {
        students: Mutex<Vec<Student>>,
        plans: Mutex<Vec<Plan>>,
        lessons: Mutex<Vec<Lesson>>,
        flag_updates: Mutex<Vec<(Uuid, bool)>>,
    }

    #[async_trait]
    impl StudentRepository for MemoryStore {
        async fn create_student(
            &self,
            student: &Student,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.students.lock().unwrap().push(student.clone());
            Ok(())
        }

        async fn get_student(
            &self,
            id: Uuid,
        ) -> Result<Option<Student>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.students.lock().unwrap().iter().find(|s| s.id == id).cloned())
        }

        async fn list_students(
            &self,
            _active_only: bool,
        ) -> Result<Vec<Student>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.students.lock().unwrap().clone())
        }

        async fn update_student(
            &self,
            _student: &Student,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        async fn set_book_until_cancellation(
            &self,
            id: Uuid,
            value: bool,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.flag_updates.lock().unwrap().push((id, value));
            Ok(())
        }

        async fn delete_student(
            &self,
            _id: Uuid,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }
    }

    #[async_trait]
    impl PlanRepository for MemoryStore {
        async fn create_plan(
            &self,
            plan: &Plan,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.plans.lock().unwrap().push(plan.clone());
            Ok(())
        }

        async fn get_plan(
            &self,
            id: Uuid,
        ) -> Result<Option<Plan>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.plans.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn list_plans(
            &self,
            _active_only: bool,
        ) -> Result<Vec<Plan>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.plans.lock().unwrap().clone())
        }

        async fn update_plan(
            &self,
            _plan: &Plan,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        async fn delete_plan(
            &self,
            _id: Uuid,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }
    }

    #[async_trait]
    impl LessonRepository for MemoryStore {
        async fn create_lesson(
            &self,
            lesson: &Lesson,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            self.lessons.lock().unwrap().push(lesson.clone());
            Ok(())
        }

        async fn get_lesson(
            &self,
            id: Uuid,
        ) -> Result<Option<Lesson>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.lessons.lock().unwrap().iter().find(|l| l.id == id).cloned())
        }

        async fn list_lessons(
            &self,
            _query: &LessonQuery,
        ) -> Result<Vec<Lesson>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.lessons.lock().unwrap().clone())
        }

        async fn update_lesson(
            &self,
            _lesson: &Lesson,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            Ok(())
        }

        async fn complete_elapsed(
            &self,
            _now: DateTime<Utc>,
        ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
            Ok(0)
        }
    }

    fn utc(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    async fn seeded_store() -> (Arc<MemoryStore>, Student, Plan) {
        let store = Arc::new(MemoryStore::default());
        let student = Student::new("Anna Petrova".to_string());
        let plan = Plan::new(
            "Individual 60".to_string(),
            PlanType::Individual,
            60,
            150_000,
            "RUB".to_string(),
        );
        store.create_student(&student).await.unwrap();
        store.create_plan(&plan).await.unwrap();
        (store, student, plan)
    }

    fn service(store: &Arc<MemoryStore>) -> BookingService {
        BookingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            LessonDateGenerator::new(FixedOffset::east_opt(0).unwrap()),
        )
    }

    fn request(student: &Student, plan: &Plan, start_date: &str) -> BookingRequest {
        BookingRequest {
            student_id: student.id,
            plan_id: plan.id,
            start_date: start_date.to_string(),
            book_until_cancellation: false,
            specific_days: vec![],
        }
    }

    #[tokio::test]
    async fn test_single_booking_writes_one_lesson() {
        let (store, student, plan) = seeded_store().await;
        let req = request(&student, &plan, "2025-03-03T08:00:00Z");

        let booked = service(&store).book(&req).await.unwrap();

        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].start_at, utc("2025-03-03T08:00:00Z"));
        assert_eq!(booked[0].status, LessonStatus::Scheduled);
        assert_eq!(store.lessons.lock().unwrap().len(), 1);
        assert!(store.flag_updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_until_cancellation_books_weekly_and_sets_flag() {
        let (store, student, plan) = seeded_store().await;
        let mut req = request(&student, &plan, "2025-03-03T08:00:00Z");
        req.book_until_cancellation = true;

        let booked = service(&store).book(&req).await.unwrap();

        assert_eq!(booked.len(), 5);
        let written = store.lessons.lock().unwrap();
        assert_eq!(written.len(), 5);
        assert_eq!(written[0].start_at, utc("2025-03-03T08:00:00Z"));
        assert_eq!(written[4].start_at, utc("2025-03-31T08:00:00Z"));
        assert!(written.windows(2).all(|w| w[0].start_at < w[1].start_at));
        assert_eq!(*store.flag_updates.lock().unwrap(), vec![(student.id, true)]);
    }

    #[tokio::test]
    async fn test_duplicate_days_become_duplicate_lessons() {
        let (store, student, plan) = seeded_store().await;
        let mut req = request(&student, &plan, "2025-04-01T09:30:00Z");
        req.specific_days = vec!["2025-04-05".to_string(), "2025-04-05".to_string()];

        let booked = service(&store).book(&req).await.unwrap();

        assert_eq!(booked.len(), 2);
        assert_eq!(booked[0].start_at, booked[1].start_at);
        assert_ne!(booked[0].id, booked[1].id);
    }

    #[tokio::test]
    async fn test_unknown_student_is_rejected() {
        let (store, _student, plan) = seeded_store().await;
        let stranger = Student::new("Nobody".to_string());
        let req = request(&stranger, &plan, "2025-03-03T08:00:00Z");

        let err = service(&store).book(&req).await.unwrap_err();

        assert!(matches!(err, BookingError::StudentNotFound(id) if id == stranger.id));
        assert!(store.lessons.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_plan_is_rejected() {
        let (store, student, plan) = seeded_store().await;
        let missing = Uuid::new_v4();
        let mut req = request(&student, &plan, "2025-03-03T08:00:00Z");
        req.plan_id = missing;

        let err = service(&store).book(&req).await.unwrap_err();

        assert!(matches!(err, BookingError::PlanNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_inactive_plan_is_rejected() {
        let (store, student, mut plan) = seeded_store().await;
        plan.deactivate();
        store.plans.lock().unwrap()[0] = plan.clone();
        let req = request(&student, &plan, "2025-03-03T08:00:00Z");

        let err = service(&store).book(&req).await.unwrap_err();

        assert!(matches!(err, BookingError::PlanInactive(_)));
        assert!(store.lessons.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_date_writes_nothing() {
        let (store, student, plan) = seeded_store().await;
        let mut req = request(&student, &plan, "2025-03-03T08:00:00Z");
        req.book_until_cancellation = true;
        req.start_date = "03.03.2025".to_string();

        let err = service(&store).book(&req).await.unwrap_err();

        assert!(matches!(err, BookingError::InvalidDate(_)));
        assert!(store.lessons.lock().unwrap().is_empty());
        // The recurrence flag is only set once dates exist.
        assert!(store.flag_updates.lock().unwrap().is_empty());
    }
}
