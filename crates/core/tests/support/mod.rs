//! Mock collaborator implementations for core tests
//!
//! In-memory mocks for the LMS port, record-store repositories and payment
//! gateway, enabling deterministic tests without network or database
//! dependencies.

#![allow(dead_code)] // not every integration suite uses every helper

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use edulink_core::catalog::ports::LmsPort;
use edulink_core::catalog::simulated::paginate;
use edulink_core::enrollment::ports::PaymentGateway;
use edulink_core::sync::ports::{CourseRepository, EnrollmentRepository, StudentRepository};
use edulink_domain::{
    CanonicalCourse, CanonicalEnrollment, CanonicalUser, ChargeOutcome, EdulinkError, NewUser,
    Page, PaymentSpec, Result,
};

/// Build a canonical course for tests.
pub fn course(external_id: &str, title: &str) -> CanonicalCourse {
    CanonicalCourse {
        id: String::new(),
        title: title.to_string(),
        description: format!("{title} description"),
        image_url: String::new(),
        price_total: 1000.0,
        price_monthly: 100.0,
        duration_label: "6 months".to_string(),
        external_id: external_id.to_string(),
    }
}

/// Build a canonical user for tests.
pub fn user(external_id: &str, email: &str) -> CanonicalUser {
    CanonicalUser {
        id: String::new(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        phone: String::new(),
        tax_id: String::new(),
        external_id: external_id.to_string(),
        offline: false,
    }
}

/// In-memory mock for `LmsPort`.
///
/// Serves fixed collections paginated like the live client and supports
/// failure injection, either persistent or one-shot.
#[derive(Default)]
pub struct MockLms {
    courses: Mutex<Vec<CanonicalCourse>>,
    users: Mutex<Vec<CanonicalUser>>,
    read_failure: Mutex<Option<EdulinkError>>,
    fail_once: AtomicBool,
    enroll_failure: Mutex<Option<EdulinkError>>,
    create_user_failure: Mutex<Option<EdulinkError>>,
    pub course_page_calls: AtomicU32,
    pub user_page_calls: AtomicU32,
    pub create_user_calls: AtomicU32,
}

impl MockLms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(self, courses: Vec<CanonicalCourse>) -> Self {
        *self.courses.lock().unwrap() = courses;
        self
    }

    pub fn with_users(self, users: Vec<CanonicalUser>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    /// Fail every read until cleared.
    pub fn fail_reads_with(&self, error: EdulinkError) {
        *self.read_failure.lock().unwrap() = Some(error);
    }

    /// Fail only the next read, then recover.
    pub fn fail_next_read_with(&self, error: EdulinkError) {
        *self.read_failure.lock().unwrap() = Some(error);
        self.fail_once.store(true, Ordering::SeqCst);
    }

    pub fn clear_read_failure(&self) {
        *self.read_failure.lock().unwrap() = None;
    }

    pub fn fail_enrollment_with(&self, error: EdulinkError) {
        *self.enroll_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_create_user_with(&self, error: EdulinkError) {
        *self.create_user_failure.lock().unwrap() = Some(error);
    }

    fn take_read_failure(&self) -> Option<EdulinkError> {
        let mut slot = self.read_failure.lock().unwrap();
        let error = slot.clone();
        if error.is_some() && self.fail_once.swap(false, Ordering::SeqCst) {
            *slot = None;
        }
        error
    }
}

#[async_trait]
impl LmsPort for MockLms {
    async fn fetch_course_page(
        &self,
        page: u32,
        page_size: u32,
        _search: Option<&str>,
    ) -> Result<Page<CanonicalCourse>> {
        self.course_page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_read_failure() {
            return Err(error);
        }
        let courses = self.courses.lock().unwrap().clone();
        Ok(paginate(&courses, page, page_size))
    }

    async fn fetch_course(&self, external_id: &str) -> Result<CanonicalCourse> {
        if let Some(error) = self.take_read_failure() {
            return Err(error);
        }
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.external_id == external_id)
            .cloned()
            .ok_or_else(|| EdulinkError::NotFound(format!("course {external_id}")))
    }

    async fn fetch_user_page(
        &self,
        page: u32,
        page_size: u32,
        _search: Option<&str>,
    ) -> Result<Page<CanonicalUser>> {
        self.user_page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.take_read_failure() {
            return Err(error);
        }
        let users = self.users.lock().unwrap().clone();
        Ok(paginate(&users, page, page_size))
    }

    async fn create_remote_user(&self, user: &NewUser) -> Result<CanonicalUser> {
        self.create_user_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.create_user_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(CanonicalUser {
            id: String::new(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            tax_id: user.tax_id.clone().unwrap_or_default(),
            external_id: format!("u-{}", self.create_user_calls.load(Ordering::SeqCst)),
            offline: false,
        })
    }

    async fn create_remote_enrollment(
        &self,
        student_external_id: &str,
        course_external_id: &str,
    ) -> Result<String> {
        if let Some(error) = self.enroll_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(format!("rem-{student_external_id}-{course_external_id}"))
    }
}

/// In-memory mock for `CourseRepository`, keyed by external id.
#[derive(Default)]
pub struct MockCourseRepository {
    records: Mutex<HashMap<String, CanonicalCourse>>,
    next_id: AtomicU32,
    fail_writes_for: Mutex<Option<String>>,
}

impl MockCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a local record as if a previous sync had stored it.
    pub fn seed(&self, mut course: CanonicalCourse) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        course.id = format!("c-{id}");
        self.records.lock().unwrap().insert(course.external_id.clone(), course);
    }

    /// Force writes for the given external id to fail.
    pub fn fail_writes_for(&self, external_id: &str) {
        *self.fail_writes_for.lock().unwrap() = Some(external_id.to_string());
    }

    pub fn get(&self, external_id: &str) -> Option<CanonicalCourse> {
        self.records.lock().unwrap().get(external_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn write_blocked(&self, external_id: &str) -> bool {
        self.fail_writes_for.lock().unwrap().as_deref() == Some(external_id)
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<CanonicalCourse>> {
        Ok(self.records.lock().unwrap().get(external_id).cloned())
    }

    async fn insert(&self, course: &CanonicalCourse) -> Result<String> {
        if self.write_blocked(&course.external_id) {
            return Err(EdulinkError::Database("insert rejected by mock".into()));
        }
        let id = format!("c-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut stored = course.clone();
        stored.id = id.clone();
        self.records.lock().unwrap().insert(course.external_id.clone(), stored);
        Ok(id)
    }

    async fn update(&self, id: &str, course: &CanonicalCourse) -> Result<()> {
        if self.write_blocked(&course.external_id) {
            return Err(EdulinkError::Database("update rejected by mock".into()));
        }
        let mut stored = course.clone();
        stored.id = id.to_string();
        self.records.lock().unwrap().insert(course.external_id.clone(), stored);
        Ok(())
    }
}

/// In-memory mock for `StudentRepository`, keyed by external id.
#[derive(Default)]
pub struct MockStudentRepository {
    records: Mutex<HashMap<String, CanonicalUser>>,
    next_id: AtomicU32,
    fail_writes_for: Mutex<Option<String>>,
}

impl MockStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, mut user: CanonicalUser) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        user.id = format!("s-{id}");
        self.records.lock().unwrap().insert(user.external_id.clone(), user);
    }

    pub fn fail_writes_for(&self, external_id: &str) {
        *self.fail_writes_for.lock().unwrap() = Some(external_id.to_string());
    }

    pub fn get(&self, external_id: &str) -> Option<CanonicalUser> {
        self.records.lock().unwrap().get(external_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn write_blocked(&self, external_id: &str) -> bool {
        self.fail_writes_for.lock().unwrap().as_deref() == Some(external_id)
    }
}

#[async_trait]
impl StudentRepository for MockStudentRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<CanonicalUser>> {
        Ok(self.records.lock().unwrap().get(external_id).cloned())
    }

    async fn insert(&self, user: &CanonicalUser) -> Result<String> {
        if self.write_blocked(&user.external_id) {
            return Err(EdulinkError::Database("insert rejected by mock".into()));
        }
        let id = format!("s-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut stored = user.clone();
        stored.id = id.clone();
        self.records.lock().unwrap().insert(user.external_id.clone(), stored);
        Ok(id)
    }

    async fn update(&self, id: &str, user: &CanonicalUser) -> Result<()> {
        if self.write_blocked(&user.external_id) {
            return Err(EdulinkError::Database("update rejected by mock".into()));
        }
        let mut stored = user.clone();
        stored.id = id.to_string();
        self.records.lock().unwrap().insert(user.external_id.clone(), stored);
        Ok(())
    }
}

/// In-memory mock for `EnrollmentRepository`.
#[derive(Default)]
pub struct MockEnrollmentRepository {
    records: Mutex<Vec<CanonicalEnrollment>>,
    next_id: AtomicU32,
    fail_inserts: AtomicBool,
}

impl MockEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<CanonicalEnrollment> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepository {
    async fn insert(&self, enrollment: &CanonicalEnrollment) -> Result<String> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(EdulinkError::Database("enrollment insert rejected by mock".into()));
        }
        let id = format!("e-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut stored = enrollment.clone();
        stored.id = id.clone();
        self.records.lock().unwrap().push(stored);
        Ok(id)
    }
}

/// Scripted behavior for the mock payment gateway.
#[derive(Clone)]
pub enum PaymentBehavior {
    Issue(String),
    Reject(String),
    Fail(EdulinkError),
}

/// Mock for `PaymentGateway` with scripted outcomes.
pub struct MockPaymentGateway {
    behavior: PaymentBehavior,
    pub charges: Mutex<Vec<PaymentSpec>>,
}

impl MockPaymentGateway {
    pub fn issuing(invoice_url: &str) -> Self {
        Self { behavior: PaymentBehavior::Issue(invoice_url.to_string()), charges: Mutex::default() }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self { behavior: PaymentBehavior::Reject(reason.to_string()), charges: Mutex::default() }
    }

    pub fn failing(error: EdulinkError) -> Self {
        Self { behavior: PaymentBehavior::Fail(error), charges: Mutex::default() }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_charge(&self, spec: &PaymentSpec) -> Result<ChargeOutcome> {
        self.charges.lock().unwrap().push(spec.clone());
        match &self.behavior {
            PaymentBehavior::Issue(url) => Ok(ChargeOutcome::ok(url.clone())),
            PaymentBehavior::Reject(reason) => Ok(ChargeOutcome::failed(reason.clone())),
            PaymentBehavior::Fail(error) => Err(error.clone()),
        }
    }
}

/// Convenience alias used by the integration suites.
pub type SharedLms = Arc<MockLms>;
