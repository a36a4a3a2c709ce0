//! Sync engine: create-or-update reconciliation of upstream collections
//!
//! Walks the paginated upstream collection sequentially (bounding load on
//! both systems and keeping log ordering deterministic) and reconciles each
//! remote record against local storage. The join key is exclusively the
//! upstream external id; matching by name or email is ambiguous across
//! renames and is not done.
//!
//! Reconciliation is best-effort: a single bad record increments `failed`
//! and is logged, but never aborts the pass.

use std::sync::Arc;
use std::time::Instant;

use edulink_domain::constants::DEFAULT_PAGE_SIZE;
use edulink_domain::{
    CanonicalCourse, CanonicalUser, EdulinkError, Page, Result, SyncRun, SyncRunType, SyncScope,
};
use tracing::{debug, info, instrument, warn};

use super::ports::{CourseRepository, StudentRepository};
use crate::catalog::ports::LmsPort;
use crate::offline::OfflineController;

/// Delay before the single per-page retry.
const PAGE_RETRY_DELAY_MS: u64 = 200;

/// Drives full-collection or incremental reconciliation for courses and
/// users.
pub struct SyncEngine {
    lms: Arc<dyn LmsPort>,
    courses: Arc<dyn CourseRepository>,
    students: Arc<dyn StudentRepository>,
    offline: Arc<OfflineController>,
    page_size: u32,
    deadline: Option<Instant>,
}

impl SyncEngine {
    pub fn new(
        lms: Arc<dyn LmsPort>,
        courses: Arc<dyn CourseRepository>,
        students: Arc<dyn StudentRepository>,
        offline: Arc<OfflineController>,
    ) -> Self {
        Self { lms, courses, students, offline, page_size: DEFAULT_PAGE_SIZE, deadline: None }
    }

    /// Override the upstream page size (mainly for tests).
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Impose an overall deadline on the run. Once reached, the engine stops
    /// issuing new page fetches and returns the partial run accumulated so
    /// far; a partial sync is a valid, reportable outcome.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reconcile the upstream course collection against local storage.
    #[instrument(skip(self))]
    pub async fn reconcile_courses(&self, scope: SyncScope) -> SyncRun {
        let mut run = SyncRun::new(SyncRunType::Courses, scope);
        let mut page = 1u32;

        loop {
            let fetched = match self.fetch_course_page_with_retry(page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    self.abort_or_truncate(&mut run, page, &e);
                    break;
                }
            };

            if page == 1 && fetched.items.is_empty() && fetched.total_items > 0 {
                run.log_line("first page was empty where data was expected; aborting run");
                break;
            }

            self.offline.record_success();
            run.log_line(format!("page {page}: {} courses received", fetched.items.len()));

            for item in &fetched.items {
                self.reconcile_course(item, &mut run).await;
            }

            if !self.more_pages(scope, page, fetched.total_pages, &mut run) {
                break;
            }
            page += 1;
        }

        info!(
            imported = run.imported,
            updated = run.updated,
            failed = run.failed,
            total = run.total,
            "course reconciliation finished"
        );
        run
    }

    /// Reconcile the upstream user collection against local storage.
    #[instrument(skip(self))]
    pub async fn reconcile_users(&self, scope: SyncScope) -> SyncRun {
        let mut run = SyncRun::new(SyncRunType::Users, scope);
        let mut page = 1u32;

        loop {
            let fetched = match self.fetch_user_page_with_retry(page).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    self.abort_or_truncate(&mut run, page, &e);
                    break;
                }
            };

            if page == 1 && fetched.items.is_empty() && fetched.total_items > 0 {
                run.log_line("first page was empty where data was expected; aborting run");
                break;
            }

            self.offline.record_success();
            run.log_line(format!("page {page}: {} users received", fetched.items.len()));

            for item in &fetched.items {
                self.reconcile_user(item, &mut run).await;
            }

            if !self.more_pages(scope, page, fetched.total_pages, &mut run) {
                break;
            }
            page += 1;
        }

        info!(
            imported = run.imported,
            updated = run.updated,
            failed = run.failed,
            total = run.total,
            "user reconciliation finished"
        );
        run
    }

    async fn reconcile_course(&self, item: &CanonicalCourse, run: &mut SyncRun) {
        run.total += 1;

        if item.external_id.is_empty() {
            run.failed += 1;
            run.log_line(format!("course '{}': missing external id, skipped", item.title));
            return;
        }

        match self.courses.find_by_external_id(&item.external_id).await {
            Ok(Some(existing)) => match self.courses.update(&existing.id, item).await {
                Ok(()) => {
                    debug!(external_id = %item.external_id, "course updated");
                    run.updated += 1;
                }
                Err(e) => {
                    run.failed += 1;
                    run.log_line(format!("course {}: update failed: {e}", item.external_id));
                }
            },
            Ok(None) => match self.courses.insert(item).await {
                Ok(_) => {
                    debug!(external_id = %item.external_id, "course imported");
                    run.imported += 1;
                }
                Err(e) => {
                    run.failed += 1;
                    run.log_line(format!("course {}: insert failed: {e}", item.external_id));
                }
            },
            Err(e) => {
                run.failed += 1;
                run.log_line(format!("course {}: lookup failed: {e}", item.external_id));
            }
        }
    }

    async fn reconcile_user(&self, item: &CanonicalUser, run: &mut SyncRun) {
        run.total += 1;

        if item.external_id.is_empty() {
            run.failed += 1;
            run.log_line(format!("user '{}': missing external id, skipped", item.email));
            return;
        }

        match self.students.find_by_external_id(&item.external_id).await {
            Ok(Some(existing)) => match self.students.update(&existing.id, item).await {
                Ok(()) => {
                    debug!(external_id = %item.external_id, "user updated");
                    run.updated += 1;
                }
                Err(e) => {
                    run.failed += 1;
                    run.log_line(format!("user {}: update failed: {e}", item.external_id));
                }
            },
            Ok(None) => match self.students.insert(item).await {
                Ok(_) => {
                    debug!(external_id = %item.external_id, "user imported");
                    run.imported += 1;
                }
                Err(e) => {
                    run.failed += 1;
                    run.log_line(format!("user {}: insert failed: {e}", item.external_id));
                }
            },
            Err(e) => {
                run.failed += 1;
                run.log_line(format!("user {}: lookup failed: {e}", item.external_id));
            }
        }
    }

    async fn fetch_course_page_with_retry(&self, page: u32) -> Result<Page<CanonicalCourse>> {
        match self.lms.fetch_course_page(page, self.page_size, None).await {
            Ok(fetched) => Ok(fetched),
            Err(e) if e.triggers_offline() => {
                warn!(page, error = %e, "course page fetch failed, retrying once");
                tokio::time::sleep(std::time::Duration::from_millis(PAGE_RETRY_DELAY_MS)).await;
                self.lms.fetch_course_page(page, self.page_size, None).await
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_user_page_with_retry(&self, page: u32) -> Result<Page<CanonicalUser>> {
        match self.lms.fetch_user_page(page, self.page_size, None).await {
            Ok(fetched) => Ok(fetched),
            Err(e) if e.triggers_offline() => {
                warn!(page, error = %e, "user page fetch failed, retrying once");
                tokio::time::sleep(std::time::Duration::from_millis(PAGE_RETRY_DELAY_MS)).await;
                self.lms.fetch_user_page(page, self.page_size, None).await
            }
            Err(e) => Err(e),
        }
    }

    /// A failed first page aborts the run with `total = 0`; a failure on a
    /// later page truncates it, keeping what was already reconciled. Either
    /// way the reason lands in the log rather than silently reporting
    /// success.
    fn abort_or_truncate(&self, run: &mut SyncRun, page: u32, error: &EdulinkError) {
        self.offline.record_failure(error);
        if page == 1 {
            run.log_line(format!("aborted: page 1 fetch failed: {error}"));
        } else {
            run.log_line(format!("truncated at page {page}: {error}"));
        }
    }

    /// Decide whether to continue into the next page, honoring scope and the
    /// optional overall deadline.
    fn more_pages(&self, scope: SyncScope, page: u32, total_pages: u32, run: &mut SyncRun) -> bool {
        if scope != SyncScope::Full || page >= total_pages {
            return false;
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                run.log_line(format!(
                    "deadline reached after page {page}, returning partial run"
                ));
                return false;
            }
        }

        true
    }
}
