use crate::table::{sort_jobs, Selection, SortState};
use crate::view_model::{DashboardView, JobRowView};
use crate::{CrawlJob, CrawlStats, JobId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct AddForm {
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    authenticated: bool,
    needs_login: bool,
    jobs: Vec<CrawlJob>,
    search_term: String,
    search_revision: u64,
    selection: Selection,
    sort: SortState,
    loading: bool,
    add_form: Option<AddForm>,
    detail: Option<CrawlJob>,
    stats: Option<CrawlStats>,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a session restored from storage.
    pub fn with_session(authenticated: bool) -> Self {
        Self {
            authenticated,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn jobs(&self) -> &[CrawlJob] {
        &self.jobs
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_revision(&self) -> u64 {
        self.search_revision
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form.is_some()
    }

    /// Jobs matching the search term, in table order.
    pub fn visible_jobs(&self) -> Vec<&CrawlJob> {
        let term = self.search_term.as_str();
        sort_jobs(self.jobs.iter().filter(|job| job.matches_search(term)), self.sort)
    }

    pub fn view(&self) -> DashboardView {
        let rows: Vec<JobRowView> = self
            .visible_jobs()
            .into_iter()
            .map(|job| JobRowView::from_job(job, self.selection.contains(&job.id)))
            .collect();
        let selected_count = self.selection.len();
        DashboardView {
            all_selected: !rows.is_empty() && selected_count == rows.len(),
            rows,
            total_jobs: self.jobs.len(),
            search_term: self.search_term.clone(),
            selected_count,
            loading: self.loading,
            sort: self.sort,
            add_form_open: self.add_form.is_some(),
            add_form_error: self.add_form.as_ref().and_then(|form| form.error.clone()),
            detail: self.detail.clone(),
            stats: self.stats,
            needs_login: self.needs_login,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
        if authenticated {
            self.needs_login = false;
        }
        self.mark_dirty();
    }

    pub(crate) fn require_login(&mut self) {
        self.authenticated = false;
        self.needs_login = true;
        self.mark_dirty();
    }

    /// Forget everything tied to the signed-in user.
    pub(crate) fn reset_session(&mut self) {
        let sort = self.sort;
        *self = Self {
            sort,
            needs_login: true,
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_jobs(&mut self, jobs: Vec<CrawlJob>) {
        self.jobs = jobs;
        self.mark_dirty();
    }

    /// Store a new search term and return its revision.
    pub(crate) fn set_search_term(&mut self, term: String) -> u64 {
        self.search_term = term;
        self.search_revision += 1;
        self.mark_dirty();
        self.search_revision
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        self.mark_dirty();
        &mut self.selection
    }

    pub(crate) fn visible_ids(&self) -> Vec<JobId> {
        self.visible_jobs().into_iter().map(|job| job.id.clone()).collect()
    }

    pub(crate) fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.mark_dirty();
    }

    pub(crate) fn open_add_form(&mut self) {
        self.add_form = Some(AddForm::default());
        self.mark_dirty();
    }

    pub(crate) fn close_add_form(&mut self) {
        self.add_form = None;
        self.mark_dirty();
    }

    /// Record an error on the add form, opening it if needed.
    pub(crate) fn set_add_form_error(&mut self, error: String) {
        self.add_form.get_or_insert_with(AddForm::default).error = Some(error);
        self.mark_dirty();
    }

    pub(crate) fn set_detail(&mut self, detail: Option<CrawlJob>) {
        self.detail = detail;
        self.mark_dirty();
    }

    pub(crate) fn set_stats(&mut self, stats: CrawlStats) {
        self.stats = Some(stats);
        self.mark_dirty();
    }
}
