//! Client-side sorting and selection bookkeeping over the fetched job list.
use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{CrawlJob, JobId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Url,
    Title,
    Status,
    HtmlVersion,
    InternalLinks,
    ExternalLinks,
    BrokenLinks,
    CreatedAt,
    CompletedAt,
    Duration,
}

impl SortField {
    pub fn parse(name: &str) -> Option<Self> {
        let field = match name.trim().to_ascii_lowercase().as_str() {
            "url" => SortField::Url,
            "title" => SortField::Title,
            "status" => SortField::Status,
            "html" | "htmlversion" | "html_version" => SortField::HtmlVersion,
            "internal" | "internallinks" | "internal_links" => SortField::InternalLinks,
            "external" | "externallinks" | "external_links" => SortField::ExternalLinks,
            "broken" | "brokenlinks" | "broken_links" => SortField::BrokenLinks,
            "created" | "createdat" | "created_at" => SortField::CreatedAt,
            "completed" | "completedat" | "completed_at" => SortField::CompletedAt,
            "duration" => SortField::Duration,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Same field flips direction; a new field starts ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue<'a> {
    Text(&'a str),
    Number(i64),
    Time(DateTime<Utc>),
}

fn sort_value(job: &CrawlJob, field: SortField) -> Option<SortValue<'_>> {
    match field {
        SortField::Url => Some(SortValue::Text(&job.url)),
        SortField::Title => Some(SortValue::Text(&job.title)),
        SortField::Status => Some(SortValue::Text(job.status.as_str())),
        SortField::HtmlVersion => Some(SortValue::Text(&job.html_version)),
        SortField::InternalLinks => Some(SortValue::Number(i64::from(job.internal_links))),
        SortField::ExternalLinks => Some(SortValue::Number(i64::from(job.external_links))),
        SortField::BrokenLinks => Some(SortValue::Number(i64::from(job.broken_links))),
        SortField::CreatedAt => job.created_at.map(SortValue::Time),
        SortField::CompletedAt => job.completed_at.map(SortValue::Time),
        SortField::Duration => job.duration.map(SortValue::Number),
    }
}

/// Absent values order before present ones when ascending, after when descending.
pub fn compare_jobs(a: &CrawlJob, b: &CrawlJob, sort: SortState) -> Ordering {
    let ordering = match (sort_value(a, sort.field), sort_value(b, sort.field)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => left.cmp(&right),
    };
    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort; equal keys keep their fetched order.
pub fn sort_jobs<'a>(jobs: impl IntoIterator<Item = &'a CrawlJob>, sort: SortState) -> Vec<&'a CrawlJob> {
    let mut sorted: Vec<&CrawlJob> = jobs.into_iter().collect();
    sorted.sort_by(|a, b| compare_jobs(a, b, sort));
    sorted
}

/// Selected job ids, kept in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    ids: Vec<JobId>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    pub fn ids(&self) -> &[JobId] {
        &self.ids
    }

    pub fn set(&mut self, id: &str, checked: bool) {
        if checked {
            if !self.contains(id) {
                self.ids.push(id.to_string());
            }
        } else {
            self.ids.retain(|selected| selected != id);
        }
    }

    /// Replace the selection with exactly `displayed`, or clear it.
    pub fn select_all<'a>(&mut self, displayed: impl IntoIterator<Item = &'a str>, checked: bool) {
        self.ids.clear();
        if checked {
            for id in displayed {
                self.set(id, true);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
