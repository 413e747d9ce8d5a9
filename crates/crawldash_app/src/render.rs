//! Plain-text rendering of the dashboard view, one line per row.
use crawldash_core::{CrawlJob, CrawlStats, DashboardView, JobRowView, SortDirection};

pub const LOGIN_PROMPT: &str = "Not logged in. Use `login <email> <password>` or `register <name> <email> <password>`.";

pub fn render_view(view: &DashboardView) -> String {
    if view.loading {
        return "Loading crawl jobs...".to_string();
    }
    let mut lines = Vec::with_capacity(view.rows.len() + 4);
    lines.push(header(view));
    if view.rows.is_empty() {
        lines.push("  (no crawl jobs)".to_string());
    }
    lines.extend(view.rows.iter().map(row_line));
    if let Some(error) = &view.add_form_error {
        lines.push(format!("Add URL: {error}"));
    }
    if let Some(job) = &view.detail {
        lines.extend(detail_lines(job));
    }
    if let Some(stats) = &view.stats {
        lines.push(stats_line(stats));
    }
    lines.join("\n")
}

fn header(view: &DashboardView) -> String {
    let direction = match view.sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    let mut header = format!(
        "Crawl jobs: {} shown of {} | {} selected{} | sort {:?} {}",
        view.rows.len(),
        view.total_jobs,
        view.selected_count,
        if view.all_selected { " (all)" } else { "" },
        view.sort.field,
        direction
    );
    if !view.search_term.is_empty() {
        header.push_str(&format!(" | search \"{}\"", view.search_term));
    }
    header
}

fn row_line(row: &JobRowView) -> String {
    let created = row
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] {:>5} {:<9} {} | {} | {} | int {} ext {} broken {} | {}",
        if row.selected { "x" } else { " " },
        row.id,
        row.status.as_str(),
        row.url,
        or_dash(&row.title),
        or_dash(&row.html_version),
        row.internal_links,
        row.external_links,
        row.broken_links,
        created
    )
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() {
        "-"
    } else {
        text
    }
}

fn detail_lines(job: &CrawlJob) -> Vec<String> {
    let headings = &job.heading_counts;
    let mut lines = vec![
        format!("Details for {} ({})", job.id, job.url),
        format!("  status: {}  login form: {}", job.status, if job.has_login_form { "yes" } else { "no" }),
        format!(
            "  headings: h1 {} h2 {} h3 {} h4 {} h5 {} h6 {} (total {})",
            headings.h1, headings.h2, headings.h3, headings.h4, headings.h5, headings.h6, headings.total()
        ),
    ];
    if let Some(duration) = job.duration {
        lines.push(format!("  duration: {duration} ms"));
    }
    if let Some(error) = &job.error {
        lines.push(format!("  error: {error}"));
    }
    for link in job.broken_link_details.iter().flatten() {
        let reason = link.error.as_deref().unwrap_or("");
        lines.push(format!("  broken: {} {} {}", link.status_code, link.url, reason).trim_end().to_string());
    }
    lines
}

fn stats_line(stats: &CrawlStats) -> String {
    format!(
        "Stats: {} total, {} queued, {} running, {} completed, {} error",
        stats.total_urls, stats.queued_urls, stats.running_urls, stats.completed_urls, stats.error_urls
    )
}
