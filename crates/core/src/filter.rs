use crate::types::Job;

/// Sentinel department option meaning "no department restriction".
pub const ALL_DEPARTMENTS: &str = "All";

/// Drops every job that is not published.
///
/// This is the single place the status filter runs; callers receive data
/// that is already safe to display and must not re-check it downstream.
pub fn retain_published(mut jobs: Vec<Job>) -> Vec<Job> {
    jobs.retain(|job| job.status.is_published());
    jobs
}

/// Narrows a job list by free-text query and department selection.
///
/// The query matches case-insensitively as a substring of title, location,
/// or description. The department must match exactly unless the
/// [`ALL_DEPARTMENTS`] sentinel is selected. Pure and idempotent.
pub fn filter_jobs(mut jobs: Vec<Job>, query: &str, department: &str) -> Vec<Job> {
    let needle = query.trim().to_lowercase();
    jobs.retain(|job| matches_query(job, &needle) && matches_department(job, department));
    jobs
}

fn matches_query(job: &Job, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    job.title.to_lowercase().contains(needle)
        || job.location.to_lowercase().contains(needle)
        || job.description.to_lowercase().contains(needle)
}

fn matches_department(job: &Job, department: &str) -> bool {
    department == ALL_DEPARTMENTS || job.department == department
}

/// Returns the selectable department options for a job list.
///
/// [`ALL_DEPARTMENTS`] comes first, followed by the remaining departments in
/// first-seen order with duplicates removed.
pub fn department_options(jobs: &[Job]) -> Vec<String> {
    let mut options = vec![ALL_DEPARTMENTS.to_string()];
    for job in jobs {
        if !options.iter().any(|existing| existing == &job.department) {
            options.push(job.department.clone());
        }
    }
    options
}
