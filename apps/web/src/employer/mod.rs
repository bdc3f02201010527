// Employer area: the current user's company profile and its vacancies.
// Every handler here requires an authenticated user.

pub mod handlers;
