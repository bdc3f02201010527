// Public browsing: landing page, vacancy listings, vacancy detail and the
// application (response) flow.

pub mod handlers;
