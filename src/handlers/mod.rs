use rocket::{catch, get};

pub mod reservations;

/// Liveness check.
#[get("/api")]
pub fn index() -> &'static str {
    "API running"
}

#[catch(400)]
pub fn catch400() -> &'static str {
    "Malformed request body"
}

#[catch(404)]
pub fn catch404() -> &'static str {
    "Not found"
}

#[catch(422)]
pub fn catch422() -> &'static str {
    "Malformed request body"
}

#[catch(500)]
pub fn catch500() -> &'static str {
    "Internal server error"
}
