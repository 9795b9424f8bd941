//! Input Validation
//!
//! Field rules shared by signup, post and status operations. Each check
//! appends to a list of [`FieldError`]s so a client sees every rejected
//! field in one response.

use crate::shared::error::FieldError;

/// Minimum accepted password length (after trimming)
pub const MIN_PASSWORD_LEN: usize = 5;

/// Minimum accepted title and content length (after trimming)
pub const MIN_POST_TEXT_LEN: usize = 5;

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !domain.starts_with('.'),
        None => false,
    }
}

/// Backslashes in uploaded paths are normalised to forward slashes.
pub fn normalize_image_url(url: &str) -> String {
    url.replace('\\', "/")
}

fn min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Validate signup input. `email` is expected to be normalised already.
pub fn validate_signup(email: &str, password: &str, name: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please enter a valid email."));
    }
    if !min_len(password, MIN_PASSWORD_LEN) {
        errors.push(FieldError::new("password", "Password too short."));
    }
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name must not be empty."));
    }
    errors
}

/// Validate title and content of a post.
pub fn validate_post(title: &str, content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !min_len(title, MIN_POST_TEXT_LEN) {
        errors.push(FieldError::new("title", "Title is invalid."));
    }
    if !min_len(content, MIN_POST_TEXT_LEN) {
        errors.push(FieldError::new("content", "Content is invalid."));
    }
    errors
}

/// A new post must name an image.
pub fn validate_image_url(image_url: &str) -> Vec<FieldError> {
    if image_url.trim().is_empty() {
        vec![FieldError::new("imageUrl", "No image provided.")]
    } else {
        Vec::new()
    }
}

/// Validate a new user status.
pub fn validate_status(status: &str) -> Vec<FieldError> {
    if status.trim().is_empty() {
        vec![FieldError::new("status", "Status must not be empty.")]
    } else {
        Vec::new()
    }
}
