//! Structural validation of inbound requests, applied by the transport
//! adapter before the service runs. Checks are pure and aggregate every
//! violated field instead of stopping at the first.

use std::fmt;

use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

pub fn validate_register(email: &str, password: &str) -> Result<(), Violations> {
    let mut violations = Vec::new();
    check_email(email, &mut violations);
    check_password(password, &mut violations);
    finish(violations)
}

pub fn validate_login(email: &str, password: &str, app_id: i64) -> Result<(), Violations> {
    let mut violations = Vec::new();
    check_email(email, &mut violations);
    check_password(password, &mut violations);
    if app_id <= 0 {
        violations.push(Violation { field: "app_id", message: "app_id is required" });
    }
    finish(violations)
}

pub fn validate_user_id(user_id: i64) -> Result<(), Violations> {
    if user_id <= 0 {
        return Err(Violations(vec![Violation { field: "user_id", message: "user_id is required" }]));
    }
    Ok(())
}

fn check_email(email: &str, out: &mut Vec<Violation>) {
    if email.is_empty() {
        out.push(Violation { field: "email", message: "email is required" });
    } else if !is_valid_email(email) {
        out.push(Violation { field: "email", message: "email must be a valid email address" });
    }
}

fn check_password(password: &str, out: &mut Vec<Violation>) {
    if password.is_empty() {
        out.push(Violation { field: "password", message: "password is required" });
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        out.push(Violation { field: "password", message: "password must be at least 6 characters" });
    }
}

/// Syntactic check only: one `@`, a non-empty local part, and a dotted
/// domain. Deliverability is not our concern here.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn finish(violations: Vec<Violation>) -> Result<(), Violations> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Violations(violations))
    }
}
