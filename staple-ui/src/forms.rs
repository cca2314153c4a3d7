//! Client-side form validation
//!
//! Submit buttons are enabled only while these hold.

pub fn login_valid(email: &str, password: &str) -> bool {
    !email.is_empty() && !password.is_empty()
}

pub fn signup_valid(email: &str, password: &str, confirm: &str) -> bool {
    !email.is_empty() && !password.is_empty() && !confirm.is_empty() && password == confirm
}

pub fn reset_request_valid(email: &str) -> bool {
    !email.is_empty()
}

pub fn reset_code_valid(code: &str) -> bool {
    !code.is_empty()
}

pub fn new_staple_valid(name: &str, content: &str) -> bool {
    !name.is_empty() && !content.is_empty()
}

pub fn password_change_valid(password: &str, confirm: &str) -> bool {
    !password.is_empty() && password == confirm
}

/// Parse the max-staples field
pub fn parse_max_staples(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}
