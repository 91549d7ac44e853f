//! Input rules for account fields.

use validator::ValidateEmail;

use crate::validation::{required_text, FieldErrors, REQUIRED, BLANK};

pub const USERNAME_MAX: usize = 150;
pub const EMAIL_MAX: usize = 254;
pub const FIRST_NAME_MAX: usize = 30;
pub const NAME_MAX: usize = 150;
pub const PASSWORD_MIN: usize = 8;

pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Every password rule the value breaks, in a stable order.
pub fn password_problems(password: &str) -> Vec<&'static str> {
    let mut problems = Vec::new();
    if password.chars().count() < PASSWORD_MIN {
        problems.push("Password must contain at least 8 characters.");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one digit.");
    }
    problems
}

pub fn username_is_valid(username: &str) -> bool {
    username.chars().all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

pub fn check_username(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    let username = required_text(errors, "username", value, Some(USERNAME_MAX))?;
    if !username_is_valid(&username) {
        errors.add("username", INVALID_USERNAME);
        return None;
    }
    Some(username)
}

pub fn check_email(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    let email = required_text(errors, "email", value, Some(EMAIL_MAX))?;
    if !email.validate_email() {
        errors.add("email", INVALID_EMAIL);
        return None;
    }
    Some(email)
}

/// Passwords are taken verbatim; surrounding whitespace is significant.
pub fn check_password(errors: &mut FieldErrors, value: Option<&str>) -> Option<String> {
    let Some(password) = value else {
        errors.add("password", REQUIRED);
        return None;
    };
    if password.is_empty() {
        errors.add("password", BLANK);
        return None;
    }
    let problems = password_problems(password);
    if !problems.is_empty() {
        for p in problems {
            errors.add("password", p);
        }
        return None;
    }
    Some(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_reports_every_rule() {
        assert_eq!(password_problems("abc").len(), 3);
        assert_eq!(password_problems("abcdefgh"), vec![
            "Password must contain at least one uppercase letter.",
            "Password must contain at least one digit.",
        ]);
        assert!(password_problems("Abcdef12").is_empty());
    }

    #[test]
    fn password_length_alone() {
        assert_eq!(password_problems("Abcde12"), vec!["Password must contain at least 8 characters."]);
    }

    #[test]
    fn username_charset() {
        assert!(username_is_valid("bob.smith+1@x_y-z"));
        assert!(!username_is_valid("bob smith"));
        assert!(!username_is_valid("bob!"));
    }

    #[test]
    fn email_syntax_checked() {
        let mut e = FieldErrors::new();
        assert_eq!(check_email(&mut e, Some(" b@x.com ")), Some("b@x.com".into()));
        assert_eq!(check_email(&mut e, Some("not-an-email")), None);
        assert_eq!(e.get("email"), Some(&[INVALID_EMAIL.to_string()][..]));
    }

    #[test]
    fn blank_password_is_not_rule_checked() {
        let mut e = FieldErrors::new();
        assert_eq!(check_password(&mut e, Some("")), None);
        assert_eq!(e.get("password"), Some(&[BLANK.to_string()][..]));
    }
}
