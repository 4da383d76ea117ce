use crate::domain::error::DomainError;
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

const EMAIL_INVALID: &str = "유효한 이메일 형식이 아닙니다";

// Checked in this order; within a field, blank beats format beats length.
const FIELDS: [&str; 2] = ["email", "name"];
const CODES: [&str; 3] = ["blank", "email", "length"];

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserRequest {
    #[serde(default)]
    #[validate(
        custom(function = "email_not_blank"),
        email(message = "유효한 이메일 형식이 아닙니다"),
        custom(function = "dot_atom_local_part"),
        length(max = 255, message = "이메일은 255자를 초과할 수 없습니다")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(
        custom(function = "name_not_blank"),
        length(max = 100, message = "이름은 100자를 초과할 수 없습니다")
    )]
    pub name: String,
}

impl UserRequest {
    /// Runs the field rules and reports the first violation as a `DomainError`.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|errors| DomainError::Validation(first_message(&errors)))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let by_field = errors.field_errors();
    FIELDS
        .iter()
        .filter_map(|field| by_field.get(*field))
        .find_map(|field_errors| {
            CODES.iter().find_map(|code| {
                field_errors
                    .iter()
                    .find(|e| e.code == *code)
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
            })
        })
        .unwrap_or_else(|| errors.to_string())
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn email_not_blank(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(rule("blank", "이메일은 필수입니다"));
    }
    Ok(())
}

fn name_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(rule("blank", "이름은 필수입니다"));
    }
    Ok(())
}

// The local part must be dot-separated atoms: no leading, trailing or doubled dots.
fn dot_atom_local_part(email: &str) -> Result<(), ValidationError> {
    let local = email.rsplit_once('@').map_or(email, |(local, _)| local);
    if local.split('.').any(str::is_empty) {
        return Err(rule("email", EMAIL_INVALID));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(email: &str, name: &str) -> UserRequest {
        UserRequest {
            email: email.to_string(),
            name: name.to_string(),
        }
    }

    fn message(request: UserRequest) -> String {
        request.ensure_valid().unwrap_err().to_string()
    }

    #[test]
    fn accepts_ordinary_request() {
        assert!(req("kim@example.com", "김민준").ensure_valid().is_ok());
        assert!(req("first.last+tag@mail.example.co.kr", "A").ensure_valid().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(message(req("  ", "A")), "이메일은 필수입니다");
        assert_eq!(message(req("a@b.com", "")), "이름은 필수입니다");
        assert_eq!(message(req("", "")), "이메일은 필수입니다");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "plain",
            "@b.com",
            "a@",
            "a@@b.com",
            "a b@c.com",
            "a@b..com",
            "a@.com",
            "a,b@c.com",
            "a.@b.com",
            ".a@b.com",
            "a..b@c.com",
            "a@-b.com",
            "a@b!c.com",
            "<x>@y.com",
            "a\"b@c.com",
        ] {
            assert_eq!(message(req(email, "A")), EMAIL_INVALID, "{email}");
        }
    }

    #[test]
    fn email_errors_win_over_name_errors() {
        assert_eq!(message(req("a,b@c.com", "")), EMAIL_INVALID);
    }

    #[test]
    fn length_limits_count_characters() {
        // 64-char local part and 203-char domain: well-formed, 268 chars total.
        let email = format!("{}@{}com", "a".repeat(64), format!("{}.", "b".repeat(49)).repeat(4));
        assert_eq!(message(req(&email, "A")), "이메일은 255자를 초과할 수 없습니다");

        let name = "가".repeat(100);
        assert!(req("a@b.com", &name).ensure_valid().is_ok());

        let name = "가".repeat(101);
        assert_eq!(message(req("a@b.com", &name)), "이름은 100자를 초과할 수 없습니다");
    }

    #[test]
    fn missing_fields_deserialize_as_blank() {
        let request: UserRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(message(request), "이름은 필수입니다");
    }
}
