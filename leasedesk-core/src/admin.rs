//! Admin login and password-change request bodies

use serde::{Deserialize, Serialize};

use crate::ValidationError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
        }
    }

    pub fn validate(self) -> Result<String, ValidationError> {
        self.password
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::Missing { field: "password" })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

/// Validated password rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

impl ChangePasswordRequest {
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            current_password: Some(current.into()),
            new_password: Some(new.into()),
        }
    }

    pub fn validate(self) -> Result<PasswordChange, ValidationError> {
        let current = self.current_password.filter(|p| !p.is_empty());
        let new = self.new_password.filter(|p| !p.is_empty());

        match (current, new) {
            (Some(current), Some(new)) => Ok(PasswordChange { current, new }),
            (current, new) => {
                let mut fields = Vec::new();
                if current.is_none() {
                    fields.push("currentPassword");
                }
                if new.is_none() {
                    fields.push("newPassword");
                }
                Err(ValidationError::MissingFields { fields })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_requires_password() {
        let req: LoginRequest = serde_json::from_value(json!({"password": ""})).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::Missing { field: "password" }
        );
    }

    #[test]
    fn change_password_uses_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_value(
            json!({"currentPassword": "old", "newPassword": "new"}),
        )
        .unwrap();
        assert_eq!(
            req.validate().unwrap(),
            PasswordChange {
                current: "old".into(),
                new: "new".into()
            }
        );

        let req: ChangePasswordRequest =
            serde_json::from_value(json!({"currentPassword": "old"})).unwrap();
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingFields {
                fields: vec!["newPassword"]
            }
        );
    }
}
