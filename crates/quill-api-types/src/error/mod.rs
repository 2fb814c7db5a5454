use serde::ser::SerializeMap;
use serde::Serialize;

#[cfg(feature = "axum")]
mod axum;

/// Machine-readable error category of an API error.
///
/// Every category maps to exactly one `code` string on the wire and
/// one HTTP status code (see the axum module).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unexpected server fault. Details are logged, never serialized.
    Unknown,
    InvalidRequest,
    /// The request carries no (or invalid) credentials.
    AccessDenied,
    /// The session user is not permitted to touch this resource.
    Forbidden,
    NotFound,
    LoginUserFailed(LoginUserFailed),
    RegisterUserFailed(RegisterUserFailed),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoginUserFailed {
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegisterUserFailed {
    EmailTaken,
    InvalidBirthday,
    WeakPassword,
}

impl ErrorCategory {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::InvalidRequest => "invalid_request",
            Self::AccessDenied => "access_denied",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::LoginUserFailed(..) => "login_user_failed",
            Self::RegisterUserFailed(..) => "register_user_failed",
        }
    }

    #[must_use]
    pub fn subcode(&self) -> Option<&'static str> {
        match self {
            Self::LoginUserFailed(LoginUserFailed::InvalidCredentials) => {
                Some("invalid_credentials")
            }
            Self::RegisterUserFailed(subcode) => Some(match subcode {
                RegisterUserFailed::EmailTaken => "email_taken",
                RegisterUserFailed::InvalidBirthday => "invalid_birthday",
                RegisterUserFailed::WeakPassword => "weak_password",
            }),
            _ => None,
        }
    }
}

/// An error object as the Quill API presents it to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Error {
    pub category: ErrorCategory,
    pub message: Option<String>,
}

impl Error {
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            message: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(ErrorCategory::Unknown)
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        Self {
            category: self.category,
            message: Some(message.into()),
        }
    }

    fn default_message(&self) -> &'static str {
        match &self.category {
            ErrorCategory::Unknown => {
                "Unexpected error has occurred. Please try again later."
            }
            ErrorCategory::InvalidRequest => "Invalid request.",
            ErrorCategory::AccessDenied => "Only for registered users.",
            ErrorCategory::Forbidden => "You're not allowed to do that.",
            ErrorCategory::NotFound => "Requested resource is not found.",
            ErrorCategory::LoginUserFailed(..) => "Invalid credentials.",
            ErrorCategory::RegisterUserFailed(..) => "Could not register user.",
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let subcode = self.category.subcode();
        let mut len = 2;
        if subcode.is_some() {
            len += 1;
        }

        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("code", self.category.code())?;
        if let Some(subcode) = subcode {
            map.serialize_entry("subcode", subcode)?;
        }
        match self.message.as_deref() {
            Some(message) => map.serialize_entry("message", message)?,
            None => map.serialize_entry("message", self.default_message())?,
        }
        map.end()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message.as_deref() {
            Some(message) => f.write_str(message),
            None => f.write_str(self.default_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_code_and_message() {
        let error = Error::new(ErrorCategory::NotFound);
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({ "code": "not_found", "message": "Requested resource is not found." })
        );
    }

    #[test]
    fn serializes_subcode_when_present() {
        let error = Error::new(ErrorCategory::RegisterUserFailed(
            RegisterUserFailed::EmailTaken,
        ))
        .message("That email address is already registered.");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "code": "register_user_failed",
                "subcode": "email_taken",
                "message": "That email address is already registered.",
            })
        );
    }

    #[test]
    fn custom_message_overrides_default() {
        let error = Error::new(ErrorCategory::InvalidRequest).message("Invalid limit!");
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["message"], "Invalid limit!");
    }
}
