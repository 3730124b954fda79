//! Form Schema Layer
//!
//! Every form on the site is described once as a static [`FormSchema`]. The
//! page renderer turns a schema into HTML controls and the API handlers
//! validate submitted JSON against the very same schema, so the client-side
//! hints and the server-side checks cannot drift apart.
//!
//! # Example
//!
//! ```rust
//! use matchday::shared::forms::SIGN_IN;
//!
//! let body = serde_json::json!({ "email": "fan@example.com", "password": "hunter22" });
//! assert!(SIGN_IN.validate(&body).is_ok());
//! ```

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::shared::error::FieldError;

/// Kind of control a field renders as, and how its value is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    TextArea,
    Number,
    Checkbox,
    /// RFC 3339 timestamp
    DateTime,
    Hidden,
    Select(&'static [&'static str]),
}

impl FieldKind {
    /// Whether values of this kind are free text with length limits
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Email | FieldKind::Password | FieldKind::TextArea | FieldKind::Hidden
        )
    }
}

/// Declarative metadata for one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub placeholder: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            min_len: None,
            max_len: None,
            placeholder: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    pub const fn max(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<(), FieldError> {
        let value = match value {
            None | Some(Value::Null) => return self.missing(),
            Some(Value::String(s)) if s.trim().is_empty() => return self.missing(),
            Some(v) => v,
        };

        match self.kind {
            kind if kind.is_textual() => {
                let text = value
                    .as_str()
                    .ok_or_else(|| self.error(format!("{} must be text", self.label)))?;
                self.check_length(text)?;
                if kind == FieldKind::Email && !is_valid_email(text) {
                    return Err(self.error("Enter a valid email address"));
                }
                Ok(())
            }
            FieldKind::Number => {
                let numeric = match value {
                    Value::Number(_) => true,
                    Value::String(s) => s.trim().parse::<f64>().is_ok(),
                    _ => false,
                };
                if numeric {
                    Ok(())
                } else {
                    Err(self.error(format!("{} must be a number", self.label)))
                }
            }
            FieldKind::Checkbox => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(self.error(format!("{} must be true or false", self.label)))
                }
            }
            FieldKind::DateTime => value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|_| ())
                .ok_or_else(|| self.error(format!("{} must be a valid date and time", self.label))),
            FieldKind::Select(options) => match value.as_str() {
                Some(choice) if options.contains(&choice) => Ok(()),
                _ => Err(self.error(format!("{} must be one of: {}", self.label, options.join(", ")))),
            },
            _ => Ok(()),
        }
    }

    fn check_length(&self, text: &str) -> Result<(), FieldError> {
        let len = text.chars().count();
        if let Some(min) = self.min_len {
            if len < min {
                return Err(self.error(format!("{} must be at least {} characters", self.label, min)));
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                return Err(self.error(format!("{} must be at most {} characters", self.label, max)));
            }
        }
        Ok(())
    }

    fn missing(&self) -> Result<(), FieldError> {
        if self.required {
            Err(self.error(format!("{} is required", self.label)))
        } else {
            Ok(())
        }
    }

    fn error(&self, message: impl Into<String>) -> FieldError {
        FieldError::new(self.name, message)
    }
}

/// A complete form: where it submits and which fields it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub id: &'static str,
    pub title: &'static str,
    /// API endpoint the form posts JSON to
    pub action: &'static str,
    pub method: &'static str,
    pub submit_label: &'static str,
    /// Page to navigate to after a successful submission
    pub redirect: Option<&'static str>,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    /// Validate a JSON object against every field of the schema
    ///
    /// Fields not named by the schema are ignored. All failures are
    /// collected rather than stopping at the first.
    pub fn validate(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = match body.as_object() {
            Some(object) => object,
            None => return Err(vec![FieldError::new("body", "Expected a JSON object")]),
        };

        collect_errors(
            self.fields
                .iter()
                .filter_map(|field| field.check(object.get(field.name)).err()),
        )
    }

    /// Validate only the fields a partial update carries
    ///
    /// Absent and `null` fields are left unchanged by an update, so only
    /// fields with a value are checked. A blank required field still fails.
    pub fn validate_present(&self, body: &Value) -> Result<(), Vec<FieldError>> {
        let object = match body.as_object() {
            Some(object) => object,
            None => return Err(vec![FieldError::new("body", "Expected a JSON object")]),
        };

        collect_errors(self.fields.iter().filter_map(|field| match object.get(field.name) {
            None | Some(Value::Null) => None,
            value => field.check(value).err(),
        }))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn collect_errors(errors: impl Iterator<Item = FieldError>) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = errors.collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A request body described by a form schema
///
/// The backend's `Validated<T>` extractor checks the raw JSON against
/// [`FormRequest::schema`] before deserializing it into `T`. Partial
/// update bodies set `PARTIAL` and are checked with
/// [`FormSchema::validate_present`].
pub trait FormRequest: DeserializeOwned {
    const PARTIAL: bool = false;

    fn schema() -> &'static FormSchema;

    fn validate_body(body: &Value) -> Result<(), Vec<FieldError>> {
        if Self::PARTIAL {
            Self::schema().validate_present(body)
        } else {
            Self::schema().validate(body)
        }
    }
}

/// Minimal structural email check: `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

pub const SPORTS: &[&str] = &["football", "basketball", "tennis", "baseball", "hockey", "cricket", "other"];

pub const SIGN_UP: FormSchema = FormSchema {
    id: "sign-up",
    title: "Create your account",
    action: "/api/auth/sign-up",
    method: "POST",
    submit_label: "Sign up",
    redirect: Some("/dashboard"),
    fields: &[
        FieldSpec::new("username", "Username", FieldKind::Text).required().min(3).max(30).placeholder("matchday_fan"),
        FieldSpec::new("email", "Email", FieldKind::Email).required().max(254).placeholder("you@example.com"),
        FieldSpec::new("password", "Password", FieldKind::Password).required().min(8).max(128),
    ],
};

pub const SIGN_IN: FormSchema = FormSchema {
    id: "sign-in",
    title: "Sign in",
    action: "/api/auth/sign-in",
    method: "POST",
    submit_label: "Sign in",
    redirect: Some("/dashboard"),
    fields: &[
        FieldSpec::new("email", "Email", FieldKind::Email).required().max(254).placeholder("you@example.com"),
        FieldSpec::new("password", "Password", FieldKind::Password).required().max(128),
    ],
};

pub const FORGOT_PASSWORD: FormSchema = FormSchema {
    id: "forgot-password",
    title: "Reset your password",
    action: "/api/auth/forgot-password",
    method: "POST",
    submit_label: "Send reset link",
    redirect: None,
    fields: &[FieldSpec::new("email", "Email", FieldKind::Email).required().max(254)],
};

pub const RESET_PASSWORD: FormSchema = FormSchema {
    id: "reset-password",
    title: "Choose a new password",
    action: "/api/auth/reset-password",
    method: "POST",
    submit_label: "Update password",
    redirect: Some("/sign-in"),
    fields: &[
        FieldSpec::new("token", "Reset token", FieldKind::Hidden).required(),
        FieldSpec::new("password", "New password", FieldKind::Password).required().min(8).max(128),
    ],
};

pub const VERIFY_EMAIL: FormSchema = FormSchema {
    id: "verify-email",
    title: "Verify your email",
    action: "/api/auth/verify-email",
    method: "POST",
    submit_label: "Verify email",
    redirect: Some("/dashboard"),
    fields: &[FieldSpec::new("token", "Verification token", FieldKind::Hidden).required()],
};

pub const CHANGE_PASSWORD: FormSchema = FormSchema {
    id: "change-password",
    title: "Change password",
    action: "/api/auth/password",
    method: "PUT",
    submit_label: "Change password",
    redirect: None,
    fields: &[
        FieldSpec::new("current_password", "Current password", FieldKind::Password).required().max(128),
        FieldSpec::new("new_password", "New password", FieldKind::Password).required().min(8).max(128),
    ],
};

pub const BLOG_POST: FormSchema = FormSchema {
    id: "blog-post",
    title: "New blog post",
    action: "/api/posts",
    method: "POST",
    submit_label: "Save post",
    redirect: None,
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text).required().max(200),
        FieldSpec::new("slug", "Slug", FieldKind::Text).max(200).placeholder("derived from the title"),
        FieldSpec::new("excerpt", "Excerpt", FieldKind::TextArea).required().max(500),
        FieldSpec::new("content", "Content", FieldKind::TextArea).required(),
        FieldSpec::new("cover_image", "Cover image URL", FieldKind::Text).max(500),
        FieldSpec::new("category", "Category", FieldKind::Text).required().max(50).placeholder("football"),
        FieldSpec::new("published", "Published", FieldKind::Checkbox),
    ],
};

pub const PREDICTION: FormSchema = FormSchema {
    id: "prediction",
    title: "New prediction",
    action: "/api/predictions",
    method: "POST",
    submit_label: "Publish prediction",
    redirect: None,
    fields: &[
        FieldSpec::new("sport", "Sport", FieldKind::Select(SPORTS)).required(),
        FieldSpec::new("league", "League", FieldKind::Text).required().max(100),
        FieldSpec::new("home_team", "Home team", FieldKind::Text).required().max(100),
        FieldSpec::new("away_team", "Away team", FieldKind::Text).required().max(100),
        FieldSpec::new("kickoff_at", "Kick-off", FieldKind::DateTime).required(),
        FieldSpec::new("tip", "Tip", FieldKind::Text).required().max(200).placeholder("Home win"),
        FieldSpec::new("odds", "Odds", FieldKind::Number).required(),
        FieldSpec::new("confidence", "Confidence (1-5)", FieldKind::Number).required(),
        FieldSpec::new("analysis", "Analysis", FieldKind::TextArea).max(5000),
        FieldSpec::new("is_premium", "Premium", FieldKind::Checkbox),
    ],
};

pub const PAYMENT_STATUSES: &[&str] = &["pending", "succeeded", "failed", "refunded"];

pub const PAYMENT: FormSchema = FormSchema {
    id: "payment",
    title: "Record a payment",
    action: "/api/payments",
    method: "POST",
    submit_label: "Record payment",
    redirect: None,
    fields: &[
        FieldSpec::new("user_id", "User ID", FieldKind::Text).required().min(36).max(36),
        FieldSpec::new("amount_cents", "Amount (cents)", FieldKind::Number).required(),
        FieldSpec::new("currency", "Currency", FieldKind::Text).required().min(3).max(3).placeholder("USD"),
        FieldSpec::new("plan", "Plan", FieldKind::Text).required().max(50).placeholder("premium-monthly"),
        FieldSpec::new("reference", "Reference", FieldKind::Text).required().max(100),
        FieldSpec::new("status", "Status", FieldKind::Select(PAYMENT_STATUSES)),
    ],
};

pub const COMMENT: FormSchema = FormSchema {
    id: "comment",
    title: "Leave a comment",
    action: "/api/posts/{id}/comments",
    method: "POST",
    submit_label: "Post comment",
    redirect: None,
    fields: &[FieldSpec::new("content", "Comment", FieldKind::TextArea).required().max(2000)],
};
