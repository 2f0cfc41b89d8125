// ============================================================================
// Storefront Core - Account Service
// File: crates/storefront-core/src/services/account_service.rs
// ============================================================================
//! Customer account flows relayed to the Storefront API: login, register,
//! password recovery and profile update.

use std::sync::Arc;

use serde::Deserialize;
use storefront_shared::utils::{mask_email, non_empty};
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::domain::{Customer, CustomerAccessToken, CustomerUpdate, TokenPurpose};
use crate::error::DomainError;
use crate::ports::StorefrontClient;

const MISSING_CREDENTIALS: &str = "Please provide both an email and a password.";

/// Login form payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Register form payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Passwords must be at least 8 characters."))]
    pub password: String,
    #[serde(default, rename = "passwordConfirm")]
    pub password_confirm: String,
}

/// Password recovery form payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecoverForm {
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,
}

/// Profile form payload. Empty inputs mean "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Checkbox value, `"on"` when ticked and absent otherwise
    #[serde(default)]
    pub accepts_marketing: Option<String>,
    #[serde(default)]
    #[validate(length(min = 8, message = "Passwords must be at least 8 characters."))]
    pub new_password: Option<String>,
    #[serde(default)]
    pub new_password_confirm: Option<String>,
}

impl ProfileForm {
    fn normalized(&self) -> Self {
        let keep = |v: &Option<String>| non_empty(v.as_deref()).map(str::to_string);
        Self {
            first_name: keep(&self.first_name),
            last_name: keep(&self.last_name),
            email: keep(&self.email),
            phone: keep(&self.phone),
            accepts_marketing: self.accepts_marketing.clone(),
            // passwords are taken verbatim
            new_password: self.new_password.clone().filter(|p| !p.is_empty()),
            new_password_confirm: self.new_password_confirm.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub customer: Customer,
    pub access_token: CustomerAccessToken,
}

/// Result of a successful profile update
#[derive(Debug, Clone)]
pub struct ProfileUpdateResult {
    pub customer: Option<Customer>,
    /// Present when the backend rotated the token, e.g. after a password change.
    pub access_token: Option<CustomerAccessToken>,
}

/// Form fields in the order they appear on the page; the first invalid one
/// supplies the message.
const FIELD_ORDER: &[&str] = &["email", "password", "new_password"];

fn validation_message(errors: &ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| {
        let rank = FIELD_ORDER
            .iter()
            .position(|known| *known == *field)
            .unwrap_or(FIELD_ORDER.len());
        (rank, field.to_string())
    });

    let message = fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string());
    DomainError::Validation(message)
}

/// Account service for the customer flows
pub struct AccountService<C: StorefrontClient + ?Sized> {
    client: Arc<C>,
}

impl<C: StorefrontClient + ?Sized> AccountService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a customer access token
    pub async fn login(&self, form: &LoginForm) -> Result<CustomerAccessToken, DomainError> {
        if form.email.is_empty() || form.password.is_empty() {
            return Err(DomainError::validation(MISSING_CREDENTIALS));
        }
        info!("Login attempt for email: {}", mask_email(&form.email));

        let payload = self
            .client
            .customer_access_token_create(&form.email, &form.password, TokenPurpose::Login)
            .await?;

        match payload.customer_access_token.filter(CustomerAccessToken::is_present) {
            Some(token) => {
                info!("Login successful for: {}", mask_email(&form.email));
                Ok(token)
            }
            None => {
                warn!("Login failed for: {}", mask_email(&form.email));
                Err(DomainError::from_user_errors(&payload.customer_user_errors)
                    .unwrap_or_else(|| DomainError::validation("Invalid credentials")))
            }
        }
    }

    /// Create a customer, then sign them in
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisterResult, DomainError> {
        if form.password.is_empty() || form.password != form.password_confirm {
            return Err(DomainError::validation("Passwords do not match"));
        }
        if form.email.is_empty() {
            return Err(DomainError::validation(MISSING_CREDENTIALS));
        }
        form.validate().map_err(|e| validation_message(&e))?;
        info!("Registration attempt for email: {}", mask_email(&form.email));

        let created = self.client.customer_create(&form.email, &form.password).await?;
        if let Some(err) = DomainError::from_user_errors(&created.customer_user_errors) {
            warn!("Registration rejected for {}: {}", mask_email(&form.email), err);
            return Err(err);
        }

        let customer = created
            .customer
            .filter(|c| !c.id.is_empty())
            .ok_or_else(|| DomainError::validation("Could not create customer"))?;

        let login = self
            .client
            .customer_access_token_create(
                &form.email,
                &form.password,
                TokenPurpose::RegisterLogin,
            )
            .await?;
        let access_token = login
            .customer_access_token
            .filter(CustomerAccessToken::is_present)
            .ok_or_else(|| DomainError::validation("Missing access token"))?;

        info!("Registration successful for: {}", mask_email(&form.email));
        Ok(RegisterResult {
            customer,
            access_token,
        })
    }

    /// Ask the platform to email a password reset link
    pub async fn recover(&self, form: &RecoverForm) -> Result<(), DomainError> {
        if form.email.is_empty() {
            return Err(DomainError::validation("Please provide an email."));
        }
        form.validate().map_err(|e| validation_message(&e))?;

        let payload = self.client.customer_recover(&form.email).await?;
        if let Some(err) = DomainError::from_user_errors(&payload.customer_user_errors) {
            return Err(err);
        }

        info!("Password reset requested for: {}", mask_email(&form.email));
        Ok(())
    }

    /// Update profile fields and optionally the password
    pub async fn update_profile(
        &self,
        access_token: &CustomerAccessToken,
        form: &ProfileForm,
    ) -> Result<ProfileUpdateResult, DomainError> {
        let form = form.normalized();
        if form.new_password.is_some() && form.new_password != form.new_password_confirm {
            return Err(DomainError::validation("New passwords must match."));
        }
        form.validate().map_err(|e| validation_message(&e))?;

        let update = CustomerUpdate {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            password: form.new_password,
            accepts_marketing: Some(form.accepts_marketing.as_deref() == Some("on")),
        };

        let payload = self
            .client
            .customer_update(&access_token.access_token, &update)
            .await?;
        if let Some(err) = DomainError::from_user_errors(&payload.customer_user_errors) {
            return Err(err);
        }

        Ok(ProfileUpdateResult {
            customer: payload.customer,
            access_token: payload
                .customer_access_token
                .filter(CustomerAccessToken::is_present),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AccessTokenCreatePayload, CustomerCreatePayload, CustomerRecoverPayload,
        CustomerUpdatePayload, CustomerUserError,
    };
    use crate::ports::storefront_client::MockStorefrontClient;

    fn token(value: &str) -> CustomerAccessToken {
        CustomerAccessToken {
            access_token: value.to_string(),
            expires_at: "2030-01-01T00:00:00Z".to_string(),
        }
    }

    fn user_error(message: &str) -> CustomerUserError {
        CustomerUserError {
            code: Some("INVALID".into()),
            field: Some(vec!["input".into()]),
            message: message.to_string(),
        }
    }

    fn service(client: MockStorefrontClient) -> AccountService<MockStorefrontClient> {
        AccountService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let svc = service(MockStorefrontClient::new());
        let err = svc
            .login(&LoginForm {
                email: "jane@example.com".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation(MISSING_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut client = MockStorefrontClient::new();
        client
            .expect_customer_access_token_create()
            .withf(|email, password, purpose| {
                email == "jane@example.com"
                    && password == "secret123"
                    && *purpose == TokenPurpose::Login
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(AccessTokenCreatePayload {
                    customer_access_token: Some(token("tok")),
                    customer_user_errors: vec![],
                })
            });

        let got = service(client)
            .login(&LoginForm {
                email: "jane@example.com".into(),
                password: "secret123".into(),
            })
            .await
            .unwrap();
        assert_eq!(got, token("tok"));
    }

    #[tokio::test]
    async fn test_login_surfaces_first_user_error() {
        let mut client = MockStorefrontClient::new();
        client.expect_customer_access_token_create().returning(|_, _, _| {
            Ok(AccessTokenCreatePayload {
                customer_access_token: None,
                customer_user_errors: vec![user_error("Unidentified customer"), user_error("x")],
            })
        });

        let err = service(client)
            .login(&LoginForm {
                email: "jane@example.com".into(),
                password: "wrong-pass".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unidentified customer");
        assert!(err.is_user_facing());
    }

    #[tokio::test]
    async fn test_login_propagates_transport_errors() {
        let mut client = MockStorefrontClient::new();
        client
            .expect_customer_access_token_create()
            .returning(|_, _, _| Err(DomainError::Transport("connection refused".into())));

        let err = service(client)
            .login(&LoginForm {
                email: "jane@example.com".into(),
                password: "secret123".into(),
            })
            .await
            .unwrap_err();
        assert!(!err.is_user_facing());
    }

    #[tokio::test]
    async fn test_register_checks_passwords_first() {
        let svc = service(MockStorefrontClient::new());
        let err = svc
            .register(&RegisterForm {
                email: String::new(),
                password: "secret123".into(),
                password_confirm: "secret124".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = svc
            .register(&RegisterForm {
                email: String::new(),
                password: "secret123".into(),
                password_confirm: "secret123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let err = service(MockStorefrontClient::new())
            .register(&RegisterForm {
                email: "jane@example.com".into(),
                password: "short".into(),
                password_confirm: "short".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Passwords must be at least 8 characters.");
    }

    #[tokio::test]
    async fn test_register_reports_email_before_password() {
        for _ in 0..16 {
            let err = service(MockStorefrontClient::new())
                .register(&RegisterForm {
                    email: "not-an-email".into(),
                    password: "short".into(),
                    password_confirm: "short".into(),
                })
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Please provide a valid email address.");
        }
    }

    #[tokio::test]
    async fn test_register_creates_then_logs_in() {
        let mut client = MockStorefrontClient::new();
        client.expect_customer_create().times(1).returning(|_, _| {
            Ok(CustomerCreatePayload {
                customer: Some(Customer {
                    id: "gid://shopify/Customer/1".into(),
                    ..Default::default()
                }),
                customer_user_errors: vec![],
            })
        });
        client
            .expect_customer_access_token_create()
            .withf(|_, _, purpose| *purpose == TokenPurpose::RegisterLogin)
            .times(1)
            .returning(|_, _, _| {
                Ok(AccessTokenCreatePayload {
                    customer_access_token: Some(token("fresh")),
                    customer_user_errors: vec![],
                })
            });

        let result = service(client)
            .register(&RegisterForm {
                email: "jane@example.com".into(),
                password: "secret123".into(),
                password_confirm: "secret123".into(),
            })
            .await
            .unwrap();
        assert_eq!(result.customer.id, "gid://shopify/Customer/1");
        assert_eq!(result.access_token, token("fresh"));
    }

    #[tokio::test]
    async fn test_register_stops_on_user_error() {
        let mut client = MockStorefrontClient::new();
        client.expect_customer_create().returning(|_, _| {
            Ok(CustomerCreatePayload {
                customer: None,
                customer_user_errors: vec![user_error("Email has already been taken")],
            })
        });
        client.expect_customer_access_token_create().never();

        let err = service(client)
            .register(&RegisterForm {
                email: "jane@example.com".into(),
                password: "secret123".into(),
                password_confirm: "secret123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email has already been taken");
    }

    #[tokio::test]
    async fn test_register_without_token_fails() {
        let mut client = MockStorefrontClient::new();
        client.expect_customer_create().returning(|_, _| {
            Ok(CustomerCreatePayload {
                customer: Some(Customer {
                    id: "gid://shopify/Customer/1".into(),
                    ..Default::default()
                }),
                customer_user_errors: vec![],
            })
        });
        client
            .expect_customer_access_token_create()
            .returning(|_, _, _| Ok(AccessTokenCreatePayload::default()));

        let err = service(client)
            .register(&RegisterForm {
                email: "jane@example.com".into(),
                password: "secret123".into(),
                password_confirm: "secret123".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing access token");
    }

    #[tokio::test]
    async fn test_recover_requires_email() {
        let err = service(MockStorefrontClient::new())
            .recover(&RecoverForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please provide an email.");
    }

    #[tokio::test]
    async fn test_recover_calls_backend() {
        let mut client = MockStorefrontClient::new();
        client
            .expect_customer_recover()
            .withf(|email| email == "jane@example.com")
            .times(1)
            .returning(|_| Ok(CustomerRecoverPayload::default()));

        service(client)
            .recover(&RecoverForm {
                email: "jane@example.com".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_profile_password_mismatch() {
        let err = service(MockStorefrontClient::new())
            .update_profile(
                &token("tok"),
                &ProfileForm {
                    new_password: Some("newsecret1".into()),
                    new_password_confirm: Some("newsecret2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "New passwords must match.");
    }

    #[tokio::test]
    async fn test_profile_sends_only_filled_fields() {
        let mut client = MockStorefrontClient::new();
        client
            .expect_customer_update()
            .withf(|access_token, update| {
                access_token == "tok"
                    && update.first_name.as_deref() == Some("Jane")
                    && update.last_name.is_none()
                    && update.email.is_none()
                    && update.password.is_none()
                    && update.accepts_marketing == Some(true)
            })
            .times(1)
            .returning(|_, _| {
                Ok(CustomerUpdatePayload {
                    customer: Some(Customer {
                        id: "gid://shopify/Customer/1".into(),
                        first_name: Some("Jane".into()),
                        ..Default::default()
                    }),
                    customer_access_token: None,
                    customer_user_errors: vec![],
                })
            });

        let result = service(client)
            .update_profile(
                &token("tok"),
                &ProfileForm {
                    first_name: Some(" Jane ".into()),
                    last_name: Some(String::new()),
                    accepts_marketing: Some("on".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.customer.unwrap().first_name.as_deref(), Some("Jane"));
        assert!(result.access_token.is_none());
    }

    #[tokio::test]
    async fn test_profile_returns_rotated_token() {
        let mut client = MockStorefrontClient::new();
        client
            .expect_customer_update()
            .withf(|_, update| update.password.as_deref() == Some("newsecret1"))
            .returning(|_, _| {
                Ok(CustomerUpdatePayload {
                    customer: None,
                    customer_access_token: Some(token("rotated")),
                    customer_user_errors: vec![],
                })
            });

        let result = service(client)
            .update_profile(
                &token("tok"),
                &ProfileForm {
                    new_password: Some("newsecret1".into()),
                    new_password_confirm: Some("newsecret1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.access_token, Some(token("rotated")));
    }

    #[tokio::test]
    async fn test_profile_surfaces_user_error() {
        let mut client = MockStorefrontClient::new();
        client.expect_customer_update().returning(|_, _| {
            Ok(CustomerUpdatePayload {
                customer_user_errors: vec![user_error("Phone is invalid")],
                ..Default::default()
            })
        });

        let err = service(client)
            .update_profile(
                &token("tok"),
                &ProfileForm {
                    phone: Some("abc".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Phone is invalid");
    }
}
