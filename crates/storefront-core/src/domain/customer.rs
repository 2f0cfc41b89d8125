// ============================================================================
// Storefront Core - Customer Entities
// File: crates/storefront-core/src/domain/customer.rs
// Description: Customer account data relayed from the Storefront API
// ============================================================================

use serde::{Deserialize, Serialize};

/// Access token object stored in the session under `customerAccessToken`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAccessToken {
    pub access_token: String,
    pub expires_at: String,
}

impl CustomerAccessToken {
    pub fn is_present(&self) -> bool {
        !self.access_token.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub accepts_marketing: Option<bool>,
}

/// Domain-level error returned inside a successful GraphQL response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUserError {
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Fields accepted by `customerUpdate`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepts_marketing: Option<bool>,
}

/// Why an access token is requested; each flow is its own named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Login,
    /// Sign-in right after `customerCreate`
    RegisterLogin,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenCreatePayload {
    pub customer_access_token: Option<CustomerAccessToken>,
    #[serde(default)]
    pub customer_user_errors: Vec<CustomerUserError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreatePayload {
    pub customer: Option<Customer>,
    #[serde(default)]
    pub customer_user_errors: Vec<CustomerUserError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecoverPayload {
    #[serde(default)]
    pub customer_user_errors: Vec<CustomerUserError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdatePayload {
    pub customer: Option<Customer>,
    pub customer_access_token: Option<CustomerAccessToken>,
    #[serde(default)]
    pub customer_user_errors: Vec<CustomerUserError>,
}

/// Shop-level settings needed to classify menu links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub name: String,
    pub primary_domain_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_wire_shape() {
        let token: CustomerAccessToken =
            serde_json::from_str(r#"{"accessToken":"tok","expiresAt":"2030-01-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(token.access_token, "tok");
        assert!(token.is_present());
    }

    #[test]
    fn test_customer_update_skips_absent_fields() {
        let update = CustomerUpdate {
            first_name: Some("Jane".into()),
            accepts_marketing: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"firstName": "Jane", "acceptsMarketing": false}));
    }
}
