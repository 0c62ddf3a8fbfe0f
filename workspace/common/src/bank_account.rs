use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request body for saving the primary bank account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct SaveBankAccountRequest {
    #[validate(custom(function = "not_blank"))]
    pub bank_name: String,
    #[validate(custom(function = "not_blank"))]
    pub account_holder: String,
    /// 6 to 20 digits
    #[validate(length(min = 6, max = 20), custom(function = "digits_only"))]
    pub account_number: String,
    pub branch_code: Option<String>,
    /// One of `cheque`, `savings`, `transmission`.
    pub account_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BankAccountDto {
    pub id: i32,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub branch_code: Option<String>,
    pub account_type: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

fn digits_only(value: &str) -> Result<(), ValidationError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("digits").with_message("must contain digits only".into()));
    }
    Ok(())
}
