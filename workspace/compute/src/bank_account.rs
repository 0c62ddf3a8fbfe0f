//! Primary bank account of a profile, the payout destination.

use chrono::{DateTime, Utc};
use common::{BankAccountDto, SaveBankAccountRequest};
use model::entities::bank_account::{self, BankAccountType};
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{ensure_id, PortalError, Result, StoreResultExt};
use crate::store::{BankAccountInput, PortalStore};

/// Checks a save request against its validation rules and normalizes it.
/// Runs before any store call.
pub fn validate_bank_account(request: SaveBankAccountRequest) -> Result<BankAccountInput> {
    request
        .validate()
        .map_err(|errors| PortalError::validation(errors.to_string()))?;

    let account_type = request
        .account_type
        .trim()
        .parse::<BankAccountType>()
        .map_err(PortalError::validation)?;

    let branch_code = request
        .branch_code
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty());

    Ok(BankAccountInput {
        bank_name: request.bank_name.trim().to_string(),
        account_holder: request.account_holder.trim().to_string(),
        account_number: request.account_number,
        branch_code,
        account_type,
    })
}

#[instrument(skip(store))]
pub async fn fetch_bank_account(
    store: &dyn PortalStore,
    profile_id: i32,
) -> Result<Option<BankAccountDto>> {
    ensure_id("profile", profile_id)?;
    let account = store
        .primary_bank_account(profile_id)
        .await
        .or_unavailable(|| format!("bank account of profile {}", profile_id))?;
    Ok(account.map(bank_account_dto))
}

/// Upserts the primary account: updates the existing primary row or inserts one.
#[instrument(skip(store, request))]
pub async fn save_bank_account(
    store: &dyn PortalStore,
    profile_id: i32,
    request: SaveBankAccountRequest,
    now: DateTime<Utc>,
) -> Result<BankAccountDto> {
    ensure_id("profile", profile_id)?;
    let input = validate_bank_account(request)?;

    let saved = store
        .upsert_primary_bank_account(profile_id, input, now)
        .await
        .or_unavailable(|| format!("bank account of profile {}", profile_id))?;

    info!(account_id = saved.id, "Bank account saved");
    Ok(bank_account_dto(saved))
}

fn bank_account_dto(account: bank_account::Model) -> BankAccountDto {
    BankAccountDto {
        id: account.id,
        bank_name: account.bank_name,
        account_holder: account.account_holder,
        account_number: account.account_number,
        branch_code: account.branch_code,
        account_type: account.account_type.as_str().to_string(),
        is_primary: account.is_primary,
        created_at: account.created_at,
        updated_at: account.updated_at,
    }
}
