use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    response::IntoResponse,
    Json,
};
use rebate_distributor::{DistributorSnapshot, EpochSnapshot, EpochTransition, Roles};
use rebate_report::{EpochReport, Reporter};
use rebate_types::{
    AccountId, AllocationBatch, Amount, AuditEvent, Checksum, ClaimStatus, EpochId, EpochStatus,
    Result as RebateResult, Role,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the calling identity
pub const CALLER_HEADER: &str = "x-caller";

/// Authenticated caller, taken from the `x-caller` header
pub struct Caller(pub AccountId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::MissingCaller)?;
        Ok(Caller(AccountId::new(caller)))
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ---- epochs ----

#[derive(Serialize)]
pub struct CurrentEpochResponse {
    pub epoch_id: EpochId,
    pub status: Option<EpochStatus>,
}

pub async fn current_epoch(State(state): State<AppState>) -> Result<Json<CurrentEpochResponse>, ApiError> {
    let distributor = state.distributor()?;
    let epoch_id = distributor.current_epoch_id();
    Ok(Json(CurrentEpochResponse {
        epoch_id,
        status: distributor.ledger().status(epoch_id),
    }))
}

pub async fn get_epoch(
    State(state): State<AppState>,
    Path(epoch_id): Path<EpochId>,
) -> Result<Json<EpochSnapshot>, ApiError> {
    let snapshot = state
        .distributor()?
        .epoch_snapshot(epoch_id)
        .ok_or(ApiError::EpochNotFound(epoch_id))?;
    Ok(Json(snapshot))
}

pub async fn epoch_report(
    State(state): State<AppState>,
    Path(epoch_id): Path<EpochId>,
) -> Result<Json<EpochReport>, ApiError> {
    let snapshot = state
        .distributor()?
        .epoch_snapshot(epoch_id)
        .ok_or(ApiError::EpochNotFound(epoch_id))?;
    let report = state.reporter.publish(&snapshot).map_err(ApiError::Internal)?;
    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct AllocationRequest {
    pub recipients: Vec<AccountId>,
    /// Decimal strings, e.g. "1.123"
    pub amounts: Vec<String>,
    pub checksum: Checksum,
}

#[derive(Serialize)]
pub struct AllocationResponse {
    pub epoch_id: EpochId,
    pub transition: EpochTransition,
    pub current_epoch_id: EpochId,
}

pub async fn record_allocation(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(epoch_id): Path<EpochId>,
    Json(req): Json<AllocationRequest>,
) -> Result<Json<AllocationResponse>, ApiError> {
    let mut distributor = state.distributor()?;
    distributor.ensure_role(&caller, Role::Operator)?;

    let amounts = req
        .amounts
        .iter()
        .map(|amount| Amount::from_decimal_str(amount))
        .collect::<RebateResult<Vec<_>>>()?;
    let batch = AllocationBatch::new(req.recipients, amounts);
    debug!(%caller, epoch_id, entries = batch.len(), "allocation submitted");

    let transition = distributor.record_allocation(&caller, epoch_id, batch, req.checksum)?;
    Ok(Json(AllocationResponse {
        epoch_id,
        transition,
        current_epoch_id: distributor.current_epoch_id(),
    }))
}

#[derive(Serialize)]
pub struct FundResponse {
    pub epoch_id: EpochId,
    pub amount: String,
}

pub async fn fund_epoch(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(epoch_id): Path<EpochId>,
) -> Result<Json<FundResponse>, ApiError> {
    let amount = state.distributor()?.fund_epoch(&caller, epoch_id)?;
    Ok(Json(FundResponse {
        epoch_id,
        amount: amount.to_string(),
    }))
}

// ---- claims ----

#[derive(Serialize)]
pub struct ClaimResponse {
    pub recipient: AccountId,
    pub amount: String,
}

pub async fn claim(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<ClaimResponse>, ApiError> {
    let amount = state.distributor()?.claim(&caller)?;
    Ok(Json(ClaimResponse {
        recipient: caller,
        amount: amount.to_string(),
    }))
}

#[derive(Serialize)]
pub struct FeesResponse {
    pub recipient: AccountId,
    pub ongoing: String,
    pub claimable: String,
    pub claimed: String,
}

pub async fn recipient_fees(
    State(state): State<AppState>,
    Path(account): Path<AccountId>,
) -> Result<Json<FeesResponse>, ApiError> {
    let summary = state.distributor()?.fee_summary(&account)?;
    Ok(Json(FeesResponse {
        recipient: account,
        ongoing: summary.ongoing.to_string(),
        claimable: summary.claimable.to_string(),
        claimed: summary.claimed.to_string(),
    }))
}

#[derive(Serialize)]
pub struct ClaimStatusResponse {
    pub recipient: AccountId,
    pub epoch_id: EpochId,
    pub status: ClaimStatus,
    pub code: u8,
}

pub async fn claim_status(
    State(state): State<AppState>,
    Path((account, epoch_id)): Path<(AccountId, EpochId)>,
) -> Result<Json<ClaimStatusResponse>, ApiError> {
    let status = state.distributor()?.claim_status(&account, epoch_id);
    Ok(Json(ClaimStatusResponse {
        recipient: account,
        epoch_id,
        status,
        code: status.code(),
    }))
}

// ---- roles ----

#[derive(Serialize)]
pub struct RolesResponse {
    pub owner: AccountId,
    pub operator: AccountId,
    pub payer: AccountId,
}

#[derive(Deserialize)]
pub struct AssignRoleRequest {
    pub identity: AccountId,
}

impl From<&Roles> for RolesResponse {
    fn from(roles: &Roles) -> Self {
        RolesResponse {
            owner: roles.owner.clone(),
            operator: roles.operator.clone(),
            payer: roles.payer.clone(),
        }
    }
}

pub async fn get_roles(State(state): State<AppState>) -> Result<Json<RolesResponse>, ApiError> {
    let distributor = state.distributor()?;
    Ok(Json(distributor.roles().into()))
}

pub async fn assign_operator(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<AssignRoleRequest>,
) -> Result<Json<RolesResponse>, ApiError> {
    let mut distributor = state.distributor()?;
    distributor.assign_operator(&caller, req.identity)?;
    Ok(Json(distributor.roles().into()))
}

pub async fn assign_payer(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<AssignRoleRequest>,
) -> Result<Json<RolesResponse>, ApiError> {
    let mut distributor = state.distributor()?;
    distributor.assign_payer(&caller, req.identity)?;
    Ok(Json(distributor.roles().into()))
}

// ---- asset ----

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub amount: String,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub account: AccountId,
    pub balance: String,
    pub allowance: String,
}

/// Caller lets the distributor pull up to `amount` from its balance
pub async fn approve(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let amount = Amount::from_decimal_str(&req.amount)?;
    let mut distributor = state.distributor()?;
    let token = distributor.port_mut();
    token.approve(&caller, amount);
    Ok(Json(BalanceResponse {
        balance: token.balance(&caller).to_string(),
        allowance: token.allowance(&caller).to_string(),
        account: caller,
    }))
}

pub async fn token_balance(
    State(state): State<AppState>,
    Path(account): Path<AccountId>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let distributor = state.distributor()?;
    let token = distributor.port();
    Ok(Json(BalanceResponse {
        balance: token.balance(&account).to_string(),
        allowance: token.allowance(&account).to_string(),
        account,
    }))
}

// ---- audit ----

pub async fn list_events(State(state): State<AppState>) -> Json<Vec<AuditEvent>> {
    Json(state.events.events())
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<DistributorSnapshot>, ApiError> {
    let snapshot = state.distributor()?.snapshot();
    Ok(Json(snapshot))
}
