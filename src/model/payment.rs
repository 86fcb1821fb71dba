use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProcessPaymentDto {
    pub order_id: String,
    /// crypto, cash or transfer
    pub method: String,
    pub amount: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CryptoPaymentDto {
    pub payment_id: String,
    pub transaction_id: String,
    pub method: String,
    pub wallet_address: String,
    pub crypto_amount: f64,
    pub fiat_amount: f64,
    pub currency: String,
    pub qr_code: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CashPaymentDto {
    pub payment_id: String,
    pub transaction_id: String,
    pub method: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub instructions: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TransferPaymentDto {
    pub payment_id: String,
    pub transaction_id: String,
    pub method: String,
    pub virtual_account: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub bank_name: String,
    pub account_name: String,
    pub expires_at: DateTime<Utc>,
}

/// Method-specific payment instructions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(untagged)]
pub enum PaymentInstructionsDto {
    Crypto(CryptoPaymentDto),
    Cash(CashPaymentDto),
    Transfer(TransferPaymentDto),
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaymentStatusDto {
    pub order_id: String,
    pub payment_id: String,
    pub payment_status: String,
    pub payment_method: String,
    pub amount: f64,
    pub transaction_id: String,
    pub confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaymentDto {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub transaction_id: String,
    pub crypto_address: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
