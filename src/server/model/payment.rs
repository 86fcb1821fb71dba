//! Payment domain models and the method-specific instructions returned to payers.

use chrono::{DateTime, Utc};

use crate::model::payment::{
    CashPaymentDto, CryptoPaymentDto, PaymentDto, PaymentInstructionsDto, PaymentStatusDto,
    TransferPaymentDto,
};

pub const CURRENCY: &str = "IDR";
pub const BANK_NAME: &str = "Bank SiipCoffee";
pub const ACCOUNT_NAME: &str = "SiipCoffee Cafe";
pub const CASH_INSTRUCTIONS: &str = "Silakan bayar di kasir saat menerima pesanan";

/// Fiat amount per whole coin used by the mock crypto quote.
pub const CRYPTO_RATE: f64 = 100_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
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

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            amount: entity.amount,
            method: entity.method,
            status: entity.status,
            transaction_id: entity.transaction_id,
            crypto_address: entity.crypto_address,
            confirmed_at: entity.confirmed_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            order_id: self.order_id,
            amount: self.amount,
            method: self.method,
            status: self.status,
            transaction_id: self.transaction_id,
            crypto_address: self.crypto_address,
            confirmed_at: self.confirmed_at,
            created_at: self.created_at,
        }
    }
}

/// Payment state of an order as reported to its customer.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStatus {
    pub order_id: String,
    pub payment_status: String,
    pub payment_method: String,
    pub payment: Payment,
}

impl PaymentStatus {
    pub fn into_dto(self) -> PaymentStatusDto {
        PaymentStatusDto {
            order_id: self.order_id,
            payment_id: self.payment.id,
            payment_status: self.payment_status,
            payment_method: self.payment_method,
            amount: self.payment.amount,
            transaction_id: self.payment.transaction_id,
            confirmed_at: self.payment.confirmed_at,
        }
    }
}

/// What the payer must do next, per payment method.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentInstructions {
    Crypto {
        payment: Payment,
        wallet_address: String,
        expires_at: DateTime<Utc>,
    },
    Cash {
        payment: Payment,
    },
    Transfer {
        payment: Payment,
        virtual_account: String,
        expires_at: DateTime<Utc>,
    },
}

impl PaymentInstructions {
    pub fn into_dto(self) -> PaymentInstructionsDto {
        match self {
            Self::Crypto {
                payment,
                wallet_address,
                expires_at,
            } => {
                let crypto_amount = payment.amount / CRYPTO_RATE;
                PaymentInstructionsDto::Crypto(CryptoPaymentDto {
                    qr_code: format!("bitcoin:{}?amount={:.8}", wallet_address, crypto_amount),
                    payment_id: payment.id,
                    transaction_id: payment.transaction_id,
                    method: payment.method,
                    wallet_address,
                    crypto_amount,
                    fiat_amount: payment.amount,
                    currency: CURRENCY.to_string(),
                    status: "awaiting_payment".to_string(),
                    expires_at,
                })
            }
            Self::Cash { payment } => PaymentInstructionsDto::Cash(CashPaymentDto {
                payment_id: payment.id,
                transaction_id: payment.transaction_id,
                method: payment.method,
                amount: payment.amount,
                currency: CURRENCY.to_string(),
                status: "pending_confirmation".to_string(),
                instructions: CASH_INSTRUCTIONS.to_string(),
            }),
            Self::Transfer {
                payment,
                virtual_account,
                expires_at,
            } => PaymentInstructionsDto::Transfer(TransferPaymentDto {
                payment_id: payment.id,
                transaction_id: payment.transaction_id,
                method: "bank_transfer".to_string(),
                virtual_account,
                amount: payment.amount,
                currency: CURRENCY.to_string(),
                status: "pending_transfer".to_string(),
                bank_name: BANK_NAME.to_string(),
                account_name: ACCOUNT_NAME.to_string(),
                expires_at,
            }),
        }
    }
}
