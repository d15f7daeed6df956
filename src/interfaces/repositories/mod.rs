pub mod payout_profiles;
pub mod qr_purchases;
pub mod tips;
