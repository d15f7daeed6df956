pub mod payout_profile;
pub mod qr_purchase;
pub mod tip;
