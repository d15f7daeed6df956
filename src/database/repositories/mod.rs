pub mod payout_profiles_repo;
pub mod qr_purchases_repo;
pub mod tips_repo;
