pub mod notification_service;
pub mod stripe_event_service;
