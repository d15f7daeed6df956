pub mod event;
pub mod hooks;
