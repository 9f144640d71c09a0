pub mod app;
pub mod golden_apple_notification;
pub mod loading_overlay;
pub mod snake_view;
pub mod transaction_card;
pub mod view_controls;
