pub mod day_view;
pub mod event_card;
pub mod event_modal;
pub mod header;
pub mod month_view;
pub mod notice;
pub mod sign_in;
pub mod week_view;
