pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod ui;
pub mod util;
pub mod view;

pub use app::App;
pub use client::StudentListClient;
pub use config::ClientConfig;
