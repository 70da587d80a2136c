pub mod app;
pub mod components;
pub mod context;
pub mod i18n;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, UiApp, build_app_context};
pub use i18n::Translations;
