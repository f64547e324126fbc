pub mod app;
pub mod config;
pub mod logging;
pub mod session;
pub mod utils;
pub mod views;

pub use config::{Settings, SettingsError};
pub use session::{
    LostFoundOptions, LostFoundSession, LostFoundSnapshot, RegistrationOptions,
    RegistrationSession, RegistrationSnapshot,
};
