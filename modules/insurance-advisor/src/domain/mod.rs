pub mod canned;
pub mod currency;
pub mod error;
pub mod fields;
pub mod language;
pub mod locale;
pub mod models;
pub mod ports;
pub mod service;
