pub mod blob;
pub mod error;
pub mod fields;
pub mod images;
pub mod proxy;
pub mod repo;
pub mod service;
pub mod signed_url;

#[cfg(test)]
mod proxy_test;
