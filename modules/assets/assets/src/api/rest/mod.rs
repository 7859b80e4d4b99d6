pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod dto_test;
#[cfg(test)]
mod handlers_test;
