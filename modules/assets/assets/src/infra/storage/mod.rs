//! `SeaORM` persistence for assets.
//!
//! Image pairs are kept as a JSON text column; the legacy `image_url`
//! column is stored alongside for older clients.

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_repo;

pub use migrations::Migrator;
pub use sea_orm_repo::SeaOrmAssetsRepository;

#[cfg(test)]
mod mapper_test;
