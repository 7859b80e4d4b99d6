pub mod fs_store;
pub mod memory_store;

pub use fs_store::FsBlobStore;
pub use memory_store::MemoryBlobStore;
