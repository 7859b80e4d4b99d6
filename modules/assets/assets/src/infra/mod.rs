pub mod blob;
pub mod imaging;
pub mod storage;
