pub mod storage;
pub mod stripe;
