pub mod config;
pub mod consumers;
pub mod core;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
