pub mod stubs;

pub use stubs::Ar1Stream;
