pub mod ar1_stream;

pub use ar1_stream::Ar1Stream;
