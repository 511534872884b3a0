/// Primitive ICAv2 data types and NewType-patterns.
mod enums;
mod icav2_uri;
mod ids;
mod s3_uri;

pub use enums::*;
pub use icav2_uri::*;
pub use ids::*;
pub use s3_uri::*;
