pub mod codec;
pub mod command;
pub mod error;
pub mod map;
pub mod merge;

// Re-exports for convenience in tests and integration users.
pub use codec::{parse_map, serialize_map};
pub use command::parse_ops;
pub use error::MapError;
pub use map::{Fields, Map, MapObject, Square};
pub use merge::{ElevationOp, SourceMap, merge};
