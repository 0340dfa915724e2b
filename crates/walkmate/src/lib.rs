#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use walkmate_geometry as geometry;

#[doc(inline)]
pub use walkmate_distance as distance;

#[doc(inline)]
pub use walkmate_io as io;
