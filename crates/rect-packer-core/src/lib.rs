//! Core library for packing rectangles into a fixed-size canvas.
//!
//! - Strategies: Guillotine (fit choice + split rule) and Shelf (first/next fit)
//! - `Bin` owns the container state: construct once, then stream `insert` calls
//! - Placements come back by value; a failed insert is `PackError::OutOfSpace`
//!   and leaves the bin untouched
//! - Data model is serde-serializable; file formats and compositing live in
//!   the CLI crate.
//!
//! Quick example:
//! ```
//! use rect_packer_core::Bin;
//!
//! # fn main() -> rect_packer_core::Result<()> {
//! let mut bin = Bin::with_dimensions(1024, 1024)?;
//! let a = bin.insert(80, 60)?;
//! assert_eq!((a.x, a.y, a.w, a.h), (0, 0, 80, 60));
//! let b = bin.insert(80, 60)?;
//! assert!(!a.intersects(&b));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod packer;
pub mod session;

pub use config::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use session::*;

/// Convenience prelude for common types.
/// Importing `rect_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{
        FitChoice, PackerConfig, PackerConfigBuilder, ShelfPolicy, SplitRule, Strategy,
    };
    pub use crate::error::{PackError, Result};
    pub use crate::model::{BinStats, Rect};
    pub use crate::packer::Packer;
    pub use crate::session::Bin;
}
