//! # qrune
//!
//! A Rust library for generating QR codes with Reed-Solomon error correction.
//! Produces standard monochromatic symbols, versions 1 through 40, in
//! numeric, alphanumeric and byte modes.
//!
//! ## Quick start
//!
//! ```rust
//! use qrune::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - the smallest fitting version and the best mask are
//! // chosen automatically
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Full configuration
//!
//! ```rust
//! use qrune::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(2))     // QR version (size) - smallest fitting version if not provided
//!     .ec_level(ECLevel::Q)         // Error correction level - defaults to ECLevel::M
//!     .mask(MaskPattern::new(3))    // Mask pattern - best mask by penalty score if not provided
//!     .build()?;
//!
//! println!("{}", qr.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error correction levels
//!
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! Capacity depends on the encoding mode, version and EC level; callers that
//! must fit arbitrary input can query [`max_characters`] and truncate first.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::codec::{max_characters, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
