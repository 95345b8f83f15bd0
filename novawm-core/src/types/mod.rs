//! Core data types used throughout NovaWM.
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`].
//! - **Color**: [`Color`] and [`ColorParseError`].
//! - **Orientation**: [`Orientation`].
//! - **Style descriptors**: [`FillStyle`], [`FontStyle`], [`MarginStyle`],
//!   [`MenuItemStyle`], [`MenuStyle`]. The toolkit treats these as opaque
//!   configuration and hands them to a renderer.

pub mod color;
pub mod geometry;
pub mod orientation;
pub mod style;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
pub use orientation::Orientation;
pub use style::{FillStyle, FontStyle, FontWeight, MarginStyle, MenuItemStyle, MenuStyle};
