//! Parametric **coin chute** meshes for 3D printing: hollow funnels lofted from
//! a rectangular intake to a round or slotted outlet, optional sloped floors
//! and two-piece lap joints, written as binary STL.
//!
//! Every part is built from closed cross-sections stacked by a single lofting
//! routine ([`shapes::Shell`]) or swept along the depth axis
//! ([`shapes::Sweep`]), so each emitted mesh is closed and wound outward.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//! - **image-io**: PNG diagrams drawn with `plotters`, encoded by `image`
//! - **svg-io**: annotated SVG diagrams through `svg`
//! - **hashmap**: enables use of hashbrown for the edge maps of `analyze_manifold`
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod chute;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod shapes;
pub mod sketch;
pub mod triangulated;

#[cfg(any(feature = "image-io", feature = "svg-io"))]
pub mod diagram;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use chute::{Chute, ChuteParams, Design};
pub use errors::ValidationError;
pub use mesh::Part;
