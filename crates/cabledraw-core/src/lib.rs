//! Cabledraw Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Cabledraw layout
//! engine and its callers. It includes:
//!
//! - **Geometry**: Points, sizes, boxes and 2-decimal rounding ([`geometry`] module)
//! - **Design**: The cable-assembly description being drawn ([`design`] module)
//! - **Viewport**: The drawable area of a sheet ([`viewport::Viewport`])

pub mod design;
pub mod geometry;
pub mod viewport;
