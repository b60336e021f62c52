//! Inbound adapters that translate user interaction into dashboard use-case
//! calls while keeping presentation details at the edge.
//!
//! The view router and its text renderer live under [`ui`].

pub mod ui;
