//! Filter DNS Infrastructure Layer
pub mod dns;
