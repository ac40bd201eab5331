//! Form controls
//!
//! Select/option state and form body encoding, implemented as extra
//! `DomTree` methods.

mod form;
mod select;
