//! Core data model and form decoding for people admin records.
//!
//! Provides the person/contact record types, the nested field codec that
//! moves repeating contact groups between flat form submissions and
//! structured records, and form-urlencoded body parsing.

pub mod codec;
pub mod config;
pub mod contact;
pub mod form;
pub mod model;

pub use contact::ContactEntry;
