//! Main module for jinx library functionality

pub mod ast;
pub mod error;
pub mod formats;
pub mod parsing;
pub mod resolving;
pub mod testing;
