//! Tests for the interpreter
//!
//! Organized by component and instruction family

mod decoder_tests;
mod helpers;
mod heap_io_tests;
