//! Integration tests for Kitty
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli_flow;
pub mod persistence_flow;
pub mod tui_render;
