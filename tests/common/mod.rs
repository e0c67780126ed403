//! Common test utilities for climate-api.
//!
//! This module provides shared utilities for testing the climate-api server.

#![allow(dead_code)]

pub mod assertions;
pub mod test_data;
