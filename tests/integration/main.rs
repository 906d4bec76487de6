//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one area of the service
//! against the mock ports in `mock_ports`.

mod auth_flow_tests;
mod discovery_flow_tests;
mod mock_ports;
mod persistence_tests;
