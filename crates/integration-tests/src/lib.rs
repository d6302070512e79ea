//! Integration tests for Vitrina.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart engine behaviour through the event router
//! - `catalog_client` - HTTP catalog client against a local fixture server
//! - `storefront_flow` - Full widget lifecycle with file-backed persistence
//!
//! Every test is self-contained: fixture servers bind an ephemeral port and
//! storage lives in a temporary directory.
