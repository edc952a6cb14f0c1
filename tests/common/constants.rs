//! Shared constants for end-to-end tests
//!
//! When test data changes (API key, install ids, etc.), update only this file.

// ============================================================================
// Credentials
// ============================================================================

/// API key every spawned test server is configured with
pub const TEST_API_KEY: &str = "e2e-admin-key";

/// Origin allowed by the spawned test server
pub const TEST_CORS_ORIGIN: &str = "http://localhost:5173";

// ============================================================================
// Analytics Installs
// ============================================================================

pub const INSTALL_1_ID: &str = "2f1c3a9e-4a7b-4c6d-9e1f-0a2b3c4d5e6f";

pub const INSTALL_2_ID: &str = "8d0e6b52-31c4-4f0a-b7a9-5c6d7e8f9a0b";

pub const INSTALL_3_ID: &str = "c4b3a291-0f1e-4d2c-8b7a-695847362514";

/// Client version reported in heartbeats
pub const TEST_VERSION: &str = "1.4.2";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
