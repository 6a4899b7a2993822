//! Tests for the verification token service
