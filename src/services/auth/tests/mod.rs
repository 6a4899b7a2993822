//! Tests for the authentication service and login guard


mod login_guard_tests;
