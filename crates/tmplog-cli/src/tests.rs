//! Tests for the tmplog CLI runtime.

mod support;
