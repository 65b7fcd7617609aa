//! Scenario tests driving the service the way a deployment would.

mod lifecycle;
