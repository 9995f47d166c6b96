//! Shared test fixtures for exercising the tracker against a scripted host.
