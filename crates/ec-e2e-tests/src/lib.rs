//! End-to-end tests across `ec-protocol`, `ec-accounting`, `ec-intake` and
//! `ec-api`. All tests live under `tests/`; this library is empty.
