//! Intentionally empty — the suite lives under `tests/`.
