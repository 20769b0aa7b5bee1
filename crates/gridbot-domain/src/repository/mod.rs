//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants sessions stored,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait SessionRepo     │  InMemorySessionRepo
//!   fn save()           │
//!   fn find_by_id()     │
//! ```

pub mod session_repository;
