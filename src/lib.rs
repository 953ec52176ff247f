//! PrintSettings Core - Settings Availability Engine
//!
//! # The Rules (Non-Negotiable)
//! 1. Availability Is Derived, Never Stored By Hand
//! 2. One Rule Per Setting, Evaluated In Catalog Order
//! 3. Malformed Capabilities Mean Absent Capabilities
//! 4. Unavailable Settings Carry No User Choice
//! 5. A Recompute Pass Is Atomic And Idempotent

pub mod capabilities;
pub mod config;
pub mod destination;
pub mod document;
pub mod settings;
pub mod rules;
pub mod engine;
pub mod model;
pub mod sticky;
pub mod ticket;
pub mod hashing;

pub use capabilities::{CapabilitySet, PrinterCapabilities, ColorType, DuplexType, OrientationType};
pub use config::{EngineConfig, Environment, PlatformFamily};
pub use destination::{Destination, DestinationType, SAVE_AS_PDF_ID, CLOUD_DOCS_ID};
pub use document::{DocumentProperties, DocumentKind, Margins};
pub use settings::{Setting, SettingName, SettingValue, SettingsState, MarginsType};
pub use rules::{Availability, AvailabilityRule, RuleContext, RuleTable};
pub use engine::{EngineError, Result, SettingsAvailabilityEngine};
pub use model::PrintPreviewModel;
pub use sticky::StickySettings;
pub use ticket::PrintTicket;
pub use hashing::{canonical_json, compute_ticket_fingerprint};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
