//! Conversational intake for event carbon estimation.
//!
//! - `inference`: the `ExtractionEngine` capability and its providers.
//! - `units` / `translator`: free text → normalized quantities → line items.
//! - `slots` / `persona` / `dialogue` / `session`: the slot-filling dialogue.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod inference;
pub mod persona;
pub mod session;
pub mod slots;
pub mod translator;
pub mod units;

pub use config::IntakeConfig;
pub use dialogue::{DialogueConfig, DialogueEngine, DialogueQuestion, TurnOutcome, next_question};
pub use error::{IntakeError, IntakeResult};
pub use inference::{ExtractionEngine, ExtractionResult};
pub use persona::VocabularyTier;
pub use session::Session;
pub use slots::{ExtractedSlotSet, Provenance, Slot, Topic};
pub use translator::{Translation, Translator, TranslatorConfig};
