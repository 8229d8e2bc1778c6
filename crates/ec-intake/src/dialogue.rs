//! Slot-filling intake dialogue.
//!
//! Each turn: detect the vocabulary tier and any sustainable choices,
//! extract facts under a timeout, merge them into the session, attach any
//! translated items, then pick the first applicable topic still missing.
//! A degraded extraction merges nothing, so the same topic is asked again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ec_protocol::{EventFacts, EventProfile, ItemCategory, LineItemEmission};
use serde::Serialize;

use crate::error::IntakeResult;
use crate::inference::{ExtractionEngine, extract_with_timeout};
use crate::persona::{
    VocabularyTier, detect_sustainable_choices, detect_tier, encouragement, question_text,
};
use crate::session::{DEFAULT_MINIMUM_VIABLE, Session};
use crate::slots::{ConfidenceLevel, ExtractedSlotSet, Provenance, Topic};
use crate::translator::translate_record;

#[derive(Debug, Clone)]
pub struct DialogueConfig {
    /// Topics that, once answered, make a session ready to calculate.
    pub minimum_viable: Vec<Topic>,
    /// Deadline for one extraction call.
    pub extraction_timeout: Duration,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            minimum_viable: DEFAULT_MINIMUM_VIABLE.to_vec(),
            extraction_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogueQuestion {
    pub topic: Topic,
    pub text: String,
}

/// Everything the caller needs to render one turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// Next question. Still offered after the session is ready, as an
    /// optional refinement.
    pub question: Option<DialogueQuestion>,
    pub tier: VocabularyTier,
    pub encouragements: Vec<String>,
    pub ready_to_calculate: bool,
    pub completion_percentage: u8,
    pub confidence_level: ConfidenceLevel,
    /// True when extraction failed or timed out this turn.
    pub degraded: bool,
    /// Items attached to the session this turn.
    pub line_items: Vec<LineItemEmission>,
    /// Number of slots this turn changed.
    pub updated_slots: usize,
}

/// First applicable topic that has no answer yet, worded for the tier.
pub fn next_question(slots: &ExtractedSlotSet, tier: VocabularyTier) -> Option<DialogueQuestion> {
    let event_type = slots.event_type();
    slots
        .applicable_topics()
        .into_iter()
        .find(|t| !slots.is_populated(*t))
        .map(|topic| DialogueQuestion {
            topic,
            text: question_text(topic, tier, event_type),
        })
}

/// True when every applicable topic is answered, or the minimum-viable
/// subset is.
pub fn is_terminal(slots: &ExtractedSlotSet, config: &DialogueConfig) -> bool {
    let all = slots
        .applicable_topics()
        .into_iter()
        .all(|t| slots.is_populated(t));
    all || config.minimum_viable.iter().all(|t| slots.is_populated(*t))
}

/// Whether a translated item duplicates a fact from the same utterance.
/// Only the power source feeds the category formulas, so a stated source
/// already accounts for its energy. Trucks, crew, audience travel and meal
/// counts never reach the calculator; their items carry the emissions.
fn covered_by_facts(category: ItemCategory, facts: &EventFacts) -> bool {
    match category {
        ItemCategory::Energy => facts.power_source.is_some(),
        ItemCategory::Transportation
        | ItemCategory::Food
        | ItemCategory::Materials
        | ItemCategory::Waste => false,
    }
}

/// Drives intake conversations.
pub struct DialogueEngine {
    extractor: Arc<dyn ExtractionEngine>,
    config: DialogueConfig,
}

impl DialogueEngine {
    pub fn new(extractor: Arc<dyn ExtractionEngine>, config: DialogueConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Opening question for a fresh session. Marks its topic as pending.
    pub fn open(&self, session: &mut Session) -> Option<DialogueQuestion> {
        let question = next_question(&session.slots, session.tier);
        session.pending_topic = question.as_ref().map(|q| q.topic);
        question
    }

    /// Current question without advancing the session.
    pub fn current_question(&self, session: &Session) -> Option<DialogueQuestion> {
        next_question(&session.slots, session.tier)
    }

    pub fn is_ready(&self, session: &Session) -> bool {
        is_terminal(&session.slots, &self.config)
    }

    /// Handle one user utterance.
    pub async fn handle_turn(&self, session: &mut Session, utterance: &str) -> TurnOutcome {
        session.turns += 1;
        session.tier = session.tier.escalate(detect_tier(utterance));

        let encouragements: Vec<String> = detect_sustainable_choices(utterance)
            .into_iter()
            .map(|choice| encouragement(choice, session.turns).to_string())
            .collect();

        let context = session.slots.context(session.pending_topic);
        let extraction = extract_with_timeout(
            self.extractor.as_ref(),
            utterance,
            &context,
            self.config.extraction_timeout,
        )
        .await;

        let (degraded, line_items, updated_slots) = match extraction {
            Some(result) => {
                let record = &result.record;
                let updated = session
                    .slots
                    .merge(&record.facts, record.confidence, Provenance::UserStated);
                let items: Vec<LineItemEmission> = translate_record(record)
                    .into_iter()
                    .filter(|item| !covered_by_facts(item.category, &record.facts))
                    .collect();
                session.slots.attach_line_items(items.clone());
                tracing::debug!(
                    session_id = %session.id,
                    tier = %result.tier,
                    updated,
                    items = items.len(),
                    "merged extraction"
                );
                (false, items, updated)
            }
            None => {
                tracing::info!(
                    session_id = %session.id,
                    pending = ?session.pending_topic,
                    "extraction degraded, re-asking"
                );
                (true, Vec::new(), 0)
            }
        };

        let question = next_question(&session.slots, session.tier);
        session.pending_topic = question.as_ref().map(|q| q.topic);
        session.updated_at = Utc::now();

        TurnOutcome {
            question,
            tier: session.tier,
            encouragements,
            ready_to_calculate: is_terminal(&session.slots, &self.config),
            completion_percentage: session.slots.completion_percentage(),
            confidence_level: session.slots.confidence_level(),
            degraded,
            line_items,
            updated_slots,
        }
    }

    /// Profile for calculation, checked against the configured minimum set.
    pub fn profile(&self, session: &Session) -> IntakeResult<EventProfile> {
        session.to_profile_with(&self.config.minimum_viable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ExtractionResult;
    use crate::inference::rules::RuleBasedExtractor;
    use async_trait::async_trait;
    use ec_protocol::{EventType, ExtractionContext};

    struct DownEngine;

    #[async_trait]
    impl ExtractionEngine for DownEngine {
        async fn extract(&self, _text: &str, _ctx: &ExtractionContext) -> Option<ExtractionResult> {
            None
        }

        fn tier_name(&self) -> &str {
            "down"
        }
    }

    fn rules_engine() -> DialogueEngine {
        DialogueEngine::new(Arc::new(RuleBasedExtractor::new()), DialogueConfig::default())
    }

    #[test]
    fn first_question_is_event_type() {
        let q = next_question(&ExtractedSlotSet::new(), VocabularyTier::Plain).unwrap();
        assert_eq!(q.topic, Topic::EventType);
    }

    #[test]
    fn empty_slots_not_terminal() {
        assert!(!is_terminal(&ExtractedSlotSet::new(), &DialogueConfig::default()));
    }

    #[tokio::test]
    async fn conversation_reaches_minimum_viable() {
        let engine = rules_engine();
        let mut session = Session::new();
        assert_eq!(engine.open(&mut session).unwrap().topic, Topic::EventType);

        let outcome = engine
            .handle_turn(&mut session, "We're planning a wedding for 120 guests")
            .await;
        assert!(!outcome.degraded);
        assert_eq!(outcome.question.as_ref().unwrap().topic, Topic::Venue);
        assert!(!outcome.ready_to_calculate);

        let outcome = engine
            .handle_turn(&mut session, "It's in a hotel ballroom")
            .await;
        assert_eq!(outcome.question.as_ref().unwrap().topic, Topic::Duration);

        let outcome = engine.handle_turn(&mut session, "just one").await;
        assert_eq!(session.slots.days.as_ref().unwrap().value, 1);
        assert!(outcome.ready_to_calculate);
        // Refinement questions keep coming after the session is ready.
        assert_eq!(outcome.question.unwrap().topic, Topic::Power);

        let profile = engine.profile(&session).unwrap();
        assert_eq!(profile.event_type, EventType::Wedding);
        assert_eq!(profile.attendance, 120);
        assert_eq!(profile.venue.venue_type, "ballroom");
    }

    #[tokio::test]
    async fn degraded_turn_reasks_same_topic() {
        let engine = DialogueEngine::new(Arc::new(DownEngine), DialogueConfig::default());
        let mut session = Session::new();
        engine.open(&mut session);

        let outcome = engine.handle_turn(&mut session, "a concert").await;
        assert!(outcome.degraded);
        assert_eq!(outcome.updated_slots, 0);
        assert_eq!(outcome.question.unwrap().topic, Topic::EventType);
        assert_eq!(session.turns, 1);
    }

    #[tokio::test]
    async fn encouragement_even_when_degraded() {
        let engine = DialogueEngine::new(Arc::new(DownEngine), DialogueConfig::default());
        let mut session = Session::new();
        let outcome = engine
            .handle_turn(&mut session, "everything is solar powered with local catering")
            .await;
        assert!(outcome.degraded);
        assert_eq!(outcome.encouragements.len(), 2);
    }

    #[tokio::test]
    async fn tier_escalates_and_sticks() {
        let engine = rules_engine();
        let mut session = Session::new();

        let outcome = engine
            .handle_turn(&mut session, "We need scope 3 numbers for a conference")
            .await;
        assert_eq!(outcome.tier, VocabularyTier::Technical);

        let outcome = engine.handle_turn(&mut session, "about 300 people").await;
        assert_eq!(outcome.tier, VocabularyTier::Technical);
        assert_eq!(session.slots.attendance.as_ref().unwrap().value, 300);
    }

    #[tokio::test]
    async fn material_items_attach_to_session() {
        let engine = rules_engine();
        let mut session = Session::new();
        let outcome = engine
            .handle_turn(&mut session, "a trade show with a 30-foot vinyl backdrop")
            .await;
        assert_eq!(outcome.line_items.len(), 1);
        assert_eq!(session.slots.line_items.len(), 1);
        assert_eq!(session.slots.line_items[0].category, ItemCategory::Materials);
    }

    async fn festival_session(engine: &DialogueEngine) -> Session {
        let mut session = Session::new();
        engine
            .handle_turn(&mut session, "a 3-day festival for 1,000 people in a park")
            .await;
        session
    }

    fn session_total(engine: &DialogueEngine, session: &Session) -> f64 {
        let profile = engine.profile(session).unwrap();
        ec_accounting::calculate_event_emissions(&profile).unwrap().total
    }

    #[tokio::test]
    async fn stated_trucks_keep_their_transport_item() {
        let engine = rules_engine();
        let mut session = festival_session(&engine).await;
        let before = session_total(&engine, &session);

        let outcome = engine
            .handle_turn(&mut session, "2 trucks driving 500 km")
            .await;
        assert_eq!(session.slots.trucks.as_ref().unwrap().value, 2);
        assert_eq!(outcome.line_items.len(), 1);
        assert_eq!(outcome.line_items[0].category, ItemCategory::Transportation);

        let after = session_total(&engine, &session);
        assert!((after - before - 0.85).abs() < 1e-9, "{before} -> {after}");
    }

    #[tokio::test]
    async fn stated_meals_keep_their_food_item() {
        let engine = rules_engine();
        let mut session = festival_session(&engine).await;
        let before = session_total(&engine, &session);

        let outcome = engine.handle_turn(&mut session, "400 beef meals").await;
        assert_eq!(outcome.line_items.len(), 1);
        assert_eq!(outcome.line_items[0].category, ItemCategory::Food);
        assert!(session_total(&engine, &session) > before);
    }

    #[test]
    fn only_power_source_covers_items() {
        let facts = EventFacts {
            power_source: Some(ec_protocol::PowerSource::Generator),
            trucks: Some(2),
            meals_served: Some(400),
            ..Default::default()
        };
        assert!(covered_by_facts(ItemCategory::Energy, &facts));
        assert!(!covered_by_facts(ItemCategory::Transportation, &facts));
        assert!(!covered_by_facts(ItemCategory::Food, &facts));
    }

    #[tokio::test]
    async fn custom_minimum_viable() {
        let engine = DialogueEngine::new(
            Arc::new(RuleBasedExtractor::new()),
            DialogueConfig {
                minimum_viable: vec![Topic::EventType, Topic::Attendance],
                ..Default::default()
            },
        );
        let mut session = Session::new();
        let outcome = engine
            .handle_turn(&mut session, "a festival for 5,000 people")
            .await;
        assert!(outcome.ready_to_calculate);
        assert!(engine.profile(&session).is_ok());
    }
}
