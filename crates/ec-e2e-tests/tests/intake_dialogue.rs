//! E2E tests for conversational intake over the session endpoints.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestHarness, approx, festival_profile};

// ── Question order ──────────────────────────────────────────────

#[tokio::test]
async fn e2e_opening_question_is_event_type() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let (status, question) = h.get(&format!("/api/v1/sessions/{id}/question")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["topic"], "event_type");
    assert!(!question["text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn e2e_answered_topics_are_not_asked_again() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let turn = h.say(&id, "We're planning a wedding for 120 guests").await;
    assert_eq!(turn["question"]["topic"], "venue");
    assert_eq!(turn["ready_to_calculate"], false);

    let turn = h.say(&id, "It's in a hotel ballroom").await;
    assert_eq!(turn["question"]["topic"], "duration");

    let turn = h.say(&id, "just one").await;
    assert_eq!(turn["ready_to_calculate"], true);
    // Refinement questions continue once the minimum is in.
    assert_eq!(turn["question"]["topic"], "power");

    let (_, session) = h.get(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(session["turns"], 3);
    assert_eq!(session["slots"]["event_type"]["value"], "wedding");
    assert_eq!(session["slots"]["attendance"]["value"], 120);
    assert_eq!(session["slots"]["venue_type"]["value"], "ballroom");
    assert_eq!(session["slots"]["days"]["value"], 1);
    assert_eq!(session["slots"]["days"]["provenance"], "user_stated");
}

#[tokio::test]
async fn e2e_unparseable_answer_reasks_same_topic() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let turn = h.say(&id, "hmm, good question").await;
    assert_eq!(turn["degraded"], true);
    assert_eq!(turn["updated_slots"], 0);
    assert_eq!(turn["question"]["topic"], "event_type");
}

// ── Scenario A as a conversation ────────────────────────────────

/// One detailed message covers the minimum; the result matches the
/// structured calculation of the same festival.
#[tokio::test]
async fn e2e_conversation_matches_structured_calculation() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let turn = h
        .say(
            &id,
            "a 3-day festival for 1,000 people in a park, 10 hours a day, on grid power",
        )
        .await;
    assert_eq!(turn["degraded"], false);
    assert_eq!(turn["ready_to_calculate"], true);
    assert_eq!(turn["question"]["topic"], "staging");
    assert!(turn["line_items"].as_array().unwrap().is_empty());

    let (status, from_session) = h.calculate_session(&id).await;
    assert_eq!(status, StatusCode::OK);
    let (_, structured) = h.calculate(&festival_profile("grid", false)).await;

    let session_total = from_session["result"]["total"].as_f64().unwrap();
    assert!(approx(session_total, 40.0), "total was {session_total}");
    assert!(approx(
        session_total,
        structured["result"]["total"].as_f64().unwrap()
    ));
    assert_eq!(
        from_session["result"]["benchmark"],
        structured["result"]["benchmark"]
    );
}

// ── Persona ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_vocabulary_tier_only_escalates() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let turn = h.say(&id, "We need scope 3 numbers for a conference").await;
    assert_eq!(turn["tier"], "technical");

    let turn = h.say(&id, "about 300 people").await;
    assert_eq!(turn["tier"], "technical");

    let (_, session) = h.get(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(session["tier"], "technical");
}

#[tokio::test]
async fn e2e_sustainable_choices_are_encouraged() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let turn = h
        .say(&id, "a conference where everything is solar powered with local catering")
        .await;
    assert_eq!(turn["encouragements"].as_array().unwrap().len(), 2);
}

// ── Line items ──────────────────────────────────────────────────

/// Items mentioned in passing land on the session and in the result.
#[tokio::test]
async fn e2e_mentioned_items_are_counted() {
    let h = TestHarness::new();

    let plain = h.open_session().await;
    h.say(&plain, "a trade show for 800 attendees at the convention center")
        .await;
    h.say(&plain, "two days").await;

    let with_item = h.open_session().await;
    let turn = h
        .say(
            &with_item,
            "a trade show for 800 attendees at the convention center with a 30-foot vinyl backdrop",
        )
        .await;
    let items = turn["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "materials");
    h.say(&with_item, "two days").await;

    let (status, a) = h.calculate_session(&plain).await;
    assert_eq!(status, StatusCode::OK);
    let (status, b) = h.calculate_session(&with_item).await;
    assert_eq!(status, StatusCode::OK);

    let production_a = a["result"]["per_category"]["production"].as_f64().unwrap();
    let production_b = b["result"]["per_category"]["production"].as_f64().unwrap();
    assert!(production_b > production_a);
    assert_eq!(
        a["result"]["per_category"]["energy"],
        b["result"]["per_category"]["energy"]
    );
}

/// Trucks stated as a fact still add their haul to the total.
#[tokio::test]
async fn e2e_stated_trucks_add_transport_emissions() {
    let h = TestHarness::new();
    let id = h.open_session().await;
    h.say(
        &id,
        "a 3-day festival for 1,000 people in a park, 10 hours a day, on grid power",
    )
    .await;
    let (_, before) = h.calculate_session(&id).await;

    let turn = h.say(&id, "2 trucks driving 500 km").await;
    let items = turn["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "transportation");

    let (_, session) = h.get(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(session["slots"]["trucks"]["value"], 2);
    assert_eq!(session["slots"]["line_items"].as_array().unwrap().len(), 1);

    let (status, after) = h.calculate_session(&id).await;
    assert_eq!(status, StatusCode::OK);
    let before = before["result"]["total"].as_f64().unwrap();
    let after = after["result"]["total"].as_f64().unwrap();
    assert!(approx(after - before, 0.85), "{before} -> {after}");
}

// ── Lifecycle ───────────────────────────────────────────────────

#[tokio::test]
async fn e2e_sessions_are_isolated() {
    let h = TestHarness::new();
    let a = h.open_session().await;
    let b = h.open_session().await;
    assert_ne!(a, b);

    h.say(&a, "a concert for 2,000 fans").await;

    let (_, session_b) = h.get(&format!("/api/v1/sessions/{b}")).await;
    assert!(session_b["slots"]["event_type"].is_null());
    assert_eq!(session_b["turns"], 0);
}

#[tokio::test]
async fn e2e_deleted_session_is_gone() {
    let h = TestHarness::new();
    let id = h.open_session().await;

    let (status, _) = h.delete(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = h.get(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = h.delete(&format!("/api/v1/sessions/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
