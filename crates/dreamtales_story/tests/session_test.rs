//! Tests for quota admission and caching around the orchestrator.

mod test_utils;

use chrono::TimeDelta;
use dreamtales_cache::{CacheConfig, CacheKeyPolicy};
use dreamtales_core::{GenerationRequest, StoryLength};
use dreamtales_rate_limit::{ManualClock, QuotaConfig};
use dreamtales_story::{SessionOutcome, StorySession, DEFAULT_REFUSAL_SENTINEL};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{server_error, Harness, MockBehavior, MockText};

fn request(topic: &str, length: StoryLength) -> GenerationRequest {
    GenerationRequest::new(topic, length).unwrap()
}

fn session(harness: &Harness, clock: &ManualClock) -> StorySession {
    session_with(harness, clock, QuotaConfig::default(), CacheConfig::default())
}

fn session_with(
    harness: &Harness,
    clock: &ManualClock,
    quota: QuotaConfig,
    cache: CacheConfig,
) -> StorySession {
    StorySession::new(
        Arc::new(harness.orchestrator()),
        quota,
        cache,
        Arc::new(clock.clone()),
    )
}

#[tokio::test]
async fn test_fresh_generation_consumes_one_token() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let session = session(&harness, &clock);

    assert_eq!(session.remaining().await, 2);

    let outcome = session
        .request(&request("a sleepy bunny", StoryLength::Short))
        .await
        .unwrap();

    let bundle = outcome.bundle().unwrap();
    assert!(!*bundle.from_cache());
    assert_eq!(session.remaining().await, 1);
    assert_eq!(session.cached().await, 1);
}

#[tokio::test]
async fn test_cache_hit_is_free_and_skips_providers() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let session = session(&harness, &clock);
    let bunny = request("a sleepy bunny", StoryLength::Short);

    let first = session.request(&bunny).await.unwrap().into_bundle().unwrap();
    let second = session.request(&bunny).await.unwrap().into_bundle().unwrap();

    assert!(*second.from_cache());
    assert_eq!(second.story(), first.story());
    assert_eq!(second.audio(), first.audio());
    assert_eq!(session.remaining().await, 1);
    assert_eq!(harness.text.call_count(), 1);
    assert_eq!(harness.image.call_count(), 1);
    assert_eq!(harness.speech.call_count(), 1);
    assert_eq!(harness.renderer.call_count(), 1);
}

#[tokio::test]
async fn test_quota_window_scenario() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let session = session(&harness, &clock);

    for topic in ["a sleepy bunny", "a brave turtle"] {
        let outcome = session
            .request(&request(topic, StoryLength::Short))
            .await
            .unwrap();
        assert!(matches!(outcome, SessionOutcome::Delivered(_)));
    }
    assert_eq!(session.remaining().await, 0);

    clock.advance(TimeDelta::hours(1));
    let outcome = session
        .request(&request("a dancing star", StoryLength::Short))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SessionOutcome::QuotaExhausted {
            retry_after: Duration::from_secs(7 * 60 * 60)
        }
    );
    assert_eq!(harness.text.call_count(), 2);

    clock.advance(TimeDelta::hours(7) + TimeDelta::seconds(1));
    let outcome = session
        .request(&request("a dancing star", StoryLength::Short))
        .await
        .unwrap();
    assert!(matches!(outcome, SessionOutcome::Delivered(_)));
    assert_eq!(session.remaining().await, 1);
}

#[tokio::test]
async fn test_exhausted_quota_blocks_cached_topics_too() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let quota = QuotaConfig::default().with_max_tokens(1);
    let session = session_with(&harness, &clock, quota, CacheConfig::default());
    let bunny = request("a sleepy bunny", StoryLength::Short);

    session.request(&bunny).await.unwrap();
    let outcome = session.request(&bunny).await.unwrap();

    assert!(matches!(outcome, SessionOutcome::QuotaExhausted { .. }));
}

#[tokio::test]
async fn test_length_is_ignored_by_default_key() {
    // Documents current behavior: a MEDIUM request for a topic first
    // generated as SHORT gets the SHORT bundle back.
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let session = session(&harness, &clock);

    let short = session
        .request(&request("a sleepy bunny", StoryLength::Short))
        .await
        .unwrap()
        .into_bundle()
        .unwrap();
    let medium = session
        .request(&request("a sleepy bunny", StoryLength::Medium))
        .await
        .unwrap()
        .into_bundle()
        .unwrap();

    assert!(*medium.from_cache());
    assert_eq!(medium.marked_from_cache(false), short);
    assert_eq!(harness.text.call_count(), 1);
}

#[tokio::test]
async fn test_length_aware_key_generates_again() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let cache = CacheConfig::default().with_key_policy(CacheKeyPolicy::TopicSubjectAndLength);
    let session = session_with(&harness, &clock, QuotaConfig::default(), cache);

    session
        .request(&request("a sleepy bunny", StoryLength::Short))
        .await
        .unwrap();
    let medium = session
        .request(&request("a sleepy bunny", StoryLength::Medium))
        .await
        .unwrap()
        .into_bundle()
        .unwrap();

    assert!(!*medium.from_cache());
    assert_eq!(harness.text.call_count(), 2);
    assert_eq!(session.remaining().await, 0);
}

#[tokio::test]
async fn test_text_failure_consumes_nothing() {
    let text = MockText::new(MockBehavior::Sequence(vec![
        Err(server_error()),
        Ok("The turtle tucked itself in.".to_string()),
    ]));
    let harness = Harness::happy().with_text(text);
    let clock = ManualClock::default();
    let session = session(&harness, &clock);
    let turtle = request("a brave turtle", StoryLength::Short);

    assert!(session.request(&turtle).await.is_err());
    assert_eq!(session.remaining().await, 2);
    assert_eq!(session.cached().await, 0);

    let bundle = session.request(&turtle).await.unwrap().into_bundle().unwrap();
    assert!(!*bundle.from_cache());
    assert_eq!(session.remaining().await, 1);
    assert_eq!(harness.text.call_count(), 2);
}

#[tokio::test]
async fn test_refusal_consumes_and_is_cached() {
    let harness = Harness::happy().with_text(MockText::success(DEFAULT_REFUSAL_SENTINEL));
    let clock = ManualClock::default();
    let session = session(&harness, &clock);
    let topic = request("a haunted house", StoryLength::Short);

    let first = session.request(&topic).await.unwrap().into_bundle().unwrap();
    let second = session.request(&topic).await.unwrap().into_bundle().unwrap();

    assert!(*first.refused());
    assert!(*second.refused());
    assert!(*second.from_cache());
    assert_eq!(session.remaining().await, 1);
    assert_eq!(harness.text.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_requests_generate_once() {
    let harness = Harness::happy();
    let clock = ManualClock::default();
    let session = Arc::new(session(&harness, &clock));
    let bunny = request("a sleepy bunny", StoryLength::Short);

    let (a, b) = tokio::join!(session.request(&bunny), session.request(&bunny));
    let a = a.unwrap().into_bundle().unwrap();
    let b = b.unwrap().into_bundle().unwrap();

    assert_ne!(*a.from_cache(), *b.from_cache());
    assert_eq!(harness.text.call_count(), 1);
    assert_eq!(session.remaining().await, 1);
}
