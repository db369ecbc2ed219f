use dreamtales_core::{GenerationRequest, StoryLength};
use dreamtales_error::{DreamTalesErrorKind, GenerationErrorKind};
use strum::IntoEnumIterator;

#[test]
fn empty_topic_is_rejected() {
    for topic in ["", "   ", "\n\t"] {
        let err = GenerationRequest::new(topic, StoryLength::Short).unwrap_err();
        match err.kind() {
            DreamTalesErrorKind::Generation(e) => assert_eq!(e.kind, GenerationErrorKind::EmptyTopic),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn subject_is_none_when_blank() {
    let request = GenerationRequest::new("a sleepy bunny", StoryLength::Medium).unwrap();
    assert_eq!(request.subject_name(), "");
    assert_eq!(request.subject(), None);

    let request = request.with_subject_name("  ");
    assert_eq!(request.subject(), None);

    let request = request.with_subject_name("Mia");
    assert_eq!(request.subject(), Some("Mia"));
}

#[test]
fn length_parameters_grow_with_length() {
    let limits: Vec<usize> = StoryLength::iter().map(|l| l.word_limit()).collect();
    assert_eq!(limits, vec![250, 400]);
    assert_eq!(StoryLength::Short.reading_time(), "2-3 minutes");
    assert_eq!(StoryLength::Medium.scenes(), "3-4");
}

#[test]
fn length_parses_case_insensitively() {
    assert_eq!("SHORT".parse::<StoryLength>().unwrap(), StoryLength::Short);
    assert_eq!(" Medium ".parse::<StoryLength>().unwrap(), StoryLength::Medium);
    assert!("long".parse::<StoryLength>().is_err());
}

#[test]
fn request_round_trips_through_json() {
    let request = GenerationRequest::new("a dragon who loves tea", StoryLength::Short)
        .unwrap()
        .with_subject_name("Leo");
    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("\"length\":\"short\""));
    let parsed: GenerationRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);
}
