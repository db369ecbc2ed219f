//! Prompt construction.

use crate::RefusalPolicy;
use dreamtales_core::{GenerationRequest, Message};

/// User message describing the story to write.
pub fn story_brief(request: &GenerationRequest) -> String {
    let length = request.length();
    let mut brief = format!(
        "Create a gentle bedtime story for children aged 2-5 years old about {topic}.\n\
         Story length: {label} ({reading_time}), at most {words} words.\n",
        topic = request.topic().trim(),
        label = length.to_string().to_uppercase(),
        reading_time = length.reading_time(),
        words = length.word_limit(),
    );

    if let Some(name) = request.subject() {
        brief.push_str(&format!(
            "The main character is a child named {name}; use the name naturally in the story.\n"
        ));
    }

    brief.push_str(&format!(
        "\nStory requirements:\n\
         - Turn the topic into a calm narrative with no more than 2-3 characters\n\
         - Set it somewhere peaceful: a bedroom, a garden or under the stars\n\
         - Use short, simple sentences and soothing words\n\
         - Include {scenes} scenes and a gentle repeated phrase children can say along\n\
         - Add 1-2 moments where children can mimic an action, like yawning or stretching\n\
         - End with the characters sleepy and at peace\n",
        scenes = length.scenes(),
    ));

    brief
}

/// Ordered messages for the text stage: policy first, then the brief.
///
/// ```
/// use dreamtales_core::{GenerationRequest, Role, StoryLength};
/// use dreamtales_story::{story_messages, RefusalPolicy};
///
/// let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short).unwrap();
/// let messages = story_messages(&request, &RefusalPolicy::default());
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// assert!(messages[1].content.contains("a sleepy bunny"));
/// ```
pub fn story_messages(request: &GenerationRequest, policy: &RefusalPolicy) -> Vec<Message> {
    vec![
        Message::system(policy.instructions()),
        Message::user(story_brief(request)),
    ]
}

/// Visual prompt for the illustration.
///
/// The subject name, when given, shapes the character but must never appear
/// as lettering in the picture.
pub fn image_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "Illustration for a children's bedtime story about {}. The scene should be warm and \
         cozy, with soft lighting, gentle colors and a peaceful atmosphere. The main \
         character(s) should be in a relaxing environment, like a bedroom, garden or under a \
         starry sky.",
        request.topic().trim()
    );

    if let Some(name) = request.subject() {
        prompt.push_str(&format!(
            " The main character is a young child called {name}."
        ));
    }
    prompt.push_str(" Do not include any text, letters or names in the image.");

    prompt
}

/// Messages for a single story of exactly `word_limit` words.
pub fn word_limited_messages(idea: &str, word_limit: usize) -> Vec<Message> {
    vec![
        Message::system("You are a creative storyteller who follows length limits precisely."),
        Message::user(format!(
            "Write a creative short story based on this idea: {}.\n\
             The story must be exactly {} words long. Reply with the story only.",
            idea.trim(),
            word_limit
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtales_core::StoryLength;

    #[test]
    fn test_brief_uses_length_parameters() {
        let short = GenerationRequest::new("a sleepy bunny", StoryLength::Short).unwrap();
        let medium = GenerationRequest::new("a sleepy bunny", StoryLength::Medium).unwrap();

        let short_brief = story_brief(&short);
        assert!(short_brief.contains("SHORT (2-3 minutes)"));
        assert!(short_brief.contains("250 words"));
        assert!(short_brief.contains("Include 2-3 scenes"));

        let medium_brief = story_brief(&medium);
        assert!(medium_brief.contains("MEDIUM (5-7 minutes)"));
        assert!(medium_brief.contains("400 words"));
        assert!(medium_brief.contains("Include 3-4 scenes"));
    }

    #[test]
    fn test_brief_mentions_subject_only_when_present() {
        let anonymous = GenerationRequest::new("a dragon picnic", StoryLength::Short).unwrap();
        assert!(!story_brief(&anonymous).contains("named"));

        let named = anonymous.with_subject_name("Mia");
        assert!(story_brief(&named).contains("a child named Mia"));
    }

    #[test]
    fn test_policy_message_carries_sentinel() {
        let policy = RefusalPolicy::new("NO STORY TONIGHT");
        let request = GenerationRequest::new("a dragon picnic", StoryLength::Short).unwrap();
        let messages = story_messages(&request, &policy);

        assert!(messages[0].content.contains("NO STORY TONIGHT"));
        assert!(messages[0].content.contains("violence"));
    }

    #[test]
    fn test_image_prompt_forbids_text() {
        let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short)
            .unwrap()
            .with_subject_name("Leo");
        let prompt = image_prompt(&request);

        assert!(prompt.contains("a sleepy bunny"));
        assert!(prompt.contains("Leo"));
        assert!(prompt.contains("Do not include any text"));
    }
}
