//! Input adapters: both input shapes reduce to a [`GenerationRequest`].

use crate::error::{DomainPilotError, Result};
use crate::types::{DescriptionInput, GenerationRequest, InputVariant, PipelineInput, QuestionnaireInput};

/// Placeholder keys of the four fixed questions, in question order
pub const QUESTION_KEYS: [&str; 4] = ["projectName", "businessType", "targetAudience", "keywords"];

/// Question text shown by interactive front ends, paired with an example answer
pub const QUESTIONS: [(&str, &str); 4] = [
    (
        "What is your business or project name?",
        "e.g., Tech Solutions, My Blog, Online Store",
    ),
    (
        "What type of business is it?",
        "e.g., E-commerce, SaaS, Agency, Personal Brand",
    ),
    (
        "Who is your target audience?",
        "e.g., Developers, Small Business Owners, Students",
    ),
    (
        "Enter some keywords that describe your business or values.",
        "e.g., innovative, fast, secure, creative",
    ),
];

const MIN_DESCRIPTION_CHARS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 2;

/// Validate raw input and turn it into a generation request asking for
/// `target_count` names.
pub fn prepare(input: &PipelineInput, target_count: usize) -> Result<GenerationRequest> {
    match input {
        PipelineInput::Questionnaire(answers) => from_questionnaire(answers, target_count),
        PipelineInput::Description(form) => from_description(form, target_count),
    }
}

pub fn from_questionnaire(input: &QuestionnaireInput, target_count: usize) -> Result<GenerationRequest> {
    if input.answers.len() != QUESTION_KEYS.len() {
        return Err(DomainPilotError::validation(format!(
            "Expected {} answers, got {}.",
            QUESTION_KEYS.len(),
            input.answers.len()
        )));
    }

    if input.answers.iter().any(|answer| answer.trim().is_empty()) {
        return Err(DomainPilotError::validation(
            "Please answer all questions before submitting.",
        ));
    }

    let fields = QUESTION_KEYS
        .iter()
        .zip(&input.answers)
        .map(|(key, answer)| (key.to_string(), answer.trim().to_string()))
        .collect();

    Ok(GenerationRequest {
        variant: InputVariant::Questionnaire,
        fields,
        target_count,
    })
}

pub fn from_description(input: &DescriptionInput, target_count: usize) -> Result<GenerationRequest> {
    let description = input.business_description.trim();
    let keywords = input.keywords.trim();

    let mut problems = Vec::new();
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        problems.push("Description must be at least 10 characters.");
    }
    if keywords.chars().count() < MIN_KEYWORD_CHARS {
        problems.push("Please enter at least one keyword.");
    }
    if !problems.is_empty() {
        return Err(DomainPilotError::validation(problems.join(" ")));
    }

    Ok(GenerationRequest {
        variant: InputVariant::Description,
        fields: vec![
            ("businessDescription".to_string(), description.to_string()),
            ("keywords".to_string(), keywords.to_string()),
        ],
        target_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(values: [&str; 4]) -> QuestionnaireInput {
        QuestionnaireInput::new(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_questionnaire_fields_in_order() {
        let request = from_questionnaire(
            &answers(["PawBox", " Subscription box ", "Dog owners", "eco, play"]),
            20,
        )
        .unwrap();

        assert_eq!(request.variant, InputVariant::Questionnaire);
        assert_eq!(request.target_count, 20);
        assert_eq!(request.field("projectName"), Some("PawBox"));
        assert_eq!(request.field("businessType"), Some("Subscription box"));
        let keys: Vec<&str> = request.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, QUESTION_KEYS.to_vec());
    }

    #[test]
    fn test_questionnaire_blank_answer() {
        let err = from_questionnaire(&answers(["PawBox", "Retail", "   ", "eco"]), 20).unwrap_err();
        assert!(matches!(err, DomainPilotError::Validation { .. }));
        assert!(err.to_string().contains("answer all questions"));
    }

    #[test]
    fn test_questionnaire_wrong_count() {
        let input = QuestionnaireInput::new(vec!["PawBox".to_string()]);
        assert!(from_questionnaire(&input, 20).is_err());
    }

    #[test]
    fn test_description_validation_messages_joined() {
        let err = from_description(&DescriptionInput::new("short", "x"), 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Description must be at least 10 characters. Please enter at least one keyword."
        );
    }

    #[test]
    fn test_description_ok() {
        let request = from_description(
            &DescriptionInput::new("A subscription box for eco-friendly dog toys", "sustainable, dog"),
            10,
        )
        .unwrap();
        assert_eq!(request.variant, InputVariant::Description);
        assert_eq!(request.field("keywords"), Some("sustainable, dog"));
        assert_eq!(request.field("projectName"), None);
    }

    #[test]
    fn test_prepare_dispatches_on_variant() {
        let input = PipelineInput::Description(DescriptionInput::new(
            "A subscription box for eco-friendly dog toys",
            "eco",
        ));
        let request = prepare(&input, 7).unwrap();
        assert_eq!(request.variant, InputVariant::Description);
        assert_eq!(request.target_count, 7);

        let blank = PipelineInput::Questionnaire(answers(["", "", "", ""]));
        assert!(prepare(&blank, 20).is_err());
    }
}
