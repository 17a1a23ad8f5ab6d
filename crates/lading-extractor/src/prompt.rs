//! Prompt construction for shipment extraction

use lading_domain::schema::FieldSchema;
use lading_domain::PAGE_BREAK_MARKER;

/// A prepared model call: system-style instruction plus user content.
#[derive(Debug, Clone)]
pub struct ExtractionPrompt {
    /// System-style framing and output contract
    pub instruction: String,
    /// The document text wrapped in a short request line
    pub content: String,
}

/// Builds extraction prompts in the two framings the pipeline needs.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for the direct path: the model sees the whole document.
    pub fn full_document(text: &str) -> ExtractionPrompt {
        let instruction = format!(
            "{role}\n\n\
             IMPORTANT: The text comes from a multi-page document. Make sure to extract \
             information from ALL pages, not just the first page.\n\
             Page breaks are marked with '{marker}'. Process the entire document.\n\n\
             {contract}\n\n\
             {fields}\n\n\
             {format}\n\
             Make sure to search the ENTIRE document across all pages.\n\
             {json_only}",
            role = ROLE,
            marker = PAGE_BREAK_MARKER,
            contract = FIELD_CONTRACT,
            fields = FieldSchema::prompt_field_list(),
            format = ARRAY_FORMAT,
            json_only = JSON_ONLY,
        );

        let content = format!(
            "Extract the shipping information from the following multi-page document:\n\n{}",
            text
        );

        ExtractionPrompt { instruction, content }
    }

    /// Prompt for one page batch: no full-document claims, so the model
    /// does not hallucinate coverage of pages it never saw.
    pub fn batch(text: &str, batch_index: usize, batch_count: usize) -> ExtractionPrompt {
        let instruction = format!(
            "{role}\n\n\
             This is batch {index} of {count} from a multi-page document. Extract all \
             shipping information from this batch.\n\n\
             {contract}\n\n\
             {fields}\n\n\
             {format}\n\
             {json_only}",
            role = ROLE,
            index = batch_index,
            count = batch_count,
            contract = FIELD_CONTRACT,
            fields = FieldSchema::prompt_field_list(),
            format = ARRAY_FORMAT,
            json_only = JSON_ONLY,
        );

        let content = format!(
            "Extract the shipping information from this part of the document:\n\n{}",
            text
        );

        ExtractionPrompt { instruction, content }
    }
}

const ROLE: &str = "You are a specialized assistant for extracting shipping and logistics \
                    information from documents.";

const FIELD_CONTRACT: &str = "Extract the following fields from the provided text. For any \
                              field not found, leave it as an empty string.\n\
                              Return the result as a JSON object with the following fields:";

const ARRAY_FORMAT: &str = "Format your response as a JSON array of objects. If multiple \
                            shipments are found, include multiple objects in the array.";

const JSON_ONLY: &str = "Return ONLY the JSON array, no other text. Your response should be \
                         valid JSON and should start with [ and end with ].";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_prompt_mentions_all_pages() {
        let prompt = PromptBuilder::full_document("some text");
        assert!(prompt.instruction.contains("ALL pages"));
        assert!(prompt.instruction.contains(PAGE_BREAK_MARKER));
        assert!(prompt.instruction.contains("ENTIRE document"));
        assert!(prompt.content.contains("some text"));
    }

    #[test]
    fn test_batch_prompt_does_not_claim_full_document() {
        let prompt = PromptBuilder::batch("batch text", 2, 5);
        assert!(prompt.instruction.contains("batch 2 of 5"));
        assert!(!prompt.instruction.contains("ENTIRE document"));
        assert!(!prompt.instruction.contains("ALL pages"));
        assert!(prompt.content.contains("batch text"));
    }

    #[test]
    fn test_prompts_carry_the_field_list() {
        let prompt = PromptBuilder::full_document("x");
        assert!(prompt.instruction.contains("- container_number"));
        assert!(prompt.instruction.contains("- eta_date"));
        assert!(prompt.instruction.contains("- Notes"));

        let batch = PromptBuilder::batch("x", 1, 1);
        assert!(batch.instruction.contains("- container_number"));
    }

    #[test]
    fn test_prompts_demand_bare_json() {
        let prompt = PromptBuilder::batch("x", 1, 2);
        assert!(prompt.instruction.contains("start with [ and end with ]"));
    }
}
