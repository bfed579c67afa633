//! Prompt templates — versioned text assets, kept apart from pipeline logic.
//!
//! The resolution pipeline is tested entirely with mocked services, so
//! wording here can evolve without touching any control flow. One clause is
//! contractual, not editorial: the product search instruction must keep the
//! "Do not invent information" rule, because no downstream validation exists
//! to catch a fabricated product.

/// System prompt for serial number extraction from an uploaded file.
pub const EXTRACT_SYSTEM_PROMPT: &str = "\
You are an expert OCR reader specializing in extracting serial numbers from \
images and documents.";

/// User prompt for serial number extraction. The file travels alongside as
/// an image attachment.
pub const EXTRACT_USER_PROMPT: &str = "\
Read all text in the attached image or document and find every alphanumeric \
string that looks like a serial number. Serial numbers are sometimes prefixed \
with 'S/N', 'SN', or 'Serial No.'. If you detect multiple possible serial \
numbers, return all of them rather than committing to one.\n\
\n\
Respond with a JSON object of the form:\n\
{\"serial_numbers\": [\"...\"]}\n\
\n\
Return an empty array if no serial number is visible.";

/// System prompt for step help text generation.
pub const HELP_SYSTEM_PROMPT: &str = "\
You are an AI assistant specializing in creating simple, user-friendly help \
text for shop floor technicians.";

/// Build the help text prompt for one UI step description.
pub fn build_help_prompt(step_description: &str) -> String {
    format!(
        "Generate a concise and easy-to-understand help text for the following step:\n\
         \n\
         Step Description: {step_description}\n\
         \n\
         The help text should be no more than two sentences and use simple \
         language suitable for non-technical users. Focus on explaining the \
         purpose of the step and how to complete it successfully. Avoid jargon \
         and technical terms.\n\
         \n\
         Respond with a JSON object of the form:\n\
         {{\"help_text\": \"...\"}}"
    )
}

/// System prompt for product identification search.
pub const SEARCH_SYSTEM_PROMPT: &str = "\
You are an expert at identifying electronic components and parts from serial \
numbers and images. Your task is to find information about a product based on \
the provided serial number and an optional image.";

/// Build the product search prompt.
///
/// `has_image` switches in the visual-grounding paragraph; the image itself
/// travels as an attachment on the request.
pub fn build_search_prompt(serial_number: &str, has_image: bool) -> String {
    let image_note = if has_image {
        "\nYou have also been provided with an image of the product. Use it as \
         additional context for your search.\n"
    } else {
        ""
    };

    format!(
        "Search your knowledge of electronic products for details about this \
         component. Be thorough.\n\
         \n\
         If you find credible information, populate the 'product' object with \
         the name, kind, manufacturer, and a description, and set 'found' to \
         true.\n\
         \n\
         If you cannot find any information or are not confident in the \
         result, set 'found' to false and explain why in the 'reasoning' \
         field. Do not invent information.\n\
         \n\
         Serial Number: {serial_number}\n\
         {image_note}\n\
         Respond with a JSON object of the form:\n\
         {{\"found\": true|false, \"product\": {{\"name\": \"...\", \"kind\": \
         \"...\", \"manufacturer\": \"...\", \"description\": \"...\"}}, \
         \"reasoning\": \"...\"}}\n\
         \n\
         Always fill in 'reasoning', whether or not the product was found. \
         Omit 'product' entirely when 'found' is false."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_prompt_keeps_do_not_invent_clause() {
        // Contractual: absence of evidence must yield found=false, never a
        // guessed record.
        assert!(build_search_prompt("SN1", false).contains("Do not invent information"));
        assert!(build_search_prompt("SN1", true).contains("Do not invent information"));
    }

    #[test]
    fn search_prompt_interpolates_serial() {
        let prompt = build_search_prompt("XK-4421-B", false);
        assert!(prompt.contains("Serial Number: XK-4421-B"));
    }

    #[test]
    fn search_prompt_mentions_image_only_with_file() {
        assert!(build_search_prompt("SN1", true).contains("image of the product"));
        assert!(!build_search_prompt("SN1", false).contains("image of the product"));
    }

    #[test]
    fn help_prompt_interpolates_description() {
        let prompt = build_help_prompt("Upload a photo of the component");
        assert!(prompt.contains("Upload a photo of the component"));
        assert!(prompt.contains("two sentences"));
    }

    #[test]
    fn extract_prompt_mentions_common_prefixes() {
        assert!(EXTRACT_USER_PROMPT.contains("S/N"));
        assert!(EXTRACT_USER_PROMPT.contains("Serial No."));
    }
}
