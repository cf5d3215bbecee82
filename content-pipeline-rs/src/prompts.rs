// content-pipeline-rs/src/prompts.rs
// Prompt builders for the three pipeline stages.
//
// These are pure functions of their inputs: the writer prompt depends
// only on the request, the critic prompt embeds the draft verbatim, and
// the reviser prompt embeds both the draft and the critique verbatim.
// Keeping them deterministic is what makes the pipeline wiring testable
// without a live provider.

use crate::model::{ContentKind, ContentRequest};

/// Fixed system prompt for the writer stage.
pub const WRITER_SYSTEM_PROMPT: &str = "\
You are an expert marketing content writer specializing in B2B technology products.
Your goal is to create compelling, professional content that:
- Captures attention with a strong opening
- Clearly communicates the value proposition
- Uses concrete examples and proof points
- Includes a clear call-to-action
- Maintains an appropriate tone for the target audience";

/// Fixed system prompt for the critic stage.
pub const CRITIC_SYSTEM_PROMPT: &str = "\
You are a critical content reviewer with expertise in marketing and communication.
Your role is to find problems and suggest improvements in content.

Analyze content for:
1. Weak points: claims without proof, vague statements, weak value propositions
2. Exaggerations: unrealistic claims, hyperbole, unsubstantiated superlatives
3. Unclear concepts: jargon, complex sentences, ambiguous statements
4. Tone issues: inconsistencies, inappropriate formality, sales-y language

Be constructive but rigorous. Provide specific examples and actionable feedback.";

/// Fixed system prompt for the reviser stage.
pub const REVISER_SYSTEM_PROMPT: &str = "\
You are an expert content editor and optimizer.
Your role is to take original content and critical feedback, then produce an improved version.

Your revision must:
1. Address ALL points raised by the critic
2. Maintain the original intent and key messages
3. Strengthen weak points with concrete details
4. Remove or justify any claims criticized as exaggerated
5. Clarify any concepts marked as unclear
6. Ensure a consistent, appropriate tone";

/// Build the writer request from the content request alone.
pub fn writer_prompt(request: &ContentRequest) -> String {
    match request.kind {
        ContentKind::Email => {
            let company = request.company.as_deref().unwrap_or("the target company");
            let offer = request.offer.as_deref().unwrap_or(&request.topic);

            format!(
                "Write a cold outreach email for {company}.\n\n\
                 Offer: {offer}\n\
                 Tone: {tone}\n\n\
                 Required structure:\n\
                 1. Subject: short and specific (max 60 characters)\n\
                 2. Opening: personalized reference to the company (1-2 lines)\n\
                 3. Value proposition: what you offer and why it is relevant (2-3 lines)\n\
                 4. Proof point: a concrete result or use case (1-2 lines)\n\
                 5. CTA: clear call-to-action\n\n\
                 Total length: max 150 words.",
                company = company,
                offer = offer,
                tone = request.tone,
            )
        }
        ContentKind::LinkedInPost => format!(
            "Write a LinkedIn post.\n\n\
             Topic: {topic}\n\
             Audience: {audience}\n\
             Tone: {tone}\n\
             Length: {words} words\n\n\
             Required structure:\n\
             1. Hook: an opening line that captures attention\n\
             2. Problem/Insight: an interesting problem or insight (2-3 lines)\n\
             3. Solution/Value: your solution or the value offered (3-4 lines)\n\
             4. Proof: a concrete example or metric (1-2 lines)\n\
             5. CTA: an engaging call-to-action\n\n\
             Use short paragraphs (max 2-3 lines) and 5-7 relevant hashtags at the end.",
            topic = request.topic,
            audience = request.audience,
            tone = request.tone,
            words = request.length.word_range(),
        ),
        ContentKind::Article => format!(
            "Write a professional article.\n\n\
             Topic: {topic}\n\
             Audience: {audience}\n\
             Tone: {tone}\n\
             Target length: {words} words\n\n\
             Required structure:\n\
             1. Title: compelling and specific\n\
             2. Intro: hook plus a preview of the value (50-80 words)\n\
             3. Sections: 3-4 sections with clear subheadings\n\
             4. Concrete examples: at least 2 case studies or practical examples\n\
             5. Conclusion: summary plus CTA\n\n\
             Style: professional but accessible, data and proof points where possible,\n\
             avoid needless jargon, use bullet lists for readability.",
            topic = request.topic,
            audience = request.audience,
            tone = request.tone,
            words = request.length.word_range(),
        ),
        ContentKind::InstagramPost => format!(
            "Write a professional Instagram post.\n\n\
             Topic: {topic}\n\
             Target audience: {audience}\n\
             Tone: {tone}\n\n\
             The post must:\n\
             - Capture attention in the first 2 lines\n\
             - Explain the value for {audience}\n\
             - Include a clear call-to-action\n\
             - Stay concise (max 250 words)\n\n\
             Write ONLY the post text, without hashtags.",
            topic = request.topic,
            audience = request.audience,
            tone = request.tone,
        ),
    }
}

/// Build the critic request. Embeds the draft verbatim and asks for the
/// four structured feedback categories plus a 0-10 score.
pub fn critic_prompt(draft: &str, kind: ContentKind) -> String {
    format!(
        "Analyze this {label} and find specific problems.\n\n\
         CONTENT TO ANALYZE:\n\
         {draft}\n\n\
         Provide structured feedback in this format:\n\n\
         ### WEAK POINTS (3 main ones)\n\
         1. [Specific weak point with an example from the text]\n\n\
         ### EXAGGERATIONS (3 main ones)\n\
         1. [Exaggerated or unsupported claim with a quotation]\n\n\
         ### UNCLEAR CONCEPTS (3 main ones)\n\
         1. [Confusing or ambiguous concept with a quotation]\n\n\
         ### TONE ISSUES (if any)\n\
         - [Tone problems or inconsistencies]\n\n\
         ### PRIORITY SUGGESTIONS\n\
         1. [Specific, actionable suggestion]\n\n\
         ### OVERALL SCORE\n\
         Quality: X/10\n\
         Rationale: [Brief explanation of the score]",
        label = kind.label(),
        draft = draft,
    )
}

/// Build the reviser request. Embeds both the draft and the critique
/// verbatim and instructs that every critique point be addressed while
/// preserving the original intent.
pub fn reviser_prompt(draft: &str, critique: &str, kind: ContentKind) -> String {
    format!(
        "Rewrite this {label} incorporating the critical feedback.\n\n\
         ORIGINAL CONTENT:\n\
         {draft}\n\n\
         CRITICAL FEEDBACK:\n\
         {critique}\n\n\
         Revision instructions:\n\
         1. Address ALL the identified weak points\n\
         2. Remove exaggerations or back them with data\n\
         3. Clarify every concept marked as unclear\n\
         4. Fix the tone issues\n\
         5. Keep the intent and key messages of the original\n\
         6. Improve structure and flow\n\
         7. Strengthen the CTA\n\n\
         OUTPUT: provide ONLY the final revised version, without comments or explanations.",
        label = kind.label(),
        draft = draft,
        critique = critique,
    )
}
