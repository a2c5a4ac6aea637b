// Shared prompt fragments used by more than one advisor prompt.
// Feature-specific prompts live in advisor/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts that take user-supplied facts.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Use only the facts supplied below. Do NOT invent employers, dates, degrees, \
    certifications or metrics. If something is not given, leave it out.";
