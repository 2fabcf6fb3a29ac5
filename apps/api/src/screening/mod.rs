// The collect → questions → done screening flow.
// Session state lives in an explicit state machine value held per session
// id; handlers drive transitions and own persistence. All hosted-model
// calls go through `crate::inference`.

pub mod flow;
pub mod handlers;
pub mod sessions;

/// Shown with the intake form before any questions are asked.
pub const GREETING: &str = "Welcome! I collect your profile, ask a short set of \
technical questions tailored to your declared tech stack, and record your \
answers for the hiring team to review. Type 'bye', 'exit', or 'quit' at any \
point during the questions to end early.";

/// Step labels for the three stages, in order.
pub const STAGE_LABELS: [&str; 3] = [
    "Candidate Information",
    "Technical Screening",
    "Thank You & Next Steps",
];
