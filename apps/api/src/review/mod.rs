// The keyword alignment and highlighting engine.
// Data flow: SourceDocument → normalize → {text, markup?} → keywords →
// highlight → session view selection. External capabilities stay behind
// ats_client and convert — no direct HTTP calls here.

pub mod document;
pub mod handlers;
pub mod highlight;
pub mod keywords;
pub mod normalize;
pub mod sections;
pub mod session;
