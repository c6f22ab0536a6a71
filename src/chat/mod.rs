//! Chat/analysis boundary to the hosted text-generation provider.
//!
//! Every path out of this module succeeds from the caller's perspective:
//! when no credential is configured, or the provider call fails, the
//! deterministic fallback generators stand in for the model.

mod analysis;
mod fallback;
mod provider;

pub use analysis::synthesize_analysis;
pub use fallback::{
    fallback_response, last_user_message, FIRST_TIME_BUYER_TIPS, GENERAL_CAPABILITIES,
    PRICING_GUIDANCE,
};
pub use provider::{ChatTurn, ProviderClient, ProviderError};

/// System instruction sent with every chat request
pub const CHAT_SYSTEM_PROMPT: &str = "You are an AI real estate assistant helping a home buyer. \
     Answer questions about listings, neighborhoods, pricing, inspections, and the buying \
     process. Be concrete and practical; when a question depends on local conditions, say so. \
     Keep answers under four paragraphs.";

/// System instruction for single-property analysis requests
pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are an AI real estate assistant. Given a property listing, produce a short \
     plain-text analysis for a prospective buyer: price positioning, notable features, \
     and any caveats about age, time on market, or carrying costs.";
