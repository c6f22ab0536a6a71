// Canned fallback responses for when the provider is unavailable
//
// One pure function serves both the no-credential path and the error path,
// so the two can never drift apart. Selection is keyword matching on the
// last user message; anything unrecognized gets the capability overview.

use crate::models::MessageRole;

use super::provider::ChatTurn;

/// Buyer-tips response for first-time buyer questions
pub const FIRST_TIME_BUYER_TIPS: &str = "\
Buying your first home is a big step, and a few habits make it much less stressful.

Start with the budget, not the listing: get pre-approved before you tour anything, and \
keep your total monthly cost (mortgage, taxes, insurance, HOA) under about a third of \
your take-home pay. Pre-approval also makes your offers credible.

Never skip the inspection, even in a competitive market. A few hundred dollars up front \
routinely surfaces thousands in repairs, and every documented defect is negotiation \
leverage on price or closing credits.

Finally, buy the neighborhood as much as the house. Visit at different times of day, \
check commute times in real traffic, and look at how long nearby homes sit on the \
market. You can renovate a kitchen; you cannot renovate a location.";

/// Pricing-evaluation response for price and value questions
pub const PRICING_GUIDANCE: &str = "\
To judge whether a home is fairly priced, compare it to what has actually sold nearby, \
not to other asking prices.

Pull three to five comparable sales from the last six months: same neighborhood, \
similar square footage, similar age and condition. Divide each sale price by its \
square footage and see where this listing's price per square foot lands in that range.

Then look at the listing's history. More than 45 days on the market in an active area, \
or one or more price cuts, usually means the seller started high and is open to offers \
below asking. A home priced right typically goes under contract in its first few weeks.

If the numbers still look high, make the offer the comps support and attach them. A \
data-backed offer below asking is taken far more seriously than a round-number lowball.";

/// Generic capability overview for anything unrecognized
pub const GENERAL_CAPABILITIES: &str = "\
I'm your AI real estate assistant. Here's what I can help with:

- Evaluating whether a listing is fairly priced, using comparable sales and \
price-per-square-foot analysis.
- Walking you through a room-by-room inspection checklist and turning any defects you \
find into repair estimates and negotiation points.
- Explaining each step of the buying process: pre-approval, offers, inspection, \
appraisal, and closing.
- Breaking down the true monthly cost of a home, including taxes, insurance, and HOA \
fees.

Ask me about a specific property, a neighborhood, or any step of the process and I'll \
give you a concrete answer.";

/// Extract the content of the most recent user turn, if any
pub fn last_user_message(turns: &[ChatTurn]) -> Option<&str> {
    turns
        .iter()
        .rev()
        .find(|t| t.role == MessageRole::User)
        .map(|t| t.content.as_str())
}

/// Select the fallback response for the last user message.
///
/// Pure function; invoked from both the missing-credential and the
/// provider-failure paths.
pub fn fallback_response(last_user_message: &str) -> &'static str {
    let message = last_user_message.to_lowercase();

    if message.contains("first home") || message.contains("first-time") {
        FIRST_TIME_BUYER_TIPS
    } else if message.contains("overpriced") || message.contains("price") {
        PRICING_GUIDANCE
    } else {
        GENERAL_CAPABILITIES
    }
}
