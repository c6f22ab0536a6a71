// Local property-analysis synthesizer
//
// Produces the analysis text block when the provider is unreachable or no
// credential is configured. The caveat thresholds mirror the product copy:
// days on market > 45, built before 1990, HOA fee over $500/month.

use crate::models::PropertyDetails;

const STALE_LISTING_DAYS: u32 = 45;
const AGING_SYSTEMS_YEAR: i32 = 1990;
const HIGH_HOA_MONTHLY: u32 = 500;

/// Synthesize a plain-text analysis block from property fields.
///
/// Deterministic: the same record always yields the same text.
pub fn synthesize_analysis(property: &PropertyDetails) -> String {
    let mut out = String::new();

    let label = property
        .address
        .as_deref()
        .unwrap_or("This property")
        .to_string();

    out.push_str(&format!(
        "{} is a {} listed at {}",
        label,
        describe_type(&property.property_type),
        format_usd(property.price),
    ));

    if property.sqft > 0 {
        let per_sqft = (property.price as f64 / property.sqft as f64).round() as u64;
        out.push_str(&format!(
            " ({} sqft, {}/sqft)",
            property.sqft,
            format_usd(per_sqft)
        ));
    }
    out.push_str(&format!(", built in {}.", property.year_built));

    if let (Some(beds), Some(baths)) = (property.bedrooms, property.bathrooms) {
        out.push_str(&format!(" It offers {} bedrooms and {} bathrooms.", beds, baths));
    }

    if !property.features.is_empty() {
        out.push_str(&format!(
            "\n\nNotable features: {}.",
            property.features.join(", ")
        ));
    }

    let mut caveats = Vec::new();

    if property.days_on_market > STALE_LISTING_DAYS {
        caveats.push(format!(
            "At {} days on market, this listing has sat longer than the typical {}-day \
             window, which often signals room to negotiate below asking.",
            property.days_on_market, STALE_LISTING_DAYS
        ));
    }

    if property.year_built < AGING_SYSTEMS_YEAR {
        caveats.push(format!(
            "Built before {}, the home's major systems (roof, wiring, plumbing, HVAC) \
             may be near the end of their service life; budget for updates and ask for \
             service records.",
            AGING_SYSTEMS_YEAR
        ));
    }

    if let Some(hoa) = property.hoa_fee {
        if hoa > HIGH_HOA_MONTHLY {
            caveats.push(format!(
                "The HOA fee of {}/month is above the {}/month level most buyers \
                 consider high; confirm what it covers and factor it into your monthly \
                 cost comparison.",
                format_usd(hoa as u64),
                format_usd(HIGH_HOA_MONTHLY as u64)
            ));
        }
    }

    if caveats.is_empty() {
        out.push_str(
            "\n\nNothing in the listing data stands out as a red flag; verify condition \
             with a full inspection before making an offer.",
        );
    } else {
        out.push_str("\n\nThings to weigh before offering:");
        for caveat in caveats {
            out.push_str("\n- ");
            out.push_str(&caveat);
        }
    }

    out
}

fn describe_type(property_type: &str) -> String {
    if property_type.trim().is_empty() {
        "home".to_string()
    } else {
        property_type.to_lowercase()
    }
}

/// Format a dollar amount with thousands separators ("$485,000")
fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    format!("${}", formatted)
}
