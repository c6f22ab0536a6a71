// Checklist generation conditioned on property attributes
//
// The generator starts from a fixed base set of rooms and appends regional
// and age-specific checks. Free-text inputs (listing location and property
// type) are normalized once into typed values here so downstream decisions
// read flags and match on enums rather than scattered substring tests.

use chrono::{Datelike, Utc};

use crate::models::{WalkthroughItem, WalkthroughRoom};

/// Property age (in years) beyond which wiring-era checks are added
const AGING_WIRING_THRESHOLD_YEARS: i32 = 30;

/// Regional construction traits recognized from a free-text listing location.
///
/// The two traits are independent predicates, not alternatives: a location
/// like "moved from Ohio to Austin, TX" carries both, and the checklist gets
/// the basement room as well as the slab checks. Matching is intentionally
/// forgiving: unknown locations simply produce the base checklist, never an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionTraits {
    /// Mentions a midwestern state, where basements are standard construction
    pub midwest: bool,
    /// Mentions Texas, where slab foundations and soil movement dominate
    pub texas: bool,
}

impl RegionTraits {
    const MIDWEST_STATES: &'static [&'static str] = &[
        "ohio",
        "michigan",
        "indiana",
        "illinois",
        "wisconsin",
        "minnesota",
        "iowa",
        "missouri",
        "kansas",
        "nebraska",
        "north dakota",
        "south dakota",
    ];

    /// Parse a free-text city/state string, case-insensitively
    pub fn parse(location: &str) -> Self {
        let normalized = location.to_lowercase();
        Self {
            midwest: Self::MIDWEST_STATES
                .iter()
                .any(|state| normalized.contains(state)),
            texas: normalized.contains("texas") || normalized.contains("tx"),
        }
    }
}

/// Property kind recognized from a free-text property type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Detached single-family house (gets an attic inspection)
    House,
    /// Condos, townhomes, and anything unrecognized
    Other,
}

impl PropertyKind {
    /// Parse a free-text property type, case-insensitively
    pub fn parse(property_type: &str) -> Self {
        let normalized = property_type.to_lowercase();
        if normalized.contains("house") || normalized.contains("single") {
            PropertyKind::House
        } else {
            PropertyKind::Other
        }
    }
}

/// Generate the walkthrough checklist for a property.
///
/// All rooms come back with `completed = false` and every item `Pending`.
pub fn generate_checklist(property_type: &str, year_built: i32, location: &str) -> Vec<WalkthroughRoom> {
    generate_checklist_for_year(property_type, year_built, location, Utc::now().year())
}

/// Checklist generation with an explicit "current year", so age-based rules
/// are testable without depending on the wall clock.
pub fn generate_checklist_for_year(
    property_type: &str,
    year_built: i32,
    location: &str,
    current_year: i32,
) -> Vec<WalkthroughRoom> {
    let region = RegionTraits::parse(location);
    let kind = PropertyKind::parse(property_type);
    let aging_wiring = current_year - year_built > AGING_WIRING_THRESHOLD_YEARS;

    let mut rooms = vec![
        exterior_room(region),
        kitchen_room(),
        bathrooms_room(),
        bedrooms_room(),
        electrical_room(aging_wiring),
        plumbing_room(),
        hvac_room(),
    ];

    if region.midwest {
        rooms.push(basement_room());
    }

    match kind {
        PropertyKind::House => rooms.push(attic_room()),
        PropertyKind::Other => {}
    }

    rooms
}

fn exterior_room(region: RegionTraits) -> WalkthroughRoom {
    let mut items = vec![
        WalkthroughItem::new(
            "roof-condition",
            "Roof condition",
            "Look for missing, curling, or discolored shingles and sagging ridgelines",
        ),
        WalkthroughItem::new(
            "foundation-visible",
            "Visible foundation",
            "Walk the perimeter and note cracks wider than 1/4 inch or horizontal cracking",
        ),
        WalkthroughItem::new(
            "siding-condition",
            "Siding and trim",
            "Check for rot, warping, peeling paint, and gaps at joints",
        ),
        WalkthroughItem::new(
            "gutters-drainage",
            "Gutters and drainage",
            "Confirm gutters are attached and downspouts direct water away from the foundation",
        ),
        WalkthroughItem::new(
            "windows-exterior",
            "Window exteriors",
            "Inspect seals, caulking, and signs of fogging between panes",
        ),
    ];

    // Expansive clay soil makes slab movement the headline risk in Texas
    if region.texas {
        items.push(WalkthroughItem::new(
            "foundation-slab-cracking",
            "Slab foundation cracking",
            "Check slab edges and interior floors for cracks from soil movement",
        ));
        items.push(WalkthroughItem::new(
            "exterior-door-alignment",
            "Door alignment",
            "Sticking or misaligned exterior doors can indicate foundation shift",
        ));
    }

    WalkthroughRoom::new("exterior", "Exterior", "home", items)
}

fn kitchen_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "kitchen",
        "Kitchen",
        "utensils",
        vec![
            WalkthroughItem::new(
                "kitchen-appliances",
                "Appliances",
                "Run each appliance; note age, condition, and which convey with the sale",
            ),
            WalkthroughItem::new(
                "kitchen-sink-plumbing",
                "Sink and plumbing",
                "Check under-sink for leaks, corrosion, and water staining",
            ),
            WalkthroughItem::new(
                "kitchen-cabinets",
                "Cabinets and drawers",
                "Open and close everything; look for water damage under the sink run",
            ),
            WalkthroughItem::new(
                "kitchen-counters",
                "Countertops",
                "Note burns, cracks, and separation from the wall",
            ),
        ],
    )
}

fn bathrooms_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "bathrooms",
        "Bathrooms",
        "droplet",
        vec![
            WalkthroughItem::new(
                "bathroom-toilet",
                "Toilets",
                "Flush each toilet; check for rocking bases and slow refills",
            ),
            WalkthroughItem::new(
                "bathroom-shower-tub",
                "Shower and tub",
                "Look for cracked grout, soft walls around enclosures, and drainage speed",
            ),
            WalkthroughItem::new(
                "bathroom-ventilation",
                "Ventilation",
                "Confirm exhaust fans work and vent outside, not into the attic",
            ),
            WalkthroughItem::new(
                "bathroom-water-pressure",
                "Water pressure",
                "Run sinks and shower together and watch for pressure drop",
            ),
        ],
    )
}

fn bedrooms_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "bedrooms",
        "Bedrooms",
        "bed",
        vec![
            WalkthroughItem::new(
                "bedroom-windows",
                "Windows",
                "Open every window; bedrooms need a working egress window",
            ),
            WalkthroughItem::new(
                "bedroom-flooring",
                "Flooring",
                "Note soft spots, squeaks, and sloping toward exterior walls",
            ),
            WalkthroughItem::new(
                "bedroom-closets",
                "Closets and doors",
                "Check door alignment and interior wall condition",
            ),
        ],
    )
}

fn electrical_room(aging_wiring: bool) -> WalkthroughRoom {
    let mut items = vec![
        WalkthroughItem::new(
            "electrical-panel",
            "Electrical panel",
            "Note the panel brand, amperage, and any double-tapped breakers or scorching",
        ),
        WalkthroughItem::new(
            "electrical-outlets",
            "Outlets and GFCI",
            "Test outlets near water for GFCI protection; note two-prong outlets",
        ),
        WalkthroughItem::new(
            "electrical-lighting",
            "Lighting and switches",
            "Flip every switch; flickering can indicate loose neutrals",
        ),
    ];

    if aging_wiring {
        items.push(WalkthroughItem::new(
            "electrical-knob-and-tube",
            "Knob-and-tube wiring",
            "Homes of this age may retain original wiring; check exposed runs in attic and basement",
        ));
    }

    WalkthroughRoom::new("electrical", "Electrical", "zap", items)
}

fn plumbing_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "plumbing",
        "Plumbing",
        "wrench",
        vec![
            WalkthroughItem::new(
                "water-heater",
                "Water heater",
                "Check the manufacture date, rust at fittings, and pooling underneath",
            ),
            WalkthroughItem::new(
                "plumbing-supply-lines",
                "Supply lines",
                "Identify pipe material (copper, PEX, galvanized, polybutylene)",
            ),
            WalkthroughItem::new(
                "plumbing-drains",
                "Drains",
                "Fill and drain sinks; gurgling suggests venting problems",
            ),
        ],
    )
}

fn hvac_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "hvac",
        "HVAC",
        "thermometer",
        vec![
            WalkthroughItem::new(
                "hvac-furnace",
                "Furnace",
                "Note age and service stickers; listen for short cycling",
            ),
            WalkthroughItem::new(
                "hvac-ac-unit",
                "AC unit",
                "Check the condenser age and whether it cools within a few minutes",
            ),
            WalkthroughItem::new(
                "hvac-ductwork",
                "Ductwork",
                "Look for disconnected or crushed ducts in accessible spaces",
            ),
            WalkthroughItem::new(
                "hvac-filters",
                "Filters and registers",
                "Dirty filters and uneven airflow hint at deferred maintenance",
            ),
        ],
    )
}

fn basement_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "basement",
        "Basement",
        "layers",
        vec![
            WalkthroughItem::new(
                "basement-moisture",
                "Moisture and efflorescence",
                "White mineral deposits and musty smells indicate chronic water intrusion",
            ),
            WalkthroughItem::new(
                "basement-sump-pump",
                "Sump pump",
                "Lift the float to confirm the pump runs and discharges outside",
            ),
            WalkthroughItem::new(
                "basement-walls",
                "Foundation walls",
                "Horizontal cracks or bowing walls are structural red flags",
            ),
        ],
    )
}

fn attic_room() -> WalkthroughRoom {
    WalkthroughRoom::new(
        "attic",
        "Attic",
        "triangle",
        vec![
            WalkthroughItem::new(
                "attic-insulation",
                "Insulation depth",
                "Measure insulation depth and coverage consistency",
            ),
            WalkthroughItem::new(
                "attic-ventilation",
                "Ventilation",
                "Blocked soffit vents cook shingles from below",
            ),
            WalkthroughItem::new(
                "attic-roof-underside",
                "Roof deck underside",
                "Dark staining on sheathing means past or active leaks",
            ),
        ],
    )
}
