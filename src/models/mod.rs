// Data models matching the frontend TypeScript types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status a walkthrough item can be set to.
///
/// Any status may follow any other; there is deliberately no transition
/// state machine because the user is free to re-assess an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Normal,
    Warning,
    Critical,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Normal => "normal",
            ItemStatus::Warning => "warning",
            ItemStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall risk level for a walkthrough report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// A min/max dollar range for estimated repairs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostRange {
    pub min: u32,
    pub max: u32,
}

impl CostRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// A single inspectable item within a walkthrough room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_repair_cost: Option<CostRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiation_leverage: Option<String>,
}

impl WalkthroughItem {
    /// Create a fresh checklist item in the pending state
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: ItemStatus::Pending,
            notes: None,
            estimated_repair_cost: None,
            negotiation_leverage: None,
        }
    }
}

/// A room in the walkthrough checklist, owning its items exclusively
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughRoom {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub items: Vec<WalkthroughItem>,
    pub completed: bool,
}

impl WalkthroughRoom {
    pub fn new(id: &str, name: &str, icon: &str, items: Vec<WalkthroughItem>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            items,
            completed: false,
        }
    }
}

/// Derived report for a walkthrough session.
///
/// Computed on demand from the current room/item collection and never
/// persisted, so it cannot drift from the items it summarizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughReport {
    pub overall_risk: RiskLevel,
    pub total_estimated_repairs: CostRange,
}

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message in a chat transcript (append-only within a session)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A property record as submitted for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub property_type: String,
    pub price: u64,
    pub sqft: u32,
    pub year_built: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f32>,
    pub days_on_market: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoa_fee: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}
