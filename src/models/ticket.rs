//! Ticket model and derived display/business rules

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, NoneAsEmptyString};
use validator::{Validate, ValidationError};

/// Badge class used for any status code outside the known set
pub const DEFAULT_STATUS_CLASS: &str = "bg-gray-100 text-gray-800";

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Repair ticket lifecycle status.
///
/// Unknown codes are kept verbatim in [`TicketStatus::Other`] instead of
/// being rejected, so data written by a newer client still renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    WaitingParts,
    Ready,
    Completed,
    Other(String),
}

impl TicketStatus {
    /// Known statuses in workflow order
    pub const KNOWN: [TicketStatus; 5] = [
        TicketStatus::New,
        TicketStatus::InProgress,
        TicketStatus::WaitingParts,
        TicketStatus::Ready,
        TicketStatus::Completed,
    ];

    /// Status code as stored and submitted by forms
    pub fn code(&self) -> &str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::WaitingParts => "waiting_parts",
            TicketStatus::Ready => "ready",
            TicketStatus::Completed => "completed",
            TicketStatus::Other(code) => code,
        }
    }

    /// Human-readable label; unknown codes pass through unchanged
    pub fn label(&self) -> &str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::WaitingParts => "Waiting for Parts",
            TicketStatus::Ready => "Ready for Pickup",
            TicketStatus::Completed => "Completed",
            TicketStatus::Other(code) => code,
        }
    }

    /// Tailwind classes for the status badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            TicketStatus::New => "bg-blue-100 text-blue-800",
            TicketStatus::InProgress => "bg-yellow-100 text-yellow-800",
            TicketStatus::WaitingParts => "bg-orange-100 text-orange-800",
            TicketStatus::Ready => "bg-green-100 text-green-800",
            TicketStatus::Completed => "bg-gray-100 text-gray-800",
            TicketStatus::Other(_) => DEFAULT_STATUS_CLASS,
        }
    }
}

impl From<&str> for TicketStatus {
    fn from(code: &str) -> Self {
        match code {
            "new" => TicketStatus::New,
            "in_progress" => TicketStatus::InProgress,
            "waiting_parts" => TicketStatus::WaitingParts,
            "ready" => TicketStatus::Ready,
            "completed" => TicketStatus::Completed,
            other => TicketStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TicketStatus {
    fn from(code: String) -> Self {
        TicketStatus::from(code.as_str())
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for TicketStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(TicketStatus::from)
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A repair job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i32,
    pub status: TicketStatus,
    /// low, normal, high, urgent (by convention only)
    pub priority: String,

    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,

    pub device_type: String,
    pub device_brand: String,
    pub device_model: String,
    pub serial_number: String,

    pub issue_description: String,
    pub internal_notes: String,
    /// Estimated labor, excluding parts
    pub estimated_cost: Decimal,

    pub assigned_to: String,
    pub due_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,

    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub notes: Vec<WorkNote>,
}

impl Ticket {
    pub fn status_display(&self) -> &str {
        self.status.label()
    }

    pub fn status_class(&self) -> &'static str {
        self.status.badge_class()
    }

    /// Sum of `quantity * cost` over the attached parts, saturating at
    /// the bounds of `Decimal`
    pub fn total_parts_cost(&self) -> Decimal {
        self.parts
            .iter()
            .map(Part::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Estimated labor plus parts
    pub fn total_cost(&self) -> Decimal {
        self.estimated_cost.saturating_add(self.total_parts_cost())
    }

    /// A ticket is overdue once `now` is strictly past its due date,
    /// unless it has been completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) if self.status != TicketStatus::Completed => now > due,
            _ => false,
        }
    }

    /// Next free part id within this ticket
    pub fn next_part_id(&self) -> i32 {
        self.parts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    /// Build the template projection of this ticket as seen at `now`
    pub fn view(&self, now: DateTime<Utc>) -> TicketView<'_> {
        TicketView {
            ticket: self,
            status_label: self.status_display(),
            status_class: self.status_class(),
            total_parts_cost: self.total_parts_cost(),
            total_cost: self.total_cost(),
            is_overdue: self.is_overdue(now),
        }
    }
}

/// Ticket with its derived values attached, for rendering
#[derive(Debug, Serialize)]
pub struct TicketView<'a> {
    #[serde(flatten)]
    pub ticket: &'a Ticket,
    pub status_label: &'a str,
    pub status_class: &'static str,
    pub total_parts_cost: Decimal,
    pub total_cost: Decimal,
    pub is_overdue: bool,
}

// ---------------------------------------------------------------------------
// Part / WorkNote
// ---------------------------------------------------------------------------

/// Replacement part or material used in a repair
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    pub id: i32,
    pub ticket_id: i32,
    pub name: String,
    pub quantity: u32,
    /// Unit cost
    pub cost: Decimal,
    pub added_at: DateTime<Utc>,
    pub added_by: String,
}

impl Part {
    pub fn line_total(&self) -> Decimal {
        self.cost.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Work log entry on a ticket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkNote {
    pub id: i32,
    pub ticket_id: i32,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Form submissions
// ---------------------------------------------------------------------------

/// Create/update ticket form
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_ticket_form"))]
pub struct TicketForm {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub device_brand: String,
    #[serde(default)]
    pub device_model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub issue_description: String,
    #[serde(default)]
    pub internal_notes: String,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub estimated_cost: Option<Decimal>,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    pub due_date: Option<NaiveDate>,
}

impl TicketForm {
    /// Submitted status, `new` when the field was left blank
    pub fn status(&self) -> TicketStatus {
        if self.status.is_empty() {
            TicketStatus::New
        } else {
            TicketStatus::from(self.status.as_str())
        }
    }
}

/// Query parameters of the ticket list and search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub search: String,
}

impl TicketQuery {
    pub fn status(&self) -> Option<TicketStatus> {
        let status = self.status.trim();
        (!status.is_empty()).then(|| TicketStatus::from(status))
    }

    pub fn search(&self) -> Option<&str> {
        let search = self.search.trim();
        (!search.is_empty()).then_some(search)
    }
}

/// Status change submitted from the ticket view
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Part added from the ticket view
#[derive(Debug, Deserialize, Validate)]
pub struct PartForm {
    pub part_name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(custom(function = "non_negative"))]
    pub cost: Decimal,
}

/// Work note added from the ticket view
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub note: String,
}

fn validate_ticket_form(form: &TicketForm) -> Result<(), ValidationError> {
    match &form.estimated_cost {
        Some(cost) => non_negative(cost),
        None => Ok(()),
    }
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Amount must not be negative".into());
        return Err(error);
    }
    Ok(())
}
