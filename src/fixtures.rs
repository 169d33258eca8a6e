//! Demo tickets and technicians.
//!
//! Used by tests and by local development runs (`data.demo_data = true`).
//! Timestamps are relative to the `now` passed in, so overdue flags and
//! "completed today" counters stay meaningful whenever the data is built.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::{Part, Technician, Ticket, TicketStatus, WorkNote};

pub fn demo_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    vec![
        Ticket {
            id: 1001,
            status: TicketStatus::New,
            priority: "high".to_string(),
            customer_name: "John Doe".to_string(),
            customer_phone: "(555) 123-4567".to_string(),
            customer_email: "john@example.com".to_string(),
            device_type: "Smartphone".to_string(),
            device_brand: "Apple".to_string(),
            device_model: "iPhone 13 Pro".to_string(),
            serial_number: "ABC123456789".to_string(),
            issue_description: "Screen is completely shattered after being dropped. \
                Touch functionality still works but glass is unsafe."
                .to_string(),
            estimated_cost: Decimal::new(15000, 2),
            assigned_to: "Mike Tech".to_string(),
            due_date: Some(now + Duration::hours(48)),
            created_at: now - Duration::hours(24),
            updated_at: now - Duration::hours(2),
            created_by: "Front Desk".to_string(),
            parts: vec![
                Part {
                    id: 1,
                    ticket_id: 1001,
                    name: "iPhone 13 Pro Screen Assembly".to_string(),
                    quantity: 1,
                    cost: Decimal::new(8999, 2),
                    added_at: now - Duration::hours(20),
                    added_by: "Mike Tech".to_string(),
                },
                Part {
                    id: 2,
                    ticket_id: 1001,
                    name: "Screen Adhesive".to_string(),
                    quantity: 1,
                    cost: Decimal::new(599, 2),
                    added_at: now - Duration::hours(20),
                    added_by: "Mike Tech".to_string(),
                },
            ],
            notes: vec![WorkNote {
                id: 1,
                ticket_id: 1001,
                content: "Customer confirmed backup was done. Safe to proceed.".to_string(),
                author: "Mike Tech".to_string(),
                timestamp: now - Duration::hours(2),
            }],
            ..Default::default()
        },
        Ticket {
            id: 1002,
            status: TicketStatus::InProgress,
            priority: "normal".to_string(),
            customer_name: "Jane Smith".to_string(),
            customer_phone: "(555) 987-6543".to_string(),
            device_type: "Laptop".to_string(),
            device_brand: "Apple".to_string(),
            device_model: "MacBook Pro 2020".to_string(),
            issue_description: "Battery not charging".to_string(),
            estimated_cost: Decimal::new(9500, 2),
            assigned_to: "Sarah Tech".to_string(),
            created_at: now - Duration::days(3),
            updated_at: now - Duration::days(1),
            created_by: "Front Desk".to_string(),
            ..Default::default()
        },
        Ticket {
            id: 1003,
            status: TicketStatus::WaitingParts,
            priority: "urgent".to_string(),
            customer_name: "Carlos Rivera".to_string(),
            customer_phone: "(555) 246-8101".to_string(),
            device_type: "Tablet".to_string(),
            device_brand: "Samsung".to_string(),
            device_model: "Galaxy Tab S8".to_string(),
            issue_description: "Charging port loose, intermittent charging".to_string(),
            estimated_cost: Decimal::new(6000, 2),
            assigned_to: "Mike Tech".to_string(),
            due_date: Some(now - Duration::hours(6)),
            created_at: now - Duration::days(5),
            updated_at: now - Duration::days(2),
            created_by: "Front Desk".to_string(),
            parts: vec![Part {
                id: 1,
                ticket_id: 1003,
                name: "USB-C Charging Port".to_string(),
                quantity: 2,
                cost: Decimal::new(1250, 2),
                added_at: now - Duration::days(2),
                added_by: "Mike Tech".to_string(),
            }],
            ..Default::default()
        },
        Ticket {
            id: 1004,
            status: TicketStatus::Completed,
            priority: "low".to_string(),
            customer_name: "Amy Chen".to_string(),
            customer_phone: "(555) 314-1592".to_string(),
            device_type: "Game Console".to_string(),
            device_brand: "Nintendo".to_string(),
            device_model: "Switch OLED".to_string(),
            issue_description: "Joy-Con drift on left stick".to_string(),
            estimated_cost: Decimal::new(4000, 2),
            assigned_to: "Sarah Tech".to_string(),
            due_date: Some(now - Duration::days(1)),
            created_at: now - Duration::days(4),
            updated_at: now,
            created_by: "Front Desk".to_string(),
            ..Default::default()
        },
    ]
}

pub fn demo_technicians() -> Vec<Technician> {
    vec![
        Technician {
            id: 1,
            name: "Mike Tech".to_string(),
            email: "mike@repairdesk.local".to_string(),
            active_jobs: 3,
            is_available: true,
        },
        Technician {
            id: 2,
            name: "Sarah Tech".to_string(),
            email: "sarah@repairdesk.local".to_string(),
            active_jobs: 2,
            is_available: true,
        },
        Technician {
            id: 3,
            name: "Bob Repair".to_string(),
            email: "bob@repairdesk.local".to_string(),
            active_jobs: 5,
            is_available: false,
        },
    ]
}
