//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the
//! corresponding `*_statuses` table and the constants in `studiodesk_core`.

use studiodesk_core::{leads, payment_link, project_lifecycle, review, tickets};

pub use studiodesk_core::types::StatusId;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Lead triage status.
    LeadStatus {
        New = leads::status::NEW,
        Contacted = leads::status::CONTACTED,
        Consulting = leads::status::CONSULTING,
        Quoted = leads::status::QUOTED,
        Converted = leads::status::CONVERTED,
        Lost = leads::status::LOST,
    }
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        Pending = project_lifecycle::status::PENDING,
        Active = project_lifecycle::status::ACTIVE,
        OnHold = project_lifecycle::status::ON_HOLD,
        Completed = project_lifecycle::status::COMPLETED,
        Cancelled = project_lifecycle::status::CANCELLED,
    }
}

define_status_enum! {
    /// Payment link status.
    PaymentRequestStatus {
        Pending = payment_link::status::PENDING,
        Paid = payment_link::status::PAID,
        Cancelled = payment_link::status::CANCELLED,
    }
}

define_status_enum! {
    /// Recorded payment status.
    PaymentStatus {
        Pending = 1,
        Completed = 2,
        Refunded = 3,
        Failed = 4,
    }
}

define_status_enum! {
    /// Review status shared by hold and vacation requests.
    RequestStatus {
        Pending = review::status::PENDING,
        Approved = review::status::APPROVED,
        Rejected = review::status::REJECTED,
        Cancelled = review::status::CANCELLED,
    }
}

define_status_enum! {
    /// Support ticket status.
    TicketStatus {
        Open = tickets::status::OPEN,
        InProgress = tickets::status::IN_PROGRESS,
        Resolved = tickets::status::RESOLVED,
        Closed = tickets::status::CLOSED,
    }
}
