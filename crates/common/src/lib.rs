use serde::{Deserialize, Serialize};

pub mod slots;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Vet,
    Groomer,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Vet => "vet",
            Role::Groomer => "groomer",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "client" => Some(Role::Client),
            "vet" => Some(Role::Vet),
            "groomer" => Some(Role::Groomer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Vets and groomers share the staff appointment views; admin sees all.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Vet | Role::Groomer | Role::Admin)
    }
}

/// Appointment lifecycle. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::PendingPayment => "Pending Payment",
            AppointmentStatus::PendingApproval => "Pending Approval",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<AppointmentStatus> {
        match s {
            "Pending Payment" => Some(AppointmentStatus::PendingPayment),
            "Pending Approval" => Some(AppointmentStatus::PendingApproval),
            "Confirmed" => Some(AppointmentStatus::Confirmed),
            "Completed" => Some(AppointmentStatus::Completed),
            "Cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Staff transition guard. Confirm only out of the two pending states,
    /// Complete only out of Confirmed, Cancel out of any non-terminal state.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        match next {
            AppointmentStatus::Confirmed => matches!(
                self,
                AppointmentStatus::PendingPayment | AppointmentStatus::PendingApproval
            ),
            AppointmentStatus::Completed => matches!(self, AppointmentStatus::Confirmed),
            AppointmentStatus::Cancelled => !self.is_terminal(),
            AppointmentStatus::PendingPayment | AppointmentStatus::PendingApproval => false,
        }
    }

    /// Clients may only cancel or reschedule before staff has confirmed.
    pub fn client_can_cancel(&self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Confirmed | AppointmentStatus::Completed
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    #[serde(rename = "paid")]
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PendingApproval => "Pending Approval",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> Option<PaymentStatus> {
        match s {
            "Pending Approval" => Some(PaymentStatus::PendingApproval),
            "paid" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

/// A bookable clinic service with its reservation price in pesos.
#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub name: &'static str,
    pub price: i64,
    pub description: &'static str,
}

pub const SERVICES: &[Service] = &[
    Service {
        name: "Check-up",
        price: 500,
        description: "Comprehensive health examination for your pet.",
    },
    Service {
        name: "Vaccinations",
        price: 800,
        description: "Essential vaccinations to protect your pet.",
    },
    Service {
        name: "Grooming",
        price: 700,
        description: "Full grooming service including bath and haircut.",
    },
    Service {
        name: "Spay",
        price: 2500,
        description: "Spay procedure with post-operative care.",
    },
    Service {
        name: "Neuter",
        price: 2000,
        description: "Neuter procedure with post-operative care.",
    },
    Service {
        name: "Ultrasound",
        price: 1500,
        description: "Non-invasive diagnostic imaging.",
    },
    Service {
        name: "Deworm",
        price: 300,
        description: "Deworming treatment.",
    },
];

pub fn find_service(name: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.name == name)
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error")]
    Internal,
}

pub type AppResult<T> = Result<T, AppError>;
