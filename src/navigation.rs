use crate::model::{Appointment, Client, Documentation};

/// The views a caseworker moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Clients,
    Appointments,
    Documentations,
    Files,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Clients => "clients",
            View::Appointments => "appointments",
            View::Documentations => "documentations",
            View::Files => "files",
        }
    }
}

/// The minimal payload a destination view needs to self-initialize: the
/// client's case number plus, where the source record carries them, the
/// display name pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub case_number: String,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
}

impl ViewContext {
    pub fn from_case_number(case_number: impl Into<String>) -> Self {
        Self {
            case_number: case_number.into(),
            ..Self::default()
        }
    }

    pub fn from_parts(
        case_number: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            case_number: case_number.into(),
            last_name: Some(last_name.into()),
            first_name: Some(first_name.into()),
        }
    }

    pub fn for_client(client: &Client) -> Self {
        Self::from_parts(
            client.case_number.clone(),
            client.last_name.clone(),
            client.first_name.clone(),
        )
    }

    /// Uses the appointment's denormalized name pair; `None` stays `None`
    /// when the owning client is gone.
    pub fn for_appointment(appointment: &Appointment) -> Self {
        Self {
            case_number: appointment.case_number.clone(),
            last_name: appointment.client_last_name.clone(),
            first_name: appointment.client_first_name.clone(),
        }
    }

    pub fn for_documentation(documentation: &Documentation) -> Self {
        Self::from_case_number(documentation.case_number.clone())
    }
}

/// Routing glue between views. The navigator resolves an entity reference
/// down to a [`ViewContext`] and forwards it through the injected
/// "configure the next view" callback; it never touches the store.
pub struct Navigator {
    configure: Box<dyn Fn(View, Option<&ViewContext>) + Send + Sync>,
}

impl Navigator {
    pub fn new(configure: impl Fn(View, Option<&ViewContext>) + Send + Sync + 'static) -> Self {
        Self {
            configure: Box::new(configure),
        }
    }

    /// Open a view with no client scope (e.g. the home screen).
    pub fn open(&self, view: View) {
        tracing::info!(target: "casefile", event = "navigate", view = %view.name());
        (self.configure)(view, None);
    }

    /// Open a view scoped to a client context.
    pub fn open_with_context(&self, view: View, context: ViewContext) {
        tracing::info!(
            target: "casefile",
            event = "navigate",
            view = %view.name(),
            case_number = %context.case_number
        );
        (self.configure)(view, Some(&context));
    }

    pub fn open_client_detail(&self, client: &Client) {
        self.open_with_context(View::Clients, ViewContext::for_client(client));
    }

    pub fn open_appointments_for(&self, appointment: &Appointment) {
        self.open_with_context(View::Appointments, ViewContext::for_appointment(appointment));
    }

    pub fn open_appointments_for_parts(
        &self,
        case_number: impl Into<String>,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
    ) {
        self.open_with_context(
            View::Appointments,
            ViewContext::from_parts(case_number, last_name, first_name),
        );
    }

    pub fn open_documentations_for(&self, documentation: &Documentation) {
        self.open_with_context(
            View::Documentations,
            ViewContext::for_documentation(documentation),
        );
    }

    pub fn open_documentations_for_client(&self, case_number: impl Into<String>) {
        self.open_with_context(
            View::Documentations,
            ViewContext::from_case_number(case_number),
        );
    }

    pub fn open_files_for_client(&self, case_number: impl Into<String>) {
        self.open_with_context(View::Files, ViewContext::from_case_number(case_number));
    }
}
