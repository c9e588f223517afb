//! The ezyVet resource table.
//!
//! Each row binds a CLI name to a list endpoint. The [`Resource`] enum and
//! one accessor method per resource on [`EzyVetClient`] are generated from
//! the same table, so adding an endpoint is a one-line change.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

use crate::client::{ApiError, EzyVetClient, PageLimit};
use crate::filter::Filter;

#[derive(Debug, thiserror::Error)]
#[error("unknown resource {0:?}, run `ezyvet resources` for the full list")]
pub struct UnknownResource(pub String);

macro_rules! resources {
    ($( $variant:ident => $accessor:ident, $name:literal, $path:literal, filter: $filterable:literal, $about:literal; )+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
        pub enum Resource {
            $( $variant, )+
        }

        impl Resource {
            /// Name used on the command line
            pub fn name(&self) -> &'static str {
                match self {
                    $( Resource::$variant => $name, )+
                }
            }

            /// Endpoint path relative to the API base URL
            pub fn path(&self) -> &'static str {
                match self {
                    $( Resource::$variant => $path, )+
                }
            }

            /// Whether the endpoint takes query filters
            pub fn accepts_filter(&self) -> bool {
                match self {
                    $( Resource::$variant => $filterable, )+
                }
            }

            pub fn about(&self) -> &'static str {
                match self {
                    $( Resource::$variant => $about, )+
                }
            }
        }

        impl EzyVetClient {
            $(
                #[doc = concat!($about, " (`", $path, "`).")]
                pub async fn $accessor(
                    &self,
                    filter: Option<&Filter>,
                    limit: PageLimit,
                ) -> Result<Vec<Value>, ApiError> {
                    self.list(Resource::$variant, filter, limit).await
                }
            )+
        }
    };
}

resources! {
    Address => addresses, "address", "/address", filter: true, "Fetch address(es)";
    Animal => animals, "animal", "/animal", filter: true, "Fetch animal(s)";
    AnimalColour => animal_colours, "animal-colour", "/animalcolour", filter: true, "Fetch animal colour(s)";
    Appointment => appointments, "appointment", "/appointment", filter: true, "Fetch appointment(s)";
    AppointmentStatus => appointment_statuses, "appointment-status", "/appointmentstatus", filter: false, "Fetch appointment status(es)";
    AppointmentType => appointment_types, "appointment-type", "/appointmenttype", filter: false, "Fetch appointment type(s)";
    Assessment => assessments, "assessment", "/assessment", filter: true, "Fetch assessment(s)";
    Attachment => attachments, "attachment", "/attachment", filter: true, "Fetch attachment(s)";
    Breed => breeds, "breed", "/breed", filter: true, "Fetch breed(s)";
    Communication => communications, "communication", "/communication", filter: true, "Fetch communication(s)";
    Consult => consults, "consult", "/consult", filter: true, "Fetch consult(s)";
    Contact => contacts, "contact", "/contact", filter: true, "Fetch contact(s)";
    ContactDetail => contact_details, "contact-detail", "/contactdetail", filter: true, "Fetch contact detail(s)";
    ContactDetailType => contact_detail_types, "contact-detail-type", "/contactdetailtype", filter: false, "Fetch contact detail type(s)";
    Country => countries, "country", "/country", filter: true, "Fetch country(ies)";
    Diagnostic => diagnostics, "diagnostic", "/diagnostic", filter: true, "Fetch diagnostic(s)";
    DiagnosticResult => diagnostic_results, "diagnostic-result", "/diagnosticresult", filter: true, "Fetch diagnostic result(s)";
    DiagnosticResultItem => diagnostic_result_items, "diagnostic-result-item", "/diagnosticresultitem", filter: true, "Fetch diagnostic result item(s)";
    DiagnosticRequest => diagnostic_requests, "diagnostic-request", "/diagnosticrequest", filter: true, "Fetch diagnostic request(s)";
    DiagnosticRequestItem => diagnostic_request_items, "diagnostic-request-item", "/diagnosticrequestitem", filter: true, "Fetch diagnostic request item(s)";
    File => files, "file", "/file", filter: true, "Fetch file(s)";
    IntegratedDiagnostic => integrated_diagnostics, "integrated-diagnostic", "/integrateddiagnostic", filter: true, "Fetch integrated diagnostic(s)";
    HealthStatus => health_statuses, "health-status", "/healthstatus", filter: true, "Fetch health status(es)";
    History => histories, "history", "/history", filter: true, "Fetch histories";
    Invoice => invoices, "invoice", "/invoice", filter: true, "Fetch invoice(s)";
    InvoiceLine => invoice_lines, "invoice-line", "/invoiceline", filter: true, "Fetch invoice line(s)";
    Operation => operations, "operation", "/operation", filter: true, "Fetch operation(s)";
    Payment => payments, "payment", "/payment", filter: true, "Fetch payment(s)";
    PaymentMethod => payment_methods, "payment-method", "/paymentmethod", filter: true, "Fetch payment method(s)";
    PhysicalExam => physical_exams, "physical-exam", "/physicalexam", filter: true, "Fetch physical exam(s)";
    Plan => plans, "plan", "/plan", filter: true, "Fetch plan(s)";
    Prescription => prescriptions, "prescription", "/prescription", filter: true, "Fetch prescription(s)";
    PrescriptionItem => prescription_items, "prescription-item", "/prescriptionitem", filter: true, "Fetch prescription item(s)";
    PresentingProblem => presenting_problems, "presenting-problem", "/presentingproblem", filter: true, "Fetch presenting problem(s)";
    PresentingProblemLink => presenting_problem_links, "presenting-problem-link", "/presentingproblemlink", filter: true, "Fetch presenting problem link(s) to consults";
    Product => products, "product", "/product", filter: true, "Fetch product(s)";
    ProductGroup => product_groups, "product-group", "/productgroup", filter: true, "Fetch product group(s)";
    PurchaseOrder => purchase_orders, "purchase-order", "/purchaseorder", filter: true, "Fetch purchase order(s)";
    PurchaseOrderItem => purchase_order_items, "purchase-order-item", "/purchaseorderitem", filter: true, "Fetch purchase order item(s)";
    ReceiveInvoice => receive_invoices, "receive-invoice", "/receiveinvoice", filter: true, "Fetch receive invoice(s)";
    ReceiveInvoiceItem => receive_invoice_items, "receive-invoice-item", "/receiveinvoiceitem", filter: true, "Fetch receive invoice item(s)";
    BookingResource => resources, "resource", "/resource", filter: true, "Fetch resource(s)";
    Separation => separations, "separation", "/separation", filter: true, "Fetch separation(s)";
    Sex => sexes, "sex", "/sex", filter: true, "Fetch sex(es)";
    Species => species, "species", "/species", filter: true, "Fetch species";
    Tag => tags, "tag", "/tag", filter: true, "Fetch tag(s)";
    TagCategory => tag_categories, "tag-category", "/tagcategory", filter: true, "Fetch tag category(ies)";
    Therapeutic => therapeutics, "therapeutic", "/therapeutic", filter: true, "Fetch therapeutic(s)";
    SystemSetting => system_settings, "system-setting", "/systemsetting", filter: false, "Fetch system settings";
    User => users, "user", "/user", filter: true, "Fetch user(s)";
    Vaccination => vaccinations, "vaccination", "/vaccination", filter: true, "Fetch vaccination(s)";
    WebhookEvent => webhook_events, "webhook-event", "/webhookevents", filter: true, "Fetch webhook event(s)";
    Webhook => webhooks, "webhook", "/webhooks", filter: true, "Fetch webhook(s)";
}

impl Resource {
    pub fn all() -> impl Iterator<Item = Resource> {
        Resource::iter()
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::all()
            .find(|resource| resource.name() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

/// One row of the resource table, as printed by `ezyvet resources`
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescription {
    pub name: &'static str,
    pub path: &'static str,
    pub filter: bool,
    pub description: &'static str,
}

impl From<Resource> for ResourceDescription {
    fn from(resource: Resource) -> Self {
        Self {
            name: resource.name(),
            path: resource.path(),
            filter: resource.accepts_filter(),
            description: resource.about(),
        }
    }
}
