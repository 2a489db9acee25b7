use serde::Serialize;
use serde_json::Value;

use crate::config::ProductConfig;
use crate::demographics::view::DemographicView;

/// Loosely structured payload returned by either data source. No schema is
/// enforced; see `crate::demographics` for best-effort field extraction.
pub type DemographicRecord = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    Historical,
    Bureau,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub source: RecordSource,
    pub record: DemographicRecord,
}

/// What the operator sees for one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub source: RecordSource,
    pub view: DemographicView,
    pub summary: String,
    /// Unmodified record, for inspection.
    pub record: DemographicRecord,
}

impl From<Resolution> for SearchResponse {
    fn from(resolution: Resolution) -> Self {
        let view = DemographicView::from_record(&resolution.record);
        SearchResponse {
            source: resolution.source,
            summary: view.render_text(),
            view,
            record: resolution.record,
        }
    }
}

/// Body of the bureau decision-orchestration lookup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauLookupRequest<'a> {
    pub applicants: Applicants<'a>,
    pub product_data: ProductData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicants<'a> {
    pub primary_consumer: PrimaryConsumer<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryConsumer<'a> {
    pub personal_information: PersonalInformation<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation<'a> {
    pub tipo_documento: &'a str,
    pub numero_documento: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData<'a> {
    pub customer: &'a str,
    pub model: &'a str,
    pub configuration: &'a str,
    pub bill_to: &'a str,
    pub ship_to: &'a str,
}

/// Document type for a cédula.
pub const DOCUMENT_TYPE_CEDULA: &str = "C";

impl<'a> BureauLookupRequest<'a> {
    pub fn new(national_id: &'a str, product: &'a ProductConfig) -> Self {
        BureauLookupRequest {
            applicants: Applicants {
                primary_consumer: PrimaryConsumer {
                    personal_information: PersonalInformation {
                        tipo_documento: DOCUMENT_TYPE_CEDULA,
                        numero_documento: national_id,
                    },
                },
            },
            product_data: ProductData {
                customer: &product.customer,
                model: &product.model,
                configuration: &product.configuration,
                bill_to: &product.bill_to,
                ship_to: &product.ship_to,
            },
        }
    }
}
