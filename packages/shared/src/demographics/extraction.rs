//! Best-effort field lookup over records whose shape depends on the source.
//!
//! Every logical field is described by an ordered list of [`Rule`]s. The first
//! rule that yields a displayable value wins, so supporting a new upstream
//! shape means adding a rule, not a branch.

use serde::Serialize;
use serde_json::Value;

/// Locations of the demographic sub-record, highest priority first.
pub const DEMOGRAPHIC_INFO_PATHS: &[&str] = &[
    "/informacion_demografica",
    "/información_demografica",
    "/decisionOrchestration/result/informacion_demografica",
    "/decisionOrchestration/result/información_demografica",
    "/reporteCrediticio/informacion_demografica",
    "/reporteCrediticio/información_demografica",
];

/// Locations of the bureau application block.
pub const APPLICATION_PATHS: &[&str] = &[
    "/decisionOrchestration/application",
    "/decisionOrchestration/result/application",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BirthDate,
    Education,
    Province,
    Canton,
    Addresses,
    CoordinateX,
    CoordinateY,
    HomePhone,
    MobilePhone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Key of the demographic sub-record.
    Demographic(&'static str),
    /// Key of the bureau consumer's `personalInformation`.
    PersonalInfo(&'static str),
    /// Key of the bureau consumer's first address.
    FirstAddress(&'static str),
    /// `number` of the first contact whose `contactType` is listed.
    Contact(&'static [&'static str]),
}

pub struct FieldRules {
    pub field: Field,
    pub label: &'static str,
    pub rules: &'static [Rule],
}

pub const FIELD_RULES: &[FieldRules] = &[
    FieldRules {
        field: Field::BirthDate,
        label: "Fecha Nacimiento",
        rules: &[
            Rule::Demographic("fecha_nacimiento"),
            Rule::PersonalInfo("fechaNacimiento"),
            Rule::PersonalInfo("FechaNacimiento"),
        ],
    },
    FieldRules {
        field: Field::Education,
        label: "Educación",
        rules: &[
            Rule::Demographic("educacion"),
            Rule::PersonalInfo("nivelEstudio"),
            Rule::PersonalInfo("NivelEstudio"),
            Rule::PersonalInfo("educationLevel"),
        ],
    },
    FieldRules {
        field: Field::Province,
        label: "Provincia",
        rules: &[
            Rule::Demographic("provincia"),
            Rule::FirstAddress("state"),
            Rule::FirstAddress("provincia"),
        ],
    },
    FieldRules {
        field: Field::Canton,
        label: "Cantón",
        rules: &[
            Rule::Demographic("canton"),
            Rule::FirstAddress("city"),
            Rule::FirstAddress("canton"),
        ],
    },
    FieldRules {
        field: Field::Addresses,
        label: "Direcciones",
        rules: &[
            Rule::Demographic("direcciones"),
            Rule::FirstAddress("addressLine1"),
            Rule::FirstAddress("callePrincipal"),
        ],
    },
    FieldRules {
        field: Field::CoordinateX,
        label: "Coordenada X",
        rules: &[
            Rule::Demographic("coordenada_x"),
            Rule::FirstAddress("latitude"),
        ],
    },
    FieldRules {
        field: Field::CoordinateY,
        label: "Coordenada Y",
        rules: &[
            Rule::Demographic("coordenada_y"),
            Rule::FirstAddress("longitude"),
        ],
    },
    FieldRules {
        field: Field::HomePhone,
        label: "Teléfono Convencional",
        rules: &[
            Rule::Demographic("numero_telefonico_convencional"),
            Rule::Contact(&["HomePhone", "Domicilio"]),
        ],
    },
    FieldRules {
        field: Field::MobilePhone,
        label: "Teléfono Celular",
        rules: &[
            Rule::Demographic("numero_telefonico_celular"),
            Rule::Contact(&["MobilePhone", "Celular"]),
        ],
    },
];

/// First non-empty demographic sub-record; arrays yield their first element.
pub fn demographic_info(record: &Value) -> Option<&Value> {
    DEMOGRAPHIC_INFO_PATHS
        .iter()
        .filter_map(|path| record.pointer(path))
        .find_map(|candidate| match candidate {
            Value::Array(items) => items.first(),
            Value::Object(map) if !map.is_empty() => Some(candidate),
            _ => None,
        })
}

fn primary_consumer(record: &Value) -> Option<&Value> {
    APPLICATION_PATHS
        .iter()
        .find_map(|path| record.pointer(path).filter(|v| !v.is_null()))
        .and_then(|application| application.pointer("/applicants/primaryConsumer"))
}

/// Splits a pipe-delimited value into trimmed, non-empty segments.
/// The literal `null` counts as empty.
pub fn split_segments(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .map(str::to_string)
        .collect()
}

/// Text of a scalar JSON value; containers and `null` have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn displayable(value: &Value) -> Option<String> {
    scalar_text(value).filter(|text| !split_segments(text).is_empty())
}

/// The parts of a record that the rules address, resolved once.
pub struct RecordContext<'a> {
    info: Option<&'a Value>,
    personal: Option<&'a Value>,
    first_address: Option<&'a Value>,
    contacts: &'a [Value],
}

impl<'a> RecordContext<'a> {
    pub fn new(record: &'a Value) -> Self {
        let consumer = primary_consumer(record);
        RecordContext {
            info: demographic_info(record),
            personal: consumer.and_then(|c| c.get("personalInformation")),
            first_address: consumer
                .and_then(|c| c.get("addresses"))
                .and_then(Value::as_array)
                .and_then(|a| a.first()),
            contacts: consumer
                .and_then(|c| c.get("contactInformation"))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    pub fn apply(&self, rule: &Rule) -> Option<String> {
        match rule {
            Rule::Demographic(key) => self.info?.get(*key).and_then(displayable),
            Rule::PersonalInfo(key) => self.personal?.get(*key).and_then(displayable),
            Rule::FirstAddress(key) => self.first_address?.get(*key).and_then(displayable),
            Rule::Contact(types) => self
                .contacts
                .iter()
                .find(|contact| {
                    contact
                        .get("contactType")
                        .and_then(Value::as_str)
                        .is_some_and(|t| types.iter().any(|wanted| *wanted == t))
                })
                .and_then(|contact| contact.get("number"))
                .and_then(displayable),
        }
    }

    /// Value of the first matching rule.
    pub fn extract(&self, rules: &[Rule]) -> Option<String> {
        rules.iter().find_map(|rule| self.apply(rule))
    }
}
