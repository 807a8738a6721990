//! Form schemas for create/update payloads
//!
//! Every dialog in the console submits one of these. They are validated
//! before any request reaches the inventory backend.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::ProjectStatus;
use crate::validation::{
    non_negative_price, not_blank, percentage, positive_quantity, validate_date_range,
    validate_distinct_storages, validate_movement_list,
};

/// One row of a movement field array
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementForm {
    #[validate(custom = "not_blank")]
    pub product_id: String,
    #[validate(custom = "positive_quantity")]
    pub quantity: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[validate(custom = "non_negative_price")]
    pub buying_price: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
}

/// Create/update form of an Incoming or Outgoing record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_record_form", skip_on_field_errors = false))]
pub struct RecordForm {
    #[validate(length(max = 100, message = "Máximo 100 caracteres"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(custom = "not_blank")]
    pub storage_id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub state: bool,
    #[validate]
    pub movements: Vec<MovementForm>,
}

pub type IncomingForm = RecordForm;
pub type OutgoingForm = RecordForm;

fn validate_record_form(form: &RecordForm) -> Result<(), ValidationError> {
    validate_movement_list(&form.movements)
}

/// Body sent to the record create/update endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    #[serde(flatten)]
    pub form: RecordForm,
    pub is_transference: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_id: Option<String>,
}

impl From<RecordForm> for RecordPayload {
    fn from(form: RecordForm) -> Self {
        Self {
            form,
            is_transference: false,
            reference_id: None,
            incoming_id: None,
        }
    }
}

/// Stock transfer between two warehouses
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_transfer_form", skip_on_field_errors = false))]
pub struct TransferForm {
    #[validate(length(max = 100, message = "Máximo 100 caracteres"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(custom = "not_blank")]
    pub origin_storage_id: String,
    #[validate(custom = "not_blank")]
    pub destination_storage_id: String,
    pub date: DateTime<Utc>,
    #[validate]
    pub movements: Vec<MovementForm>,
}

fn validate_transfer_form(form: &TransferForm) -> Result<(), ValidationError> {
    validate_distinct_storages(&form.origin_storage_id, &form.destination_storage_id)?;
    validate_movement_list(&form.movements)
}

impl TransferForm {
    fn side(&self, storage_id: &str) -> RecordForm {
        RecordForm {
            name: self.name.clone(),
            description: self.description.clone(),
            storage_id: storage_id.to_string(),
            date: self.date,
            state: false,
            movements: self.movements.clone(),
        }
    }

    /// The exit half, leaving the origin warehouse
    pub fn outgoing_payload(&self) -> RecordPayload {
        RecordPayload {
            is_transference: true,
            ..RecordPayload::from(self.side(&self.origin_storage_id))
        }
    }

    /// The entry half, arriving at the destination and pointing at the exit
    pub fn incoming_payload(&self, outgoing_id: &str) -> RecordPayload {
        RecordPayload {
            is_transference: true,
            reference_id: Some(outgoing_id.to_string()),
            ..RecordPayload::from(self.side(&self.destination_storage_id))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(custom = "not_blank", length(max = 100, message = "Máximo 100 caracteres"))]
    pub name: String,
    #[validate(length(max = 500, message = "Máximo 500 caracteres"))]
    pub description: Option<String>,
    #[validate(length(max = 30, message = "Máximo 30 caracteres"))]
    pub code: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleForm {
    #[validate(custom = "not_blank", length(max = 50, message = "Máximo 50 caracteres"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Seleccione al menos un permiso"))]
    pub permission_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_design_project_form", skip_on_field_errors = false))]
pub struct DesignProjectForm {
    #[validate(custom = "not_blank", length(max = 100, message = "Máximo 100 caracteres"))]
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    #[validate(custom = "percentage")]
    pub progress: u8,
}

fn validate_design_project_form(form: &DesignProjectForm) -> Result<(), ValidationError> {
    validate_date_range(form.start_date, form.end_date)
}

/// Flatten validation errors into `path -> messages`, the shape shown by the
/// form diagnostics panel. Nested paths use dots (`movements.0.quantity`).
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    collect_errors(errors, "", &mut out);
    out
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, Vec<String>>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(path).or_default();
                for err in list {
                    messages.push(
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string()),
                    );
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_errors(inner, &format!("{}.{}", path, idx), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: i64) -> MovementForm {
        MovementForm {
            product_id: product_id.to_string(),
            quantity,
            buying_price: Some(Decimal::new(250, 2)),
            date: None,
        }
    }

    fn record_form(movements: Vec<MovementForm>) -> RecordForm {
        RecordForm {
            name: Some("Compra semanal".into()),
            description: None,
            storage_id: "wh-1".into(),
            date: "2024-05-01T00:00:00Z".parse().unwrap(),
            state: false,
            movements,
        }
    }

    #[test]
    fn test_valid_record_form() {
        assert!(record_form(vec![line("p-1", 3)]).validate().is_ok());
    }

    #[test]
    fn test_record_form_requires_movements() {
        let errors = record_form(vec![]).validate().unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(fields["__all__"], vec!["Agregue al menos un producto"]);
    }

    #[test]
    fn test_nested_movement_errors_carry_index() {
        let errors = record_form(vec![line("p-1", 2), line("p-2", 0)])
            .validate()
            .unwrap_err();
        let fields = field_errors(&errors);
        assert_eq!(
            fields["movements.1.quantity"],
            vec!["La cantidad debe ser mayor a 0"]
        );
        assert!(!fields.contains_key("movements.0.quantity"));
    }

    #[test]
    fn test_transfer_rejects_same_storage() {
        let form = TransferForm {
            name: None,
            description: None,
            origin_storage_id: "wh-1".into(),
            destination_storage_id: "wh-1".into(),
            date: "2024-05-01T00:00:00Z".parse().unwrap(),
            movements: vec![line("p-1", 1)],
        };
        let errors = form.validate().unwrap_err();
        assert!(field_errors(&errors).contains_key("__all__"));
    }

    #[test]
    fn test_transfer_halves_point_at_each_other() {
        let form = TransferForm {
            name: Some("Reposición".into()),
            description: None,
            origin_storage_id: "wh-1".into(),
            destination_storage_id: "wh-2".into(),
            date: "2024-05-01T00:00:00Z".parse().unwrap(),
            movements: vec![line("p-1", 5)],
        };

        let outgoing = form.outgoing_payload();
        assert!(outgoing.is_transference);
        assert_eq!(outgoing.form.storage_id, "wh-1");

        let incoming = form.incoming_payload("out-7");
        assert_eq!(incoming.form.storage_id, "wh-2");
        assert_eq!(incoming.reference_id.as_deref(), Some("out-7"));

        let json = serde_json::to_value(&incoming).unwrap();
        assert_eq!(json["storageId"], "wh-2");
        assert_eq!(json["referenceId"], "out-7");
        assert_eq!(json["movements"][0]["buyingPrice"], 2.5);
        assert!(json.get("incomingId").is_none());
    }

    #[test]
    fn test_role_form_requires_permission() {
        let form = RoleForm {
            name: "Bodeguero".into(),
            description: None,
            permission_ids: vec![],
        };
        let fields = field_errors(&form.validate().unwrap_err());
        assert_eq!(fields["permission_ids"], vec!["Seleccione al menos un permiso"]);
    }

    #[test]
    fn test_design_project_dates_and_progress() {
        let mut form = DesignProjectForm {
            name: "Vitrina".into(),
            description: None,
            client: Some("ACME".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            status: ProjectStatus::InProgress,
            progress: 50,
        };
        assert!(form.validate().is_err());

        form.end_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert!(form.validate().is_ok());

        form.progress = 101;
        let fields = field_errors(&form.validate().unwrap_err());
        assert!(fields.contains_key("progress"));
    }
}
