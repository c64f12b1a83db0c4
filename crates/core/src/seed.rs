//! Demo data: two contract types and one template for each.

use chrono::DateTime;

use crate::contract_type::ContractType;
use crate::extraction::extract_placeholders;
use crate::placeholder::{PlaceholderSchema, PlaceholderType};
use crate::template::Template;
use crate::types::Timestamp;

/// 2024-01-01T00:00:00Z
const SEED_CREATED_AT: i64 = 1_704_067_200;
/// 2024-01-15T10:30:00Z
const LABORAL_TEMPLATE_MODIFIED_AT: i64 = 1_705_314_600;
/// 2024-01-10T14:20:00Z
const SERVICIOS_TEMPLATE_MODIFIED_AT: i64 = 1_704_896_400;

const SEED_AUTHOR: &str = "current-user";

fn at(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn required(id: &str, name: &str, label: &str, placeholder_type: PlaceholderType) -> PlaceholderSchema {
    PlaceholderSchema {
        id: id.into(),
        name: name.into(),
        label: label.into(),
        placeholder_type,
        required: true,
        default_value: None,
        options: None,
        validation: None,
    }
}

pub fn demo_contract_types() -> Vec<ContractType> {
    vec![
        ContractType {
            id: "ct1".into(),
            name: "Contrato Laboral".into(),
            description: "Contratos de trabajo para empleados".into(),
            placeholders: vec![
                required("ph1", "nombre_empleado", "Nombre del Empleado", PlaceholderType::Text),
                required("ph2", "fecha_inicio", "Fecha de Inicio", PlaceholderType::Date),
                required("ph3", "salario", "Salario", PlaceholderType::Number),
            ],
            created_at: at(SEED_CREATED_AT),
            updated_at: at(SEED_CREATED_AT),
        },
        ContractType {
            id: "ct2".into(),
            name: "Contrato de Servicios".into(),
            description: "Contratos para prestación de servicios".into(),
            placeholders: vec![
                required("ph4", "nombre_proveedor", "Nombre del Proveedor", PlaceholderType::Text),
                required(
                    "ph5",
                    "descripcion_servicio",
                    "Descripción del Servicio",
                    PlaceholderType::Textarea,
                ),
                required("ph6", "valor_contrato", "Valor del Contrato", PlaceholderType::Number),
            ],
            created_at: at(SEED_CREATED_AT),
            updated_at: at(SEED_CREATED_AT),
        },
    ]
}

fn template(
    id: &str,
    name: &str,
    contract_type_id: &str,
    html: &str,
    modified_at: i64,
) -> Template {
    Template {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        contract_type_id: contract_type_id.into(),
        html_content: html.into(),
        css_content: ".placeholder { background-color: #e3f2fd; }".into(),
        placeholders: extract_placeholders(html),
        is_active: true,
        created_at: at(SEED_CREATED_AT),
        updated_at: at(modified_at),
        created_by: SEED_AUTHOR.into(),
    }
}

pub fn demo_templates() -> Vec<Template> {
    vec![
        template(
            "1",
            "Contrato de Trabajo Estándar",
            "ct1",
            "<h1>Contrato de Trabajo</h1>\
             <p>Empleado: <span class=\"placeholder\">{{nombre_empleado}}</span></p>\
             <p>Fecha de inicio: <span class=\"placeholder\">{{fecha_inicio}}</span></p>\
             <p>Salario: <span class=\"placeholder\">{{salario}}</span></p>",
            LABORAL_TEMPLATE_MODIFIED_AT,
        ),
        template(
            "2",
            "Contrato de Servicios Profesionales",
            "ct2",
            "<h1>Contrato de Servicios</h1>\
             <p>Proveedor: <span class=\"placeholder\">{{nombre_proveedor}}</span></p>\
             <p>Servicio: <span class=\"placeholder\">{{descripcion_servicio}}</span></p>\
             <p>Valor: <span class=\"placeholder\">{{valor_contrato}}</span></p>",
            SERVICIOS_TEMPLATE_MODIFIED_AT,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::check;

    #[test]
    fn seed_timestamps_decode() {
        assert_eq!(at(SEED_CREATED_AT).to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(
            at(LABORAL_TEMPLATE_MODIFIED_AT).to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
        assert_eq!(
            at(SERVICIOS_TEMPLATE_MODIFIED_AT).to_rfc3339(),
            "2024-01-10T14:20:00+00:00"
        );
    }

    #[test]
    fn demo_schemas_are_valid() {
        for ct in demo_contract_types() {
            for p in &ct.placeholders {
                assert!(p.validate().is_ok(), "{} should be valid", p.name);
            }
        }
    }

    #[test]
    fn demo_templates_are_consistent_with_their_types() {
        let types = demo_contract_types();
        for t in demo_templates() {
            let ct = types.iter().find(|ct| ct.id == t.contract_type_id).unwrap();
            assert!(check(&t, ct).is_empty(), "{} has findings", t.name);
        }
    }
}
