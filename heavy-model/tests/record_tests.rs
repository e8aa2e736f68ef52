use heavy_model::records::{
    CreateAddress, CreateCategory, CreateMachine, CreateManufacturer, CreateQuote, UpdateCarrier,
    UpdateQuote,
};
use heavy_model::{
    Carrier, Category, Entity, ExchangeRate, Machine, Manufacturer, Quote, QuoteStatus, RecordId,
};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Wire format ──────────────────────────────────────────────────

#[test]
fn manufacturer_reads_backend_field_names() {
    let m: Manufacturer = serde_json::from_value(json!({
        "id": 7,
        "nombre": "Caterpillar",
        "descripcion": "Earthmoving equipment",
        "logo": null,
        "created_at": "2024-03-01T10:00:00.000000Z",
        "updated_at": "2024-03-02T10:00:00.000000Z"
    }))
    .unwrap();

    assert_eq!(m.id, RecordId::new(7));
    assert_eq!(m.name, "Caterpillar");
    assert_eq!(m.description.as_deref(), Some("Earthmoving equipment"));
    assert!(m.logo.is_none());
    assert!(m.created_at.is_some());
}

#[test]
fn timestamps_are_optional() {
    let c: Category = serde_json::from_value(json!({"id": 1, "nombre": "Filtros"})).unwrap();
    assert!(c.created_at.is_none());
    assert!(c.updated_at.is_none());
}

#[test]
fn machine_maps_foreign_keys() {
    let m: Machine = serde_json::from_value(json!({
        "id": 3,
        "tipo": 12,
        "modelo": "320D",
        "fabricante_id": 7,
        "serie": "ABC123"
    }))
    .unwrap();
    assert_eq!(m.kind, RecordId::new(12));
    assert_eq!(m.manufacturer_id, RecordId::new(7));
    assert_eq!(m.serial.as_deref(), Some("ABC123"));
    assert!(m.arrangement.is_none());
}

#[test]
fn quote_status_uses_backend_values() {
    let q: Quote = serde_json::from_value(json!({
        "id": 10,
        "user_id": 1,
        "tercero_id": 4,
        "fecha": "2024-05-01",
        "estado": "aprobada",
        "total": 1500.5
    }))
    .unwrap();
    assert_eq!(q.status, QuoteStatus::Approved);
    assert_eq!(
        serde_json::to_value(QuoteStatus::Expired).unwrap(),
        json!("vencida")
    );
}

#[test]
fn create_payload_skips_empty_relations() {
    let body = serde_json::to_value(CreateCategory {
        name: "Rodamientos".into(),
        third_parties: vec![],
    })
    .unwrap();
    assert_eq!(body, json!({"nombre": "Rodamientos"}));
}

#[test]
fn create_payload_omits_unset_optionals() {
    let body = serde_json::to_value(CreateManufacturer {
        name: "Komatsu".into(),
        description: "Mining".into(),
        logo: None,
    })
    .unwrap();
    assert_eq!(body, json!({"nombre": "Komatsu", "descripcion": "Mining"}));
}

#[test]
fn create_payloads_carry_their_required_references() {
    let body = serde_json::to_value(CreateMachine {
        kind: RecordId::new(2),
        model: "D6".into(),
        manufacturer_id: RecordId::new(7),
        serial: None,
        arrangement: None,
        photo: None,
    })
    .unwrap();
    assert_eq!(body, json!({"tipo": 2, "modelo": "D6", "fabricante_id": 7}));

    let body = serde_json::to_value(CreateQuote {
        third_party_id: RecordId::new(11),
        date: None,
        valid_until: None,
        notes: None,
        status: Some(QuoteStatus::Draft),
        total: None,
    })
    .unwrap();
    assert_eq!(body, json!({"tercero_id": 11, "estado": "borrador"}));

    let body = serde_json::to_value(CreateAddress {
        third_party_id: RecordId::new(11),
        line: "Calle 1".into(),
        city_id: None,
        state_id: None,
        country_id: None,
        principal: Some(true),
        recipient: None,
        carrier_id: None,
        payment_method: None,
        phone: None,
    })
    .unwrap();
    assert_eq!(body["tercero_id"], json!(11));
    assert_eq!(body["direccion"], json!("Calle 1"));
}

#[test]
fn update_payload_is_partial() {
    let body = serde_json::to_value(UpdateCarrier {
        phone: Some("555-0101".into()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(body, json!({"telefono": "555-0101"}));

    let body = serde_json::to_value(UpdateQuote {
        status: Some(QuoteStatus::Sent),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(body, json!({"estado": "enviada"}));
}

// ── Entity contract ──────────────────────────────────────────────

#[test]
fn resource_names_match_backend_routes() {
    assert_eq!(Manufacturer::RESOURCE, "fabricantes");
    assert_eq!(Carrier::RESOURCE, "transportadoras");
    assert_eq!(ExchangeRate::RESOURCE, "trms");
    assert_eq!(Quote::RESOURCE, "cotizaciones");
}

#[test]
fn id_extractor_returns_record_id() {
    let rate = ExchangeRate {
        id: RecordId::new(42),
        rate: 4012.5,
        created_at: None,
        updated_at: None,
    };
    assert_eq!(rate.id(), RecordId::new(42));
}

#[test]
fn from_json_reports_model_errors() {
    let category = Category::from_json(r#"{"id": 3, "nombre": "Filtros"}"#).unwrap();
    assert_eq!(category.id(), RecordId::new(3));

    let err = Category::from_json(r#"{"id": "three"}"#).unwrap_err();
    assert!(matches!(err, heavy_model::Error::Serialization(_)));
}
