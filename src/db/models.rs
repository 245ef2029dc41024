use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::db::dataset::{Dataset, SqlValue};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Production {
    pub id: i64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "valor_producao")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductionFields {
    pub id: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "valor_producao")]
    pub value: Option<f64>,
}

impl Dataset for Production {
    const TABLE: &'static str = "production";
    const COLUMNS: &'static [&'static str] = &["category", "name", "year", "value"];

    type Fields = ProductionFields;

    fn bindings(f: &ProductionFields) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(f.category.clone()),
            SqlValue::Text(f.name.clone()),
            SqlValue::Text(f.year.clone()),
            SqlValue::Real(f.value),
        ]
    }

    fn id_of(f: &ProductionFields) -> Option<i64> {
        f.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Processing {
    pub id: i64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "sub_categoria")]
    pub subcategory: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "valor_processamento")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessingFields {
    pub id: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "sub_categoria")]
    pub subcategory: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "valor_processamento")]
    pub value: Option<f64>,
}

impl Dataset for Processing {
    const TABLE: &'static str = "processing";
    const COLUMNS: &'static [&'static str] = &["category", "subcategory", "name", "year", "value"];

    type Fields = ProcessingFields;

    fn bindings(f: &ProcessingFields) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(f.category.clone()),
            SqlValue::Text(f.subcategory.clone()),
            SqlValue::Text(f.name.clone()),
            SqlValue::Text(f.year.clone()),
            SqlValue::Real(f.value),
        ]
    }

    fn id_of(f: &ProcessingFields) -> Option<i64> {
        f.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Commercialization {
    pub id: i64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "litros_comercializacao")]
    pub liters: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommercializationFields {
    pub id: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "litros_comercializacao")]
    pub liters: Option<f64>,
}

impl Dataset for Commercialization {
    const TABLE: &'static str = "commercialization";
    const COLUMNS: &'static [&'static str] = &["category", "name", "year", "liters"];

    type Fields = CommercializationFields;

    fn bindings(f: &CommercializationFields) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(f.category.clone()),
            SqlValue::Text(f.name.clone()),
            SqlValue::Text(f.year.clone()),
            SqlValue::Real(f.liters),
        ]
    }

    fn id_of(f: &CommercializationFields) -> Option<i64> {
        f.id
    }
}

/// Trade flow row, shared by the import and export tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TradeFields {
    pub id: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "quantidade")]
    pub quantity: Option<i64>,
    #[serde(rename = "valor")]
    pub value: Option<f64>,
}

fn trade_bindings(f: &TradeFields) -> Vec<SqlValue> {
    vec![
        SqlValue::Text(f.category.clone()),
        SqlValue::Text(f.name.clone()),
        SqlValue::Text(f.year.clone()),
        SqlValue::Integer(f.quantity),
        SqlValue::Real(f.value),
    ]
}

const TRADE_COLUMNS: &[&str] = &["category", "name", "year", "quantity", "value"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Import {
    pub id: i64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "quantidade")]
    pub quantity: Option<i64>,
    #[serde(rename = "valor")]
    pub value: Option<f64>,
}

impl Dataset for Import {
    const TABLE: &'static str = "imports";
    const COLUMNS: &'static [&'static str] = TRADE_COLUMNS;

    type Fields = TradeFields;

    fn bindings(f: &TradeFields) -> Vec<SqlValue> {
        trade_bindings(f)
    }

    fn id_of(f: &TradeFields) -> Option<i64> {
        f.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Export {
    pub id: i64,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "ano")]
    pub year: Option<String>,
    #[serde(rename = "quantidade")]
    pub quantity: Option<i64>,
    #[serde(rename = "valor")]
    pub value: Option<f64>,
}

impl Dataset for Export {
    const TABLE: &'static str = "exports";
    const COLUMNS: &'static [&'static str] = TRADE_COLUMNS;

    type Fields = TradeFields;

    fn bindings(f: &TradeFields) -> Vec<SqlValue> {
        trade_bindings(f)
    }

    fn id_of(f: &TradeFields) -> Option<i64> {
        f.id
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}
