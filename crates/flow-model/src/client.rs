use serde::{Deserialize, Serialize};

use crate::record::Listable;
use crate::value::FieldValue;

/// Document keys of a stored client.
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "nombre";
    pub const PHONE: &str = "telefono";
    pub const EMAIL: &str = "email";
    pub const DEBT: &str = "adeudo";
    pub const CREDIT_LIMIT: &str = "limiteCredito";
    pub const ACTIVE: &str = "activo";
    /// Derived: `conAdeudo` when the client owes money, `alDia` otherwise.
    pub const DEBT_STATUS: &str = "estadoAdeudo";
}

pub const WITH_DEBT: &str = "conAdeudo";
pub const UP_TO_DATE: &str = "alDia";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "adeudo", default)]
    pub debt: f64,
    #[serde(rename = "limiteCredito", default)]
    pub credit_limit: f64,
    #[serde(rename = "activo", default)]
    pub active: bool,
}

impl Client {
    pub fn has_debt(&self) -> bool {
        self.debt > 0.0
    }
}

impl Listable for Client {
    const SEARCHABLE: &'static [&'static str] = &[fields::NAME, fields::PHONE, fields::EMAIL];

    fn record_id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            fields::ID => self.id.as_str().into(),
            fields::NAME => self.name.as_str().into(),
            fields::PHONE => self.phone.clone().into(),
            fields::EMAIL => self.email.clone().into(),
            fields::DEBT => self.debt.into(),
            fields::CREDIT_LIMIT => self.credit_limit.into(),
            fields::ACTIVE => self.active.into(),
            fields::DEBT_STATUS => {
                let status = if self.has_debt() { WITH_DEBT } else { UP_TO_DATE };
                status.into()
            }
            _ => FieldValue::Missing,
        }
    }
}
