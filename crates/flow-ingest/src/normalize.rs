//! Typed conversion of raw documents.
//!
//! Defaults are resolved here once, so the rest of the workspace only sees
//! complete records: a missing id becomes `<collection>-<n>`, a sale without a
//! client is attributed to its own id, and unknown statuses read as pending.

use tracing::warn;

use flow_model::{
    Client, Collection, EntryKind, InventoryItem, LedgerEntry, Record, Sale, SaleStatus, Transfer,
    Vault,
};

use crate::document::{boolean, count, date, field_value, integer, line_items, number, text};
use crate::reader::Document;

fn id_or_default(doc: &Document, collection: Collection, index: usize) -> String {
    text(doc, &["id", "_id", "docId"])
        .unwrap_or_else(|| format!("{}-{}", collection.document_name(), index + 1))
}

pub fn sale_from(doc: &Document, index: usize) -> Sale {
    let id = id_or_default(doc, Collection::Sales, index);
    let status = match text(doc, &["estatus", "estadoPago", "estado", "status"]) {
        None => SaleStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(sale = %id, status = %raw, "unknown sale status, reading as pending");
            SaleStatus::default()
        }),
    };
    let items = line_items(doc);
    let mut quantity = count(doc, &["cantidad", "unidades"]);
    if quantity == 0 {
        quantity = u32::try_from(items.iter().map(|item| u64::from(item.quantity)).sum::<u64>())
            .unwrap_or(u32::MAX);
    }
    Sale {
        client: text(doc, &["clienteId", "cliente", "clienteNombre"]).unwrap_or_else(|| id.clone()),
        date: date(doc, &["fecha", "fechaVenta"]),
        quantity,
        line_items: items,
        product: text(doc, &["productoId", "producto"]),
        sale_price: number(doc, &["precioVenta", "totalVenta", "total"]),
        status,
        amount_paid: number(doc, &["montoPagado", "abonado"]),
        freight: number(doc, &["flete", "fleteUtilidad"]),
        vault_allocation: number(doc, &["bovedaMonte"]),
        profit: number(doc, &["utilidad", "utilidadVenta"]),
        id,
    }
}

pub fn client_from(doc: &Document, index: usize) -> Client {
    let id = id_or_default(doc, Collection::Clients, index);
    Client {
        name: text(doc, &["nombre", "name", "cliente"]).unwrap_or_else(|| id.clone()),
        phone: text(doc, &["telefono", "phone"]),
        email: text(doc, &["email", "correo"]),
        debt: number(doc, &["adeudo", "deuda", "saldoPendiente"]),
        credit_limit: number(doc, &["limiteCredito"]),
        active: boolean(doc, &["activo", "active"], true),
        id,
    }
}

pub fn inventory_from(doc: &Document, index: usize) -> InventoryItem {
    let id = id_or_default(doc, Collection::Inventory, index);
    InventoryItem {
        name: text(doc, &["nombre", "producto", "name"]).unwrap_or_else(|| id.clone()),
        category: text(doc, &["categoria", "category"]).unwrap_or_default(),
        stock: integer(doc, &["stock", "existencia", "cantidad"]),
        unit_cost: number(doc, &["costoUnitario", "cpUnit", "precioCompra"]),
        id,
    }
}

pub fn transfer_from(doc: &Document, index: usize) -> Transfer {
    Transfer {
        id: id_or_default(doc, Collection::Transfers, index),
        date: date(doc, &["fecha"]),
        from_vault: text(doc, &["origen", "bovedaOrigen"]).unwrap_or_default(),
        to_vault: text(doc, &["destino", "bovedaDestino"]).unwrap_or_default(),
        amount: number(doc, &["monto", "cantidad", "importe"]),
        concept: text(doc, &["concepto", "descripcion"]).unwrap_or_default(),
    }
}

/// `None` when the entry kind is missing or unrecognised.
pub fn ledger_from(doc: &Document, index: usize) -> Option<LedgerEntry> {
    let id = id_or_default(doc, Collection::Ledger, index);
    let raw_kind = text(doc, &["tipo", "type"]).unwrap_or_default();
    let kind: EntryKind = match raw_kind.parse() {
        Ok(kind) => kind,
        Err(_) => {
            warn!(entry = %id, kind = %raw_kind, "skipping ledger entry with unknown kind");
            return None;
        }
    };
    Some(LedgerEntry {
        date: date(doc, &["fecha"]),
        kind,
        destination: text(doc, &["destino", "banco", "boveda"]).unwrap_or_default(),
        origin: text(doc, &["origen"]),
        concept: text(doc, &["concepto", "descripcion"]).unwrap_or_default(),
        category: text(doc, &["categoria"]),
        amount: number(doc, &["monto", "cantidad", "importe"]),
        reference: text(doc, &["referencia", "ventaId"]),
        id,
    })
}

pub fn vault_from(doc: &Document, index: usize) -> Vault {
    let id = id_or_default(doc, Collection::Vaults, index);
    Vault {
        name: text(doc, &["nombre", "name"]).unwrap_or_else(|| id.clone()),
        capital: number(doc, &["capitalActual", "capital", "saldo"]),
        id,
    }
}

/// A schemaless record keeping every stored field.
pub fn record_from(doc: &Document, index: usize) -> Record {
    let id = text(doc, &["id"]).unwrap_or_else(|| (index + 1).to_string());
    let mut record = Record::new(id);
    for (key, value) in doc {
        if key != "id" {
            record.fields.insert(key.clone(), field_value(value));
        }
    }
    record
}
