//! Audit log (`/audit`).

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_AUDIT_RECORDS: Route = Route::get("audit.get_audit_records", "/audit");
pub const CREATE_AUDIT_RECORD: Route = Route::post("audit.create_audit_record", "/audit");
pub const EXPORT_AUDIT_RECORDS: Route = Route::get("audit.export_audit_records", "/audit/export");
pub const GET_RETENTION: Route = Route::get("audit.get_retention", "/audit/retention");
pub const SET_RETENTION: Route = Route::put("audit.set_retention", "/audit/retention");
pub const GET_AUDIT_RECORDS_SINCE: Route = Route::get("audit.get_audit_records_since", "/audit/since");

pub const ROUTES: &[Route] = &[
  GET_AUDIT_RECORDS,
  CREATE_AUDIT_RECORD,
  EXPORT_AUDIT_RECORDS,
  GET_RETENTION,
  SET_RETENTION,
  GET_AUDIT_RECORDS_SINCE,
];

resource! {
  /// Audit records and retention policy.
  Audit
}

impl Audit {
  /// Records between `startDate` and `endDate`, optionally filtered by
  /// `searchString`.
  pub async fn get_audit_records(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_AUDIT_RECORDS, RequestArgs::new().query(query)).await
  }

  pub async fn create_audit_record<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&CREATE_AUDIT_RECORD, args).await
  }

  /// Export as `csv` or `zip` (the `format` parameter). The export is
  /// returned as text; this client does not stream downloads.
  pub async fn export_audit_records(&self, query: Query) -> Result<Value> {
    self.context.invoke(&EXPORT_AUDIT_RECORDS, RequestArgs::new().query(query)).await
  }

  pub async fn get_retention(&self) -> Result<Value> {
    self.context.invoke(&GET_RETENTION, RequestArgs::new()).await
  }

  /// `body` is `{"number": n, "units": "MONTHS"}`.
  pub async fn set_retention<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&SET_RETENTION, args).await
  }

  /// Records within a trailing window (`number` + `units`).
  pub async fn get_audit_records_since(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_AUDIT_RECORDS_SINCE, RequestArgs::new().query(query)).await
  }
}
