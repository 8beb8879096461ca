//! Quality request handlers
//!
//! Active cycles, ledger reads and edits, progress, and SLA checks.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{parse_body, to_data};
use crate::api::context::AppContext;
use crate::api::messages::{ApiResponse, Reply};
use crate::domain::{EntryPatch, Summary};
use crate::error::Result;

/// Wire shape of `status-resumo`
#[derive(Debug, Serialize)]
struct StatusSummaryView {
    total_itens: usize,
    status_count: BTreeMap<String, usize>,
    bugs_reportados: usize,
    progresso_percentual: f64,
}

impl From<Summary> for StatusSummaryView {
    fn from(summary: Summary) -> Self {
        Self {
            status_count: summary.counts_with_defaults(),
            total_itens: summary.total,
            bugs_reportados: summary.bug_count,
            progresso_percentual: summary.percent_complete,
        }
    }
}

pub(super) fn list_active_cycles(ctx: &AppContext) -> Result<Reply> {
    let cycles = ctx.manager.list_active_cycles()?;
    Ok(Reply::ok(ApiResponse::data(to_data(&cycles)?)))
}

pub(super) fn cycle_details(ctx: &AppContext, id: &str) -> Result<Reply> {
    let details = ctx.manager.cycle_details(id)?;
    Ok(Reply::ok(ApiResponse::data(to_data(&details)?)))
}

pub(super) fn get_entry(ctx: &AppContext, id: &str) -> Result<Reply> {
    let view = ctx.manager.get_entry(id)?;
    Ok(Reply::ok(ApiResponse::data(to_data(&view)?)))
}

pub(super) fn update_entry(ctx: &AppContext, id: &str, body: &str) -> Result<Reply> {
    let patch: EntryPatch = parse_body(body)?;
    let entry = ctx.manager.update_entry(id, patch)?;
    Ok(Reply::ok(
        ApiResponse::message("Squad/Módulo atualizado com sucesso").with_data(to_data(&entry)?),
    ))
}

pub(super) fn status_summary(ctx: &AppContext, id: &str) -> Result<Reply> {
    let summary = StatusSummaryView::from(ctx.manager.status_summary(id)?);
    Ok(Reply::ok(ApiResponse::data(to_data(&summary)?)))
}

pub(super) fn verify_sla(ctx: &AppContext, id: &str) -> Result<Reply> {
    let status = ctx.manager.sla_status(id)?;
    Ok(Reply::ok(ApiResponse::data(to_data(&status)?)))
}
