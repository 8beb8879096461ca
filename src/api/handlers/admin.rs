//! Admin request handlers
//!
//! Cycle CRUD, SLA transitions, release notes, and squad configuration.

use serde::Deserialize;
use serde_json::json;

use super::{parse_body, to_data};
use crate::api::context::AppContext;
use crate::api::messages::{ApiResponse, Reply};
use crate::domain::{CyclePatch, NewCycle, SquadsConfig};
use crate::error::{RegressivoError, Result};

/// Body of `incluir-tempo`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtendRequest {
    horas: Option<i64>,
}

impl ExtendRequest {
    /// Hours to add; defaults to one, must be positive
    fn hours(&self) -> Result<u32> {
        let horas = self.horas.unwrap_or(1);
        if horas <= 0 {
            return Err(RegressivoError::Validation("horas deve ser positivo".to_string()));
        }
        u32::try_from(horas).map_err(|_| RegressivoError::Validation(format!("horas fora do intervalo: {}", horas)))
    }
}

pub(super) fn list_cycles(ctx: &AppContext) -> Result<Reply> {
    let cycles = ctx.manager.list_cycles()?;
    Ok(Reply::ok(ApiResponse::data(to_data(&cycles)?)))
}

pub(super) fn create_cycle(ctx: &AppContext, body: &str) -> Result<Reply> {
    let request: NewCycle = parse_body(body)?;
    let cycle = ctx.manager.create_cycle(request)?;
    Ok(Reply::created(ApiResponse::data(to_data(&cycle)?)))
}

pub(super) fn get_cycle(ctx: &AppContext, id: &str) -> Result<Reply> {
    let cycle = ctx.manager.get_cycle(id)?;
    Ok(Reply::ok(ApiResponse::data(to_data(&cycle)?)))
}

pub(super) fn update_cycle(ctx: &AppContext, id: &str, body: &str) -> Result<Reply> {
    let patch: CyclePatch = parse_body(body)?;
    let cycle = ctx.manager.update_cycle(id, patch)?;
    Ok(Reply::ok(
        ApiResponse::message("Regressivo atualizado com sucesso").with_data(to_data(&cycle)?),
    ))
}

pub(super) fn delete_cycle(ctx: &AppContext, id: &str) -> Result<Reply> {
    ctx.manager.delete_cycle(id)?;
    Ok(Reply::ok(ApiResponse::message("Regressivo excluído com sucesso")))
}

pub(super) fn start_sla(ctx: &AppContext, id: &str) -> Result<Reply> {
    let window = ctx.manager.start_sla(id)?;
    Ok(Reply::ok(
        ApiResponse::message("SLA iniciado com sucesso").with_data(to_data(&window)?),
    ))
}

pub(super) fn stop_sla(ctx: &AppContext, id: &str) -> Result<Reply> {
    let cycle = ctx.manager.stop_sla(id)?;
    Ok(Reply::ok(
        ApiResponse::message("SLA parado com sucesso").with_data(to_data(&cycle)?),
    ))
}

pub(super) fn extend_sla(ctx: &AppContext, id: &str, body: &str) -> Result<Reply> {
    let request: ExtendRequest = parse_body(body)?;
    let hours = request.hours()?;
    let cycle = ctx.manager.extend_sla(id, hours)?;
    Ok(Reply::ok(
        ApiResponse::message(format!("{} horas adicionadas ao SLA", hours)).with_data(json!({ "slaFim": cycle.sla_fim })),
    ))
}

pub(super) async fn release_notes(ctx: &AppContext, id: &str) -> Result<Reply> {
    let notes = ctx.manager.release_notes(id).await?;
    Ok(Reply::ok(ApiResponse::data(to_data(&notes)?)))
}

pub(super) fn get_squads_config(ctx: &AppContext) -> Result<Reply> {
    let config = ctx.manager.squads_config()?;
    Ok(Reply::ok(ApiResponse::data(to_data(&config)?)))
}

pub(super) fn replace_squads_config(ctx: &AppContext, body: &str) -> Result<Reply> {
    let config: SquadsConfig = parse_body(body)?;
    let config = ctx.manager.replace_squads_config(config)?;
    Ok(Reply::ok(
        ApiResponse::message("Configuração atualizada com sucesso").with_data(to_data(&config)?),
    ))
}

pub(super) fn delete_entry(ctx: &AppContext, id: &str) -> Result<Reply> {
    ctx.manager.delete_entry(id)?;
    Ok(Reply::ok(ApiResponse::message("Squad/Módulo excluído com sucesso")))
}
