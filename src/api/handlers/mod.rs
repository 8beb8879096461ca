//! Request handlers
//!
//! [`dispatch`] is the single entry point both adapters call: a parsed
//! [`Route`], the raw request body, and the shared context in; a [`Reply`]
//! out. Errors never escape; they become status-coded envelopes.

mod admin;
mod quality;

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::context::AppContext;
use crate::api::messages::Reply;
use crate::api::routes::Route;
use crate::error::{RegressivoError, Result};

/// Run one request against the context.
pub async fn dispatch(ctx: &AppContext, route: Option<Route>, body: &str) -> Reply {
    let Some(route) = route else {
        return Reply::not_found_route();
    };
    log::debug!("Dispatching {:?}", route);

    let result = match route {
        Route::Preflight => Ok(Reply::empty()),
        Route::Health => Ok(Reply::new(
            200,
            json!({ "status": "healthy", "service": ctx.service_name }),
        )),

        Route::ListCycles => admin::list_cycles(ctx),
        Route::CreateCycle => admin::create_cycle(ctx, body),
        Route::GetCycle(id) => admin::get_cycle(ctx, &id),
        Route::UpdateCycle(id) => admin::update_cycle(ctx, &id, body),
        Route::DeleteCycle(id) => admin::delete_cycle(ctx, &id),
        Route::StartSla(id) => admin::start_sla(ctx, &id),
        Route::StopSla(id) => admin::stop_sla(ctx, &id),
        Route::ExtendSla(id) => admin::extend_sla(ctx, &id, body),
        Route::ReleaseNotes(id) => admin::release_notes(ctx, &id).await,
        Route::GetSquadsConfig => admin::get_squads_config(ctx),
        Route::ReplaceSquadsConfig => admin::replace_squads_config(ctx, body),
        Route::DeleteEntry(id) => admin::delete_entry(ctx, &id),

        Route::ListActiveCycles => quality::list_active_cycles(ctx),
        Route::CycleDetails(id) => quality::cycle_details(ctx, &id),
        Route::GetEntry(id) => quality::get_entry(ctx, &id),
        Route::UpdateEntry(id) => quality::update_entry(ctx, &id, body),
        Route::StatusSummary(id) => quality::status_summary(ctx, &id),
        Route::VerifySla(id) => quality::verify_sla(ctx, &id),
    };

    result.unwrap_or_else(Reply::from)
}

/// Parse a JSON body; an empty body yields the type's default.
fn parse_body<T: DeserializeOwned + Default>(body: &str) -> Result<T> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(|e| RegressivoError::Validation(format!("corpo JSON inválido: {}", e)))
}

/// Serialize a payload for an envelope.
fn to_data<T: serde::Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CyclePatch;

    #[test]
    fn test_parse_body_empty_is_default() {
        let patch: CyclePatch = parse_body("  ").unwrap();
        assert_eq!(patch, CyclePatch::default());
    }

    #[test]
    fn test_parse_body_rejects_bad_json() {
        let err = parse_body::<CyclePatch>("{not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_parse_body_rejects_unknown_fields() {
        let err = parse_body::<CyclePatch>(r#"{"slaFim": "2026-01-01T00:00:00Z"}"#).unwrap_err();
        assert!(matches!(err, RegressivoError::Validation(_)));
    }
}
