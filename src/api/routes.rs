//! Route table shared by the server and serverless adapters.

/// Every endpoint the API answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Health,

    // Admin
    ListCycles,
    CreateCycle,
    GetCycle(String),
    UpdateCycle(String),
    DeleteCycle(String),
    StartSla(String),
    StopSla(String),
    ExtendSla(String),
    ReleaseNotes(String),
    GetSquadsConfig,
    ReplaceSquadsConfig,
    DeleteEntry(String),

    // Quality
    ListActiveCycles,
    CycleDetails(String),
    GetEntry(String),
    UpdateEntry(String),
    StatusSummary(String),
    VerifySla(String),
}

impl Route {
    /// Resolve a method and path. `None` means no such endpoint.
    pub fn parse(method: &str, path: &str) -> Option<Route> {
        let method = method.to_ascii_uppercase();
        if method == "OPTIONS" {
            return Some(Route::Preflight);
        }

        // No trailing or doubled slashes
        let segments: Vec<&str> = path.strip_prefix('/')?.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let route = match (method.as_str(), segments.as_slice()) {
            ("GET", ["health"]) => Route::Health,

            ("GET", ["api", "admin", "regressivos"]) => Route::ListCycles,
            ("POST", ["api", "admin", "regressivos"]) => Route::CreateCycle,
            ("GET", ["api", "admin", "regressivos", r]) => Route::GetCycle(r.to_string()),
            ("PUT", ["api", "admin", "regressivos", r]) => Route::UpdateCycle(r.to_string()),
            ("DELETE", ["api", "admin", "regressivos", r]) => Route::DeleteCycle(r.to_string()),
            ("POST", ["api", "admin", "regressivos", r, "iniciar-sla"]) => Route::StartSla(r.to_string()),
            ("POST", ["api", "admin", "regressivos", r, "parar-sla"]) => Route::StopSla(r.to_string()),
            ("POST", ["api", "admin", "regressivos", r, "incluir-tempo"]) => Route::ExtendSla(r.to_string()),
            ("POST", ["api", "admin", "regressivos", r, "release-notes"]) => Route::ReleaseNotes(r.to_string()),
            ("GET", ["api", "admin", "squads-config"]) => Route::GetSquadsConfig,
            ("PUT", ["api", "admin", "squads-config"]) => Route::ReplaceSquadsConfig,
            ("DELETE", ["api", "admin", "squad-modulo", s]) => Route::DeleteEntry(s.to_string()),

            ("GET", ["api", "quality", "regressivos"]) => Route::ListActiveCycles,
            ("GET", ["api", "quality", "regressivos", r]) => Route::CycleDetails(r.to_string()),
            ("GET", ["api", "quality", "regressivos", r, "status-resumo"]) => Route::StatusSummary(r.to_string()),
            ("GET", ["api", "quality", "regressivos", r, "verificar-sla"]) => Route::VerifySla(r.to_string()),
            ("GET", ["api", "quality", "squad-modulo", s]) => Route::GetEntry(s.to_string()),
            ("PUT", ["api", "quality", "squad-modulo", s]) => Route::UpdateEntry(s.to_string()),

            _ => return None,
        };
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_routes() {
        assert_eq!(Route::parse("GET", "/api/admin/regressivos"), Some(Route::ListCycles));
        assert_eq!(Route::parse("post", "/api/admin/regressivos"), Some(Route::CreateCycle));
        assert_eq!(
            Route::parse("POST", "/api/admin/regressivos/r1/incluir-tempo"),
            Some(Route::ExtendSla("r1".to_string()))
        );
        assert_eq!(
            Route::parse("DELETE", "/api/admin/squad-modulo/s1"),
            Some(Route::DeleteEntry("s1".to_string()))
        );
    }

    #[test]
    fn test_parse_quality_routes() {
        assert_eq!(
            Route::parse("GET", "/api/quality/regressivos/r1/status-resumo"),
            Some(Route::StatusSummary("r1".to_string()))
        );
        assert_eq!(
            Route::parse("PUT", "/api/quality/squad-modulo/s1"),
            Some(Route::UpdateEntry("s1".to_string()))
        );
    }

    #[test]
    fn test_options_is_preflight_for_any_path() {
        assert_eq!(Route::parse("OPTIONS", "/whatever"), Some(Route::Preflight));
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Route::parse("GET", "/api/nothing"), None);
        assert_eq!(Route::parse("PATCH", "/api/admin/regressivos/r1"), None);
        assert_eq!(Route::parse("PUT", "/api/quality/regressivos/r1"), None);
    }

    #[test]
    fn test_empty_segments_do_not_match() {
        assert_eq!(Route::parse("GET", "/api/admin/regressivos/"), None);
        assert_eq!(Route::parse("GET", "api/admin/regressivos"), None);
        assert_eq!(Route::parse("GET", "/api//admin/regressivos"), None);
        assert_eq!(Route::parse("GET", "/api/admin/regressivos//status-resumo"), None);
        assert_eq!(Route::parse("GET", "/health/"), None);
    }
}
