//! Release notes generation - prompt assembly over a cycle and its ledger

use std::fmt::Write;
use std::sync::Arc;

use crate::domain::{Cycle, LedgerEntry};
use crate::error::Result;
use crate::llm::client::{CompletionRequest, LlmClient};

const SYSTEM_PROMPT: &str = "Você é um redator técnico que escreve release notes para a Ion Investimentos.";

/// Builds release-notes prompts and hands them to an [`LlmClient`].
#[derive(Clone)]
pub struct ReleaseNotesGenerator {
    client: Arc<dyn LlmClient>,
}

impl ReleaseNotesGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_ready()
    }

    pub async fn generate(&self, cycle: &Cycle, entries: &[LedgerEntry]) -> Result<String> {
        let request = CompletionRequest::new(build_prompt(cycle, entries)).with_system(SYSTEM_PROMPT);
        log::info!(
            "Generating release notes for {} with model {}",
            cycle.regressivo_id,
            self.client.model()
        );
        let response = self.client.complete(request).await?;
        Ok(response.content)
    }
}

/// Prompt text for one cycle. Entries without a delivery detail are left out.
pub fn build_prompt(cycle: &Cycle, entries: &[LedgerEntry]) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Gere release notes profissionais para a release {} da Ion Investimentos.",
        cycle.release
    );
    prompt.push_str("\nInformações da Release:\n");
    let _ = writeln!(prompt, "- Versão Homolog: {}", cycle.versao_homolog);
    let _ = writeln!(prompt, "- Versão Alpha: {}", cycle.versao_alpha);
    let _ = writeln!(prompt, "- Versão Firebase: {}", cycle.versao_firebase);
    let _ = writeln!(prompt, "- Tipo de Release: {}", cycle.tipo_release);
    let _ = writeln!(prompt, "- Plataforma: {}", cycle.plataforma);

    prompt.push_str("\nEntregas por Squad:\n");
    for entry in entries.iter().filter(|e| !e.detalhe_entrega.trim().is_empty()) {
        let _ = writeln!(prompt, "- {}: {} - {}", entry.squad, entry.modulo, entry.detalhe_entrega);
    }

    prompt.push_str(
        "\nPor favor, gere release notes estruturadas com:\n\
         1. Título da release\n\
         2. Resumo executivo\n\
         3. Principais funcionalidades e melhorias\n\
         4. Correções de bugs (se houver)\n\
         5. Informações técnicas relevantes\n\
         6. Instruções de instalação/atualização (se aplicável)\n\n\
         Use um tom profissional e técnico apropriado para uma empresa de investimentos.\n",
    );
    prompt
}
