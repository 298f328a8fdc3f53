// Offline counterpart of the HTTP service: answers one query about one PDF.

use anyhow::{bail, Result};
use pdf_rag::{
    AnswerGenerator, ContextSelector, DocumentProcessor, GeminiService, QueryService,
    SelectorConfig, TextExtractor,
};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let (path, query) = match (args.next(), args.next()) {
        (Some(path), Some(query)) => (PathBuf::from(path), query),
        _ => bail!("usage: pdf_rag <file.pdf> <query>"),
    };

    let processor = DocumentProcessor::new();
    let text = match processor.extract(&path).into_usable_text() {
        Some(text) => text,
        None => bail!(
            "could not extract sufficient text from {}; the file might be scanned or encrypted",
            path.display()
        ),
    };

    let gemini = GeminiService::from_env();
    log::info!("Using model {}", gemini.model());

    let service = QueryService::new(
        ContextSelector::new(SelectorConfig::default())?,
        AnswerGenerator::new(Arc::new(gemini)),
    );

    let answer = service.answer(&text, &query).await?;
    println!("{}", answer);

    Ok(())
}
