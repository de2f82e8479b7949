//! Shared application state.

use std::sync::Arc;

use nova_auth::{AuthService, TokenSigner};
use nova_core::GenerationBackend;
use nova_db::Database;
use nova_inference::{AvailabilityCache, FlashcardCache, FlashcardGenerator, Summarizer};
use nova_ingest::IngestPipeline;

/// State shared across handlers. Cheap to clone; everything inside is a
/// pool handle or an Arc.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthService,
    pub summarizer: Summarizer,
    pub flashcards: FlashcardGenerator,
    pub pipeline: IngestPipeline,
}

impl AppState {
    /// Wire up services over a connected database, a generation backend,
    /// and a token signer. The flashcard and availability caches are
    /// created here and injected into the generator.
    pub fn new(db: Database, backend: Arc<dyn GenerationBackend>, signer: TokenSigner) -> Self {
        let auth = AuthService::new(Arc::new(db.users.clone()), signer);
        let summarizer = Summarizer::new(backend.clone());
        let flashcards = FlashcardGenerator::new(
            backend,
            Arc::new(FlashcardCache::default()),
            Arc::new(AvailabilityCache::default()),
        );
        let pipeline = IngestPipeline::new(Arc::new(db.notes.clone()), summarizer.clone());

        Self {
            db,
            auth,
            summarizer,
            flashcards,
            pipeline,
        }
    }
}
