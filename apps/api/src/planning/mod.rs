// Weekly content planning engine.
// Generation is pure (templates + schedule + quality); the handlers do the
// fetching and the repository does the transactional writes.

pub mod generator;
pub mod handlers;
pub mod quality;
pub mod repository;
pub mod schedule;
pub mod templates;
