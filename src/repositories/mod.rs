pub mod generation_repository;

pub use generation_repository::GenerationRepository;
