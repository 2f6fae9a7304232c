//! Version history domain: models, repository contract, promotion service.

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Version, VersionDraft, VersionPatch};
pub use repository::VersionRepository;
pub use service::PromotionService;
