//! Инфраструктурный слой вокруг движка дотенко:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - маппинги между domain/engine и API.

pub mod ids;
pub mod mapping;
pub mod rng;

pub use ids::*;
pub use mapping::*;
pub use rng::*;
