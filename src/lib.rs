//! 韩国地址校正
//!
//! 把带有 OCR 噪声的地址拆成 시도/도로명/지번 等片段，判断地址体系，
//! 构造带权重的模糊检索条件，再把检索结果还原成 도로명주소 和 지번주소。

pub mod address_index;
pub mod assemble;
pub mod config;
pub mod corrector;
pub mod csv_loader;
pub mod detail;
pub mod elastic;
pub mod error;
pub mod field;
pub mod hangul;
pub mod province;
pub mod query;
pub mod scheme;
pub mod search;
pub mod segment;

pub use address_index::AddressIndex;
pub use assemble::CorrectionResult;
pub use config::{AppConfig, CorrectorConfig, ElasticConfig};
pub use corrector::{prepare, AddressCorrector, PreparedQuery};
pub use elastic::ElasticSearchService;
pub use error::{ConfigError, CorrectError, SearchError};
pub use field::AddressField;
pub use query::{FuzzyClause, QueryContext, QuerySpec};
pub use scheme::AddressScheme;
pub use search::{CandidateRecord, SearchService};
