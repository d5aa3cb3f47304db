pub mod assemble;
pub mod lookups;
pub mod notes;
pub mod perfumes;
pub mod search;
pub mod time_serde;

mod error;

pub use assemble::{PerfumeDetailResponse, PerfumeListItem, PerfumeNoteItem};
pub use error::{Error, Result};
pub use lookups::{LookupCreateRequest, LookupItem};
pub use notes::{
	NoteCreateRequest, NoteDetailResponse, NoteListItem, NoteListRequest, NoteSearchRequest,
};
pub use parfum_storage::lookups::LookupKind;
pub use perfumes::{PerfumeNoteInput, PerfumeWriteRequest};
pub use search::SearchRequest;

use serde::{Deserialize, Serialize};

use parfum_config::Config;
use parfum_domain::Page;
use parfum_storage::db::Db;

/// Offset/limit query parameters as received, validated by [`PageRequest::page`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PageRequest {
	pub skip: Option<i64>,
	pub limit: Option<i64>,
}
impl PageRequest {
	pub fn page(&self) -> Result<Page> {
		Ok(Page::new(self.skip, self.limit)?)
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeleteResponse {
	pub message: String,
}
impl DeleteResponse {
	pub(crate) fn deleted(label: &str) -> Self {
		Self { message: format!("{label} deleted successfully") }
	}
}

pub struct CatalogService {
	pub cfg: Config,
	pub db: Db,
}
impl CatalogService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
