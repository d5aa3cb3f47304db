use serde::{Deserialize, Serialize};

use parfum_storage::{
	lookups::{self, LookupKind},
	models::Lookup,
};

use crate::{CatalogService, DeleteResponse, Error, PageRequest, Result};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct LookupItem {
	pub id: i64,
	pub name: String,
}
impl From<Lookup> for LookupItem {
	fn from(row: Lookup) -> Self {
		Self { id: row.id, name: row.name }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LookupCreateRequest {
	pub name: String,
}

impl CatalogService {
	pub async fn list_lookups(&self, kind: LookupKind, req: PageRequest) -> Result<Vec<LookupItem>> {
		let page = req.page()?;
		let rows = lookups::list(&self.db.pool, kind, page).await?;

		Ok(rows.into_iter().map(LookupItem::from).collect())
	}

	pub async fn get_lookup(&self, kind: LookupKind, id: i64) -> Result<LookupItem> {
		lookups::get(&self.db.pool, kind, id)
			.await?
			.map(LookupItem::from)
			.ok_or_else(|| not_found(kind, id))
	}

	/// Creates a row named by the trimmed input. Names are matched exactly, so a differently cased
	/// name is a new row.
	pub async fn create_lookup(
		&self,
		kind: LookupKind,
		req: LookupCreateRequest,
	) -> Result<LookupItem> {
		let name = req.name.trim();

		if name.is_empty() {
			return Err(Error::invalid_field(
				"name",
				format!("{} name must not be empty.", kind.label()),
			));
		}

		let row = lookups::create(&self.db.pool, kind, name).await?;

		tracing::info!(table = kind.table(), id = row.id, "Lookup row created.");

		Ok(row.into())
	}

	pub async fn delete_lookup(&self, kind: LookupKind, id: i64) -> Result<DeleteResponse> {
		if !lookups::delete(&self.db.pool, kind, id).await? {
			return Err(not_found(kind, id));
		}

		Ok(DeleteResponse::deleted(kind.label()))
	}
}

fn not_found(kind: LookupKind, id: i64) -> Error {
	Error::NotFound { message: format!("{} {id} not found.", kind.label()) }
}
