// ── DNS host overrides ──
//
// Unbound host overrides live in one global table at
// `services_unbound_overrides.php`; the edit form is
// `services_unbound_host_edit.php`. The positional row ID is global and
// recomputed from a fresh snapshot on every verb.

use std::sync::OnceLock;

use tracing::debug;

use opnweb_api::form::FormSecret;
use opnweb_api::scrape::{FieldSchema, Page};
use opnweb_api::Session;

use crate::dhcp::cached_schema;
use crate::error::CoreError;
use crate::id::OverrideId;
use crate::model::{dns_field, HostOverride};
use crate::mutation::{checked_post, MutationStep};

const SERVICE_PAGE: &str = "services_unbound_overrides.php";
const EDIT_PAGE: &str = "services_unbound_host_edit.php";

/// Row the override table's header sits on; the row above carries the
/// section caption.
const HEADER_ROW: usize = 1;

const KIND: &str = "DNS host override";

/// Record service for Unbound DNS host overrides.
pub struct DnsService {
    schema: OnceLock<FieldSchema>,
}

impl DnsService {
    pub fn new() -> Self {
        Self {
            schema: OnceLock::new(),
        }
    }

    /// Drop the cached field schema, forcing rediscovery on next scrape.
    pub fn clear_schema_cache(&mut self) {
        self.schema.take();
    }

    /// All host overrides in table order; the vector index is the row's
    /// positional ID for this snapshot.
    pub async fn overrides(&self, session: &Session) -> Result<Vec<HostOverride>, CoreError> {
        let body = session.get_page(SERVICE_PAGE).await?;
        let page = Page::parse(&body);
        let table = page.table()?;
        let schema = cached_schema(&self.schema, &table, HEADER_ROW)?;
        Ok(table
            .data_rows(HEADER_ROW + 1)
            .map(|row| HostOverride {
                record_type: row.field(&schema, dns_field::TYPE),
                host: row.field(&schema, dns_field::HOST),
                domain: row.field(&schema, dns_field::DOMAIN),
                ip: row.field(&schema, dns_field::VALUE),
            })
            .collect())
    }

    /// Resolve the natural-key tuple to the row's positional ID and
    /// observed record. Exact match on all four fields; the first row in
    /// table order wins if the appliance ever held duplicates.
    pub async fn resolve(
        &self,
        session: &Session,
        key: &HostOverride,
    ) -> Result<(usize, HostOverride), CoreError> {
        let overrides = self.overrides(session).await?;
        overrides
            .into_iter()
            .enumerate()
            .find(|(_, entry)| entry == key)
            .ok_or_else(|| Self::not_found(key))
    }

    /// The override currently at `row`, for update-by-handle.
    pub async fn override_at(
        &self,
        session: &Session,
        row: usize,
    ) -> Result<HostOverride, CoreError> {
        let mut overrides = self.overrides(session).await?;
        if row < overrides.len() {
            Ok(overrides.swap_remove(row))
        } else {
            Err(CoreError::NotFound {
                kind: KIND,
                key: format!("row {row}"),
            })
        }
    }

    /// Create a new host override and return its handle, with the row the
    /// entry landed on resolved from a fresh snapshot.
    pub async fn create(
        &self,
        session: &Session,
        entry: &HostOverride,
    ) -> Result<OverrideId, CoreError> {
        match self.resolve(session, entry).await {
            Ok(_) => {
                return Err(CoreError::AlreadyExists {
                    kind: KIND,
                    key: format!("{}/{}/{}/{}", entry.record_type, entry.host, entry.domain, entry.ip),
                });
            }
            Err(CoreError::NotFound { .. }) => {}
            Err(err) => return Err(err),
        }

        self.create_or_edit(session, entry, None).await?;
        let (row, _) = self.resolve(session, entry).await?;
        Ok(OverrideId::new(entry, row))
    }

    /// Replace the override addressed by the handle's row with `entry`.
    pub async fn update(
        &self,
        session: &Session,
        id: &OverrideId,
        entry: &HostOverride,
    ) -> Result<(), CoreError> {
        // Existence check on the handle's row before editing through it.
        self.override_at(session, id.row).await?;
        self.create_or_edit(session, entry, Some(id.row)).await
    }

    /// Remove the override matching the handle's natural key, then apply.
    pub async fn delete(&self, session: &Session, id: &OverrideId) -> Result<(), CoreError> {
        let (row, _) = self.resolve(session, &id.record()).await?;
        debug!(row, id = %id, "deleting host override");
        let fields = vec![
            ("id".to_owned(), row.to_string()),
            ("act".to_owned(), "del".to_owned()),
        ];
        checked_post(session, SERVICE_PAGE, &fields, MutationStep::Submit).await?;
        self.apply(session, None).await
    }

    async fn create_or_edit(
        &self,
        session: &Session,
        entry: &HostOverride,
        row: Option<usize>,
    ) -> Result<(), CoreError> {
        let edit_path = match row {
            Some(row) => format!("{EDIT_PAGE}?id={row}"),
            None => EDIT_PAGE.to_owned(),
        };

        let body = session.get_page(&edit_path).await?;
        let secret =
            FormSecret::from_page(&Page::parse(&body)).map_err(|err| CoreError::MutationRejected {
                step: MutationStep::Prime,
                message: err.to_string(),
            })?;

        let mut fields = vec![
            secret.field(),
            ("host".to_owned(), entry.host.clone()),
            ("domain".to_owned(), entry.domain.clone()),
            ("rr".to_owned(), entry.record_type.clone()),
            ("ip".to_owned(), entry.ip.clone()),
            ("descr".to_owned(), String::new()),
            ("Submit".to_owned(), "Save".to_owned()),
        ];
        if let Some(row) = row {
            fields.push(("id".to_owned(), row.to_string()));
        }

        debug!(fqdn = %entry.fqdn(), edit = row.is_some(), "submitting host override");
        checked_post(session, &edit_path, &fields, MutationStep::Submit).await?;

        self.apply(session, Some(&secret)).await
    }

    /// Commit staged overrides. Deletes apply without a secret pair; the
    /// appliance only hands one out with a form render.
    async fn apply(&self, session: &Session, secret: Option<&FormSecret>) -> Result<(), CoreError> {
        let mut fields = vec![("apply".to_owned(), "Apply changes".to_owned())];
        if let Some(secret) = secret {
            fields.push(secret.field());
        }
        checked_post(session, SERVICE_PAGE, &fields, MutationStep::Apply).await
    }

    fn not_found(key: &HostOverride) -> CoreError {
        CoreError::NotFound {
            kind: KIND,
            key: format!("{}/{}/{}/{}", key.record_type, key.host, key.domain, key.ip),
        }
    }
}

impl Default for DnsService {
    fn default() -> Self {
        Self::new()
    }
}
