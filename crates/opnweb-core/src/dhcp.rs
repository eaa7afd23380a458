// ── DHCP static mappings ──
//
// The DHCP pages are scoped per network interface: the static mappings
// for `opt3` live at `services_dhcp.php?if=opt3` and their edit form at
// `services_dhcp_edit.php?if=opt3`. Positional row IDs are per-interface
// and only meaningful against the snapshot they were derived from, so
// every verb re-resolves before acting.

use std::sync::OnceLock;

use tracing::debug;

use opnweb_api::form::FormSecret;
use opnweb_api::scrape::{FieldSchema, Page, Table};
use opnweb_api::Session;

use crate::error::CoreError;
use crate::id::MappingId;
use crate::model::{dhcp_field, StaticMapping};
use crate::mutation::{checked_post, MutationStep};

const LEASES_PAGE: &str = "status_dhcp_leases.php";
const SERVICE_PAGE: &str = "services_dhcp.php";
const EDIT_PAGE: &str = "services_dhcp_edit.php";

/// Row the lease status table's header sits on; data follows directly.
const LEASE_HEADER_ROW: usize = 0;
/// Row the static-mapping table's header sits on; the row above carries
/// the section caption.
const MAP_HEADER_ROW: usize = 1;

const KIND: &str = "DHCP static mapping";

/// Record service for DHCP static address reservations.
pub struct DhcpService {
    lease_schema: OnceLock<FieldSchema>,
    map_schema: OnceLock<FieldSchema>,
}

impl DhcpService {
    pub fn new() -> Self {
        Self {
            lease_schema: OnceLock::new(),
            map_schema: OnceLock::new(),
        }
    }

    /// Drop cached field schemas, forcing rediscovery on the next scrape.
    /// Header layout does not vary within a session, so this is only
    /// needed when reusing a service against a different appliance.
    pub fn clear_schema_cache(&mut self) {
        self.lease_schema.take();
        self.map_schema.take();
    }

    /// Every lease on the global status page, static and dynamic alike.
    pub async fn leases(&self, session: &Session) -> Result<Vec<StaticMapping>, CoreError> {
        let body = session.get_page(LEASES_PAGE).await?;
        let page = Page::parse(&body);
        let table = page.table()?;
        let schema = cached_schema(&self.lease_schema, &table, LEASE_HEADER_ROW)?;
        Ok(table
            .data_rows(LEASE_HEADER_ROW + 1)
            .map(|row| StaticMapping {
                interface: row.field(&schema, dhcp_field::INTERFACE),
                mac: row.field(&schema, dhcp_field::MAC),
                ipaddr: row.field(&schema, dhcp_field::IP),
                hostname: row.field(&schema, dhcp_field::HOSTNAME),
            })
            .collect())
    }

    /// The static mappings configured on `interface`, in table order. The
    /// vector index is the row's positional ID for this snapshot.
    pub async fn static_maps(
        &self,
        session: &Session,
        interface: &str,
    ) -> Result<Vec<StaticMapping>, CoreError> {
        let body = session
            .get_page(&format!("{SERVICE_PAGE}?if={interface}"))
            .await?;
        let page = Page::parse(&body);
        let table = page.table()?;
        let schema = cached_schema(&self.map_schema, &table, MAP_HEADER_ROW)?;
        Ok(table
            .data_rows(MAP_HEADER_ROW + 1)
            .map(|row| StaticMapping {
                interface: interface.to_owned(),
                mac: row.field(&schema, dhcp_field::MAC),
                ipaddr: row.field(&schema, dhcp_field::IP),
                hostname: row.field(&schema, dhcp_field::HOSTNAME),
            })
            .collect())
    }

    /// Resolve `(interface, mac)` to the row's positional ID and observed
    /// record. Linear scan over a fresh snapshot on every call; if the
    /// appliance ever held duplicate MACs, the first row in table order
    /// wins (a policy decision, not an appliance guarantee).
    pub async fn resolve(
        &self,
        session: &Session,
        interface: &str,
        mac: &str,
    ) -> Result<(usize, StaticMapping), CoreError> {
        let maps = self.static_maps(session, interface).await?;
        maps.into_iter()
            .enumerate()
            .find(|(_, mapping)| mapping.mac == mac)
            .ok_or_else(|| CoreError::NotFound {
                kind: KIND,
                key: MappingId::new(interface, mac).to_string(),
            })
    }

    /// Create a new static mapping. Fails with `AlreadyExists` when the
    /// MAC is already mapped on the interface.
    pub async fn create(
        &self,
        session: &Session,
        mapping: &StaticMapping,
    ) -> Result<(), CoreError> {
        match self.resolve(session, &mapping.interface, &mapping.mac).await {
            Ok(_) => Err(CoreError::AlreadyExists {
                kind: KIND,
                key: MappingId::for_mapping(mapping).to_string(),
            }),
            Err(CoreError::NotFound { .. }) => self.create_or_edit(session, mapping, None).await,
            Err(err) => Err(err),
        }
    }

    /// Replace the field values of the mapping identified by `id`.
    pub async fn update(
        &self,
        session: &Session,
        id: &MappingId,
        mapping: &StaticMapping,
    ) -> Result<(), CoreError> {
        let (row, _) = self.resolve(session, &id.interface, &id.mac).await?;
        self.create_or_edit(session, mapping, Some(row)).await
    }

    /// Remove the mapping identified by `id`, then apply.
    pub async fn delete(&self, session: &Session, id: &MappingId) -> Result<(), CoreError> {
        let (row, _) = self.resolve(session, &id.interface, &id.mac).await?;
        debug!(row, id = %id, "deleting static mapping");
        let fields = vec![
            ("if".to_owned(), id.interface.clone()),
            ("id".to_owned(), row.to_string()),
            ("act".to_owned(), "del".to_owned()),
        ];
        checked_post(
            session,
            &format!("{SERVICE_PAGE}?if={}", id.interface),
            &fields,
            MutationStep::Submit,
        )
        .await?;
        self.apply(session, &id.interface, None).await
    }

    /// The edit-form flow shared by create and update: prime the form
    /// (capturing its one-shot secret), submit the full field set, apply.
    /// `row` present means edit; absent means create.
    async fn create_or_edit(
        &self,
        session: &Session,
        mapping: &StaticMapping,
        row: Option<usize>,
    ) -> Result<(), CoreError> {
        let mut edit_path = format!("{EDIT_PAGE}?if={}", mapping.interface);
        if let Some(row) = row {
            edit_path.push_str(&format!("&id={row}"));
        }

        let body = session.get_page(&edit_path).await?;
        let secret =
            FormSecret::from_page(&Page::parse(&body)).map_err(|err| CoreError::MutationRejected {
                step: MutationStep::Prime,
                message: err.to_string(),
            })?;

        let mut fields = vec![
            secret.field(),
            ("mac".to_owned(), mapping.mac.clone()),
            ("cid".to_owned(), mapping.hostname.clone()),
            ("ipaddr".to_owned(), mapping.ipaddr.clone()),
            ("hostname".to_owned(), mapping.hostname.clone()),
            ("descr".to_owned(), mapping.hostname.clone()),
            ("Submit".to_owned(), "Save".to_owned()),
            ("if".to_owned(), mapping.interface.clone()),
        ];
        if let Some(row) = row {
            fields.push(("id".to_owned(), row.to_string()));
        }

        debug!(
            interface = %mapping.interface,
            mac = %mapping.mac,
            edit = row.is_some(),
            "submitting static mapping"
        );
        checked_post(session, &edit_path, &fields, MutationStep::Submit).await?;

        self.apply(session, &mapping.interface, Some(&secret)).await
    }

    /// Commit staged changes for `interface`. Mutations stay invisible to
    /// reads until this succeeds. Deletes apply without a secret pair;
    /// the appliance only hands one out with a form render.
    async fn apply(
        &self,
        session: &Session,
        interface: &str,
        secret: Option<&FormSecret>,
    ) -> Result<(), CoreError> {
        let mut fields = vec![
            ("apply".to_owned(), "Apply changes".to_owned()),
            ("if".to_owned(), interface.to_owned()),
        ];
        if let Some(secret) = secret {
            fields.push(secret.field());
        }
        checked_post(
            session,
            &format!("{SERVICE_PAGE}?if={interface}"),
            &fields,
            MutationStep::Apply,
        )
        .await
    }
}

impl Default for DhcpService {
    fn default() -> Self {
        Self::new()
    }
}

/// Return the cached schema, discovering it from `table` on first use.
pub(crate) fn cached_schema(
    cache: &OnceLock<FieldSchema>,
    table: &Table<'_>,
    header_row: usize,
) -> Result<FieldSchema, CoreError> {
    if let Some(schema) = cache.get() {
        return Ok(schema.clone());
    }
    let schema = table.schema(header_row)?;
    Ok(cache.get_or_init(|| schema).clone())
}
