//! HTTP automation for the OPNsense web administration interface.
//!
//! The appliance exposes no formal API -- its session-authenticated HTML
//! admin pages *are* the wire format. This crate owns the mechanics of
//! treating them as one: the authenticated session (PHP session cookie
//! plus CSRF token header), runtime discovery of configuration-table
//! schemas, and the per-form anti-forgery secret every mutation must
//! replay verbatim.
//!
//! Record semantics (what a DHCP mapping or DNS override *means*) live in
//! `opnweb-core`; this crate only knows pages, tables, and forms.

pub mod error;
pub mod form;
pub mod scrape;
pub mod session;
pub mod transport;

pub use error::Error;
pub use form::FormSecret;
pub use scrape::{FieldSchema, Page, Table, TableRow};
pub use session::Session;
pub use transport::{TlsMode, TransportConfig};
