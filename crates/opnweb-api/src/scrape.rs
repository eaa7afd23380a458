// ── Table scraper ──
//
// The admin pages render configuration tables with one consistent
// structural signature: the first `table.table-striped` on the page.
// Column meaning is discovered from the header row at runtime and cells
// are located by label position, never by fixed numeric offset -- column
// order and presence drift across appliance versions.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::Error;

/// Header label whose cells get MAC normalization on extraction.
pub const MAC_ADDRESS_LABEL: &str = "MAC address";
/// Header label whose empty cells read as the default marker.
pub const HOSTNAME_LABEL: &str = "Hostname";
/// What the appliance displays for an unset hostname.
pub const HOSTNAME_DEFAULT: &str = "default";

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.table-striped").expect("table selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("cell selector"));

/// Hex-octet pattern a MAC cell must contain; everything else rendered in
/// the cell (icon glyphs, button captions) is decoration to discard.
static MAC_OCTETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([0-9a-f]{2}(?::[0-9a-f]{2}){5})").expect("MAC pattern"));

/// A parsed admin page.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// The first configuration table on the page.
    pub fn table(&self) -> Result<Table<'_>, Error> {
        self.html
            .select(&TABLE)
            .next()
            .map(|root| Table { root })
            .ok_or_else(|| Error::Scrape {
                message: "no table matching `table.table-striped`".into(),
            })
    }

    pub(crate) fn root(&self) -> &Html {
        &self.html
    }
}

/// Ordered column labels discovered from a table's header row.
///
/// Lookups are by label only. Empty header cells are not recorded,
/// matching the appliance convention of labelling every data column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    labels: Vec<String>,
}

impl FieldSchema {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|recorded| recorded == label)
    }
}

/// The first signature table of a page.
pub struct Table<'a> {
    root: ElementRef<'a>,
}

impl<'a> Table<'a> {
    /// Discover the field schema from the header row at `header_row`
    /// (zero-based over the table's `<tr>` elements).
    pub fn schema(&self, header_row: usize) -> Result<FieldSchema, Error> {
        let row = self
            .root
            .select(&ROW)
            .nth(header_row)
            .ok_or_else(|| Error::Scrape {
                message: format!("no header row at index {header_row}"),
            })?;
        let labels = row
            .select(&CELL)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .filter(|label| !label.is_empty())
            .collect();
        Ok(FieldSchema { labels })
    }

    /// The data rows starting at `first_data_row` (zero-based over the
    /// table's `<tr>` elements). Consumed once per scrape; iterating again
    /// requires a fresh page fetch.
    pub fn data_rows(&self, first_data_row: usize) -> impl Iterator<Item = TableRow<'a>> {
        let root = self.root;
        root.select(&ROW)
            .skip(first_data_row)
            .map(|row| TableRow { row })
    }
}

/// One data row of a configuration table.
pub struct TableRow<'a> {
    row: ElementRef<'a>,
}

impl TableRow<'_> {
    /// Extract the cell for `label`, located by schema position.
    ///
    /// Text nodes are trimmed and concatenated. A `MAC address` cell keeps
    /// only the hex-octet substring; a `Hostname` cell that comes out
    /// empty reads as the appliance's default marker. A label the schema
    /// does not know reads as empty, so a column missing on an older
    /// appliance degrades to an empty field.
    pub fn field(&self, schema: &FieldSchema, label: &str) -> String {
        let Some(position) = schema.position(label) else {
            return String::new();
        };
        let Some(cell) = self.row.select(&CELL).nth(position) else {
            return String::new();
        };

        let mut value = String::new();
        for text in cell.text() {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if label == MAC_ADDRESS_LABEL {
                if let Some(mac) = MAC_OCTETS.find(text) {
                    value.push_str(mac.as_str());
                }
            } else {
                value.push_str(text);
            }
        }
        if label == HOSTNAME_LABEL && value.is_empty() {
            return HOSTNAME_DEFAULT.to_owned();
        }
        value
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATIC_MAP_PAGE: &str = r#"<html><body>
        <table class="table table-striped">
          <tr><td colspan="5">DHCP Static Mappings for this interface</td></tr>
          <tr><th>Static ARP</th><th>MAC address</th><th>IP address</th><th>Hostname</th><th>Description</th></tr>
          <tr>
            <td></td>
            <td><i class="fa fa-ethernet"></i> edit aa:bb:cc:dd:ee:ff</td>
            <td>10.69.0.99</td>
            <td>terraform</td>
            <td>terraform</td>
          </tr>
          <tr>
            <td></td>
            <td>11:22:33:44:55:66</td>
            <td>10.69.0.50</td>
            <td></td>
            <td></td>
          </tr>
        </table>
    </body></html>"#;

    #[test]
    fn discovers_schema_from_header_row() {
        let page = Page::parse(STATIC_MAP_PAGE);
        let schema = page.table().unwrap().schema(1).unwrap();
        assert_eq!(
            schema.labels(),
            &["Static ARP", "MAC address", "IP address", "Hostname", "Description"]
        );
        assert_eq!(schema.position("IP address"), Some(2));
        assert_eq!(schema.position("No such column"), None);
    }

    #[test]
    fn skips_empty_header_cells() {
        let page = Page::parse(
            r#"<table class="table table-striped">
                 <tr><th></th><th>Host</th><th>  </th><th>Domain</th></tr>
               </table>"#,
        );
        let schema = page.table().unwrap().schema(0).unwrap();
        assert_eq!(schema.labels(), &["Host", "Domain"]);
    }

    #[test]
    fn mac_cell_keeps_only_the_octet_substring() {
        let page = Page::parse(STATIC_MAP_PAGE);
        let table = page.table().unwrap();
        let schema = table.schema(1).unwrap();
        let rows: Vec<_> = table.data_rows(2).collect();
        assert_eq!(rows[0].field(&schema, MAC_ADDRESS_LABEL), "aa:bb:cc:dd:ee:ff");
        assert_eq!(rows[1].field(&schema, MAC_ADDRESS_LABEL), "11:22:33:44:55:66");
    }

    #[test]
    fn empty_hostname_reads_as_default_marker() {
        let page = Page::parse(STATIC_MAP_PAGE);
        let table = page.table().unwrap();
        let schema = table.schema(1).unwrap();
        let rows: Vec<_> = table.data_rows(2).collect();
        assert_eq!(rows[0].field(&schema, HOSTNAME_LABEL), "terraform");
        assert_eq!(rows[1].field(&schema, HOSTNAME_LABEL), HOSTNAME_DEFAULT);
    }

    #[test]
    fn unknown_label_reads_as_empty() {
        let page = Page::parse(STATIC_MAP_PAGE);
        let table = page.table().unwrap();
        let schema = table.schema(1).unwrap();
        let row = table.data_rows(2).next().unwrap();
        assert_eq!(row.field(&schema, "Lease type"), "");
    }

    #[test]
    fn missing_table_is_a_scrape_error() {
        let page = Page::parse("<html><body><p>login</p></body></html>");
        assert!(matches!(page.table(), Err(Error::Scrape { .. })));
    }
}
