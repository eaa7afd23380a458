// ── Per-form anti-forgery secret ──
//
// Every form render embeds a one-shot hidden input whose name/value pair
// must be replayed verbatim on submit and again on apply. It is distinct
// from the session-level CSRF token and scoped to a single render, so it
// travels through the mutation call chain as a value -- never stored on
// the session.

use std::sync::LazyLock;

use scraper::Selector;

use crate::error::Error;
use crate::scrape::Page;

static FORM_INPUT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.content-box form input").expect("form input selector"));

/// The hidden anti-forgery pair from one form render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSecret {
    pub name: String,
    pub value: String,
}

impl FormSecret {
    /// Parse the secret from a rendered form page: the first input under
    /// the page's content box carries it.
    pub fn from_page(page: &Page) -> Result<Self, Error> {
        let input = page
            .root()
            .select(&FORM_INPUT)
            .next()
            .ok_or_else(|| Error::Scrape {
                message: "no form input under `div.content-box`".into(),
            })?;
        let name = input.value().attr("name").unwrap_or_default().to_owned();
        let value = input.value().attr("value").unwrap_or_default().to_owned();
        if name.is_empty() {
            return Err(Error::Scrape {
                message: "form secret input has no name".into(),
            });
        }
        Ok(Self { name, value })
    }

    /// The pair as a submittable form field.
    pub fn field(&self) -> (String, String) {
        (self.name.clone(), self.value.clone())
    }
}
