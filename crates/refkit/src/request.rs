//! Request descriptions
//!
//! Builds the method, URL, body and fetch options of a GET/POST the way a
//! browser page would issue them. Nothing here performs I/O; the caller
//! hands the [`Request`] to whatever transport it uses and reports the
//! status back through [`check_status`].

use refkit_dom::{ElementLookup, NodeId};
use serde::Serialize;
use url::form_urlencoded;

use crate::config::{FetchCache, FetchMode, Options};
use crate::{Error, Result};

/// HTTP method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Ordered name/value pairs, as submitted by a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parameter pairs
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Self {
        let mut data = Self::new();
        for (k, v) in pairs {
            data.append(k.as_ref(), v.as_ref());
        }
        data
    }

    /// Collect the successful controls of a form
    ///
    /// Named, enabled `input`/`select`/`textarea` elements in document
    /// order. Checkboxes and radios count only when `checked`; buttons and
    /// file inputs never do. A `multiple` select yields one entry per
    /// selected option.
    pub fn from_form<D: ElementLookup + ?Sized>(doc: &D, form: NodeId) -> Self {
        let mut data = Self::new();
        for control in doc.get_elements_by_tag_name(form, "*") {
            let Some(tag) = doc.tag_name(control) else {
                continue;
            };
            if !matches!(tag, "input" | "select" | "textarea") {
                continue;
            }
            let Some(name) = doc.get_attribute(control, "name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if doc.has_attribute(control, "disabled") {
                continue;
            }

            if tag == "input" {
                let kind = doc
                    .get_attribute(control, "type")
                    .unwrap_or("text")
                    .to_ascii_lowercase();
                match kind.as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" if !doc.has_attribute(control, "checked") => continue,
                    "checkbox" | "radio" => {
                        let value = doc.get_attribute(control, "value").unwrap_or("on");
                        data.append(name, value);
                        continue;
                    }
                    _ => {}
                }
            }

            if tag == "select" && doc.has_attribute(control, "multiple") {
                for option in doc.get_elements_by_tag_name(control, "option") {
                    if doc.has_attribute(option, "selected") {
                        data.append(name, &doc.value(option));
                    }
                }
                continue;
            }

            data.append(name, &doc.value(control));
        }
        data
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// First value stored under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value stored under `name`
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_param_string(&self) -> String {
        to_param_string(&self.entries)
    }
}

/// Encode pairs as `k=v&k2=v2`
pub fn to_param_string<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}

/// Append encoded parameters to a URL
pub fn format_url_with_param<K: AsRef<str>, V: AsRef<str>>(url: &str, params: &[(K, V)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{}", to_param_string(params))
}

/// MVC-style route: `/Controller/Action?k=v`
pub fn url_action<K: AsRef<str>, V: AsRef<str>>(
    action: &str,
    controller: Option<&str>,
    params: &[(K, V)],
) -> String {
    let path = match controller.filter(|c| crate::strings::is_valid_value(Some(*c))) {
        Some(controller) => format!("/{controller}/{action}"),
        None => format!("/{action}"),
    };
    if params.is_empty() {
        return path;
    }

    let query: Vec<String> = params
        .iter()
        .map(|(k, v)| {
            let value: String = form_urlencoded::byte_serialize(v.as_ref().as_bytes()).collect();
            format!("{}={value}", k.as_ref())
        })
        .collect();
    format!("{path}?{}", query.join("&"))
}

/// Per-call fetch options; unset fields fall back to [`Options`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub is_json: Option<bool>,
    pub fetch_cache: Option<FetchCache>,
    pub fetch_mode: Option<FetchMode>,
}

/// Fetch options with every field decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FetchOptions {
    pub is_json: bool,
    pub cache: FetchCache,
    pub mode: FetchMode,
}

impl RequestOptions {
    /// Resolve unset fields: `is_json` from `force_json`, cache and mode
    /// from the shared options
    pub fn fill_missing(options: Option<RequestOptions>, force_json: bool, global: &Options) -> FetchOptions {
        let options = options.unwrap_or_default();
        FetchOptions {
            is_json: options.is_json.unwrap_or(force_json),
            cache: options.fetch_cache.unwrap_or(global.fetch_cache),
            mode: options.fetch_mode.unwrap_or(global.fetch_mode),
        }
    }
}

/// A request ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<FormData>,
    pub options: FetchOptions,
    pub credentials: &'static str,
}

impl Request {
    fn new(method: Method, url: String, body: Option<FormData>, options: FetchOptions) -> Self {
        tracing::debug!(method = method.as_str(), %url, "request prepared");
        Self {
            method,
            url,
            body,
            options,
            credentials: "same-origin",
        }
    }

    /// GET with the parameters in the query string
    pub fn get<K: AsRef<str>, V: AsRef<str>>(
        url: &str,
        params: &[(K, V)],
        options: Option<RequestOptions>,
        global: &Options,
    ) -> Self {
        let options = RequestOptions::fill_missing(options, false, global);
        Self::new(Method::Get, format_url_with_param(url, params), None, options)
    }

    /// GET expecting a JSON response
    pub fn get_json<K: AsRef<str>, V: AsRef<str>>(
        url: &str,
        params: &[(K, V)],
        options: Option<RequestOptions>,
        global: &Options,
    ) -> Self {
        let options = RequestOptions::fill_missing(options, true, global);
        Self::new(Method::Get, format_url_with_param(url, params), None, options)
    }

    /// POST with a form-data body
    pub fn post(url: &str, data: FormData, options: Option<RequestOptions>, global: &Options) -> Self {
        let options = RequestOptions::fill_missing(options, false, global);
        Self::new(Method::Post, url.to_string(), Some(data), options)
    }

    /// POST a form's data to its `action`
    pub fn submit_form<D: ElementLookup + ?Sized>(
        doc: &D,
        form_id: &str,
        options: Option<RequestOptions>,
        global: &Options,
    ) -> Result<Self> {
        let form_id = form_id.strip_prefix('#').unwrap_or(form_id);
        let form = doc
            .get_element_by_id(form_id)
            .ok_or_else(|| Error::NotFound(format!("#{form_id}")))?;
        let action = doc.get_attribute(form, "action").ok_or_else(|| Error::MissingAttribute {
            element: format!("#{form_id}"),
            attribute: "action",
        })?;
        Ok(Self::post(action, FormData::from_form(doc, form), options, global))
    }
}

/// Map a response status to an error outside 200-299
pub fn check_status(status: u16, status_text: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(Error::HttpStatus {
            status,
            status_text: status_text.to_string(),
        })
    }
}
